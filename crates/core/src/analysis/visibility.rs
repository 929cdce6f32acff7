//! Visibility estimation
//!
//! Condition-conditioned visibility in kilometers. Fog visibility tracks
//! the dewpoint spread, precipitation visibility scales with intensity and
//! wind, and clear-sky visibility tracks atmospheric clarity (humidity at
//! night, radiation by day).

use crate::core_types::condition::Condition;

/// Inputs for the visibility estimate, canonical units.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityInputs {
    pub condition: Condition,
    /// Temperature minus dewpoint, °F
    pub spread_f: f64,
    pub humidity_pct: f64,
    pub rain_rate_inh: f64,
    pub wind_mph: f64,
    pub gust_mph: f64,
    pub solar_wm2: f64,
    pub lux: f64,
    pub is_daytime: bool,
}

/// Estimate visibility in kilometers.
#[must_use]
pub fn estimate_visibility_km(inputs: &VisibilityInputs) -> f64 {
    match inputs.condition {
        Condition::Fog => fog_visibility(inputs.spread_f),
        Condition::Rainy | Condition::Snowy => precipitation_visibility(
            inputs.condition,
            inputs.rain_rate_inh,
            inputs.wind_mph,
        ),
        Condition::LightningRainy | Condition::Lightning => {
            storm_visibility(inputs.rain_rate_inh, inputs.gust_mph)
        }
        Condition::Pouring => precipitation_visibility(
            Condition::Rainy,
            inputs.rain_rate_inh.max(0.5),
            inputs.wind_mph,
        ),
        Condition::ClearNight => clear_night_visibility(inputs.humidity_pct),
        Condition::Sunny => sunny_visibility(inputs.solar_wm2),
        Condition::PartlyCloudy | Condition::Cloudy | Condition::PartlyCloudyNight => {
            cloudy_visibility(inputs.is_daytime, inputs.lux, inputs.humidity_pct)
        }
        Condition::Windy => 15.0,
    }
}

/// Fog density tracks the dewpoint spread.
fn fog_visibility(spread_f: f64) -> f64 {
    if spread_f <= 1.0 {
        0.3
    } else if spread_f <= 2.0 {
        0.8
    } else if spread_f <= 3.0 {
        1.5
    } else {
        2.5
    }
}

fn precipitation_visibility(condition: Condition, rain_rate_inh: f64, wind_mph: f64) -> f64 {
    let base = if condition == Condition::Snowy {
        8.0
    } else {
        15.0
    };

    let intensity_factor = if rain_rate_inh > 0.5 {
        0.3
    } else if rain_rate_inh > 0.25 {
        0.5
    } else if rain_rate_inh > 0.1 {
        0.7
    } else {
        0.85
    };

    // Wind drives precipitation sideways into the sight line
    let wind_factor = (1.0 - wind_mph / 50.0).max(0.6);

    (base * intensity_factor * wind_factor).max(0.5)
}

fn storm_visibility(rain_rate_inh: f64, gust_mph: f64) -> f64 {
    let visibility = if rain_rate_inh > 0.1 {
        3.0 - rain_rate_inh * 2.0
    } else {
        // Dry storm: dust and debris
        8.0 - gust_mph / 10.0
    };
    visibility.max(0.8)
}

fn clear_night_visibility(humidity_pct: f64) -> f64 {
    if humidity_pct < 50.0 {
        25.0
    } else if humidity_pct < 70.0 {
        20.0
    } else {
        15.0
    }
}

fn sunny_visibility(solar_wm2: f64) -> f64 {
    if solar_wm2 > 800.0 {
        30.0
    } else if solar_wm2 >= 600.0 {
        25.0
    } else if solar_wm2 > 400.0 {
        20.0
    } else {
        15.0
    }
}

fn cloudy_visibility(is_daytime: bool, lux: f64, humidity_pct: f64) -> f64 {
    if is_daytime {
        if lux > 50_000.0 {
            25.0
        } else if lux > 20_000.0 {
            20.0
        } else if lux > 5_000.0 {
            15.0
        } else {
            12.0
        }
    } else if humidity_pct < 75.0 {
        18.0
    } else if humidity_pct < 85.0 {
        15.0
    } else {
        12.0
    }
}
