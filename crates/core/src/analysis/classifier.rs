//! Condition classifier: the priority ladder
//!
//! A fixed, ordered table of rungs; each rung is a `(name, applies,
//! classify)` triple of pure functions and the first applicable rung wins.
//! There is no runtime registration; the ladder is the complete
//! classification policy:
//!
//! 1. active precipitation (with a fog check for wet-but-trace readings)
//! 2. fog
//! 3. severe dry weather (dry thunderstorm indicators, gale)
//! 4. daytime cloud cover, with the clear-sky windy override
//! 5. twilight
//! 6. nighttime cascade

use crate::analysis::fog::FogAnalysis;
use crate::analysis::pressure_wind::{GustAnalysis, PressureSystem};
use crate::atmosphere::altitude::PressureBands;
use crate::core_types::condition::{Condition, RainState};
use crate::core_types::constants::{
    CloudCoverThresholds, PrecipitationThresholds, TemperatureThresholds, WindThresholds,
};

/// Everything the ladder looks at, in canonical units.
#[derive(Debug, Clone)]
pub struct ClassifierInputs {
    pub rain_rate_inh: f64,
    pub rain_state: RainState,
    pub temp_f: f64,
    pub humidity_pct: f64,
    pub wind_mph: f64,
    pub gust_mph: f64,
    pub gust: GustAnalysis,
    /// Sea-level pressure, inHg
    pub pressure_inhg: f64,
    /// Altitude-shifted classification bands
    pub bands: PressureBands,
    pub system: PressureSystem,
    /// Fog analysis for this observation
    pub fog: FogAnalysis,
    pub cloud_cover_pct: f64,
    pub is_daytime: bool,
    pub is_twilight: bool,
    pub lux: f64,
}

/// One ladder rung.
pub struct Rung {
    pub name: &'static str,
    pub applies: fn(&ClassifierInputs) -> bool,
    pub classify: fn(&ClassifierInputs) -> Condition,
}

/// The classification ladder, highest priority first.
pub const LADDER: [Rung; 6] = [
    Rung {
        name: "precipitation",
        applies: precipitation_applies,
        classify: classify_precipitation,
    },
    Rung {
        name: "fog",
        applies: |i| i.fog.is_foggy(),
        classify: |_| Condition::Fog,
    },
    Rung {
        name: "severe_weather",
        applies: severe_applies,
        classify: classify_severe,
    },
    Rung {
        name: "daytime_sky",
        applies: |i| i.is_daytime,
        classify: classify_daytime,
    },
    Rung {
        name: "twilight",
        applies: |i| i.is_twilight,
        classify: classify_twilight,
    },
    Rung {
        name: "night",
        applies: |_| true,
        classify: classify_night,
    },
];

/// Walk the ladder; the final rung always applies.
#[must_use]
pub fn classify(inputs: &ClassifierInputs) -> (Condition, &'static str) {
    for rung in &LADDER {
        if (rung.applies)(inputs) {
            return ((rung.classify)(inputs), rung.name);
        }
    }
    // The night rung is unconditional; this is unreachable but total.
    (Condition::PartlyCloudyNight, "night")
}

fn precipitation_applies(i: &ClassifierInputs) -> bool {
    i.rain_rate_inh > PrecipitationThresholds::ACTIVE || i.rain_state == RainState::Wet
}

fn classify_precipitation(i: &ClassifierInputs) -> Condition {
    // A wet moisture sensor with only trace rate is often condensation:
    // give fog the first look.
    let trace_only = i.rain_rate_inh <= PrecipitationThresholds::ACTIVE;
    if i.rain_state == RainState::Wet && trace_only && i.fog.is_foggy() {
        return Condition::Fog;
    }

    if i.temp_f <= TemperatureThresholds::FREEZING {
        return Condition::Snowy;
    }

    let storm_pressure = i.pressure_inhg < i.bands.extremely_low
        || (i.pressure_inhg < i.bands.very_low
            && i.wind_mph >= WindThresholds::STRONG
            && i.rain_rate_inh > PrecipitationThresholds::STORM_MODERATE_RATE)
        || (i.pressure_inhg < i.bands.very_low
            && i.gust.is_very_gusty
            && i.rain_rate_inh > PrecipitationThresholds::STORM_HEAVY_RATE);
    if storm_pressure {
        return Condition::LightningRainy;
    }

    if i.rain_rate_inh >= PrecipitationThresholds::MODERATE {
        Condition::Pouring
    } else {
        Condition::Rainy
    }
}

fn severe_applies(i: &ClassifierInputs) -> bool {
    let dry_storm = i.pressure_inhg < i.bands.very_low
        && i.wind_mph >= WindThresholds::STRONG
        && i.gust.factor > WindThresholds::GUST_FACTOR_STRONG
        && i.gust_mph > WindThresholds::GUST_STRONG;
    dry_storm || i.gust.is_severe_turbulence || i.wind_mph >= WindThresholds::GALE
}

fn classify_severe(i: &ClassifierInputs) -> Condition {
    if i.gust.is_severe_turbulence {
        return Condition::Lightning;
    }
    if i.pressure_inhg < i.bands.very_low
        && i.wind_mph >= WindThresholds::STRONG
        && i.gust.factor > WindThresholds::GUST_FACTOR_STRONG
        && i.gust_mph > WindThresholds::GUST_STRONG
    {
        return Condition::Lightning;
    }
    // Gale without the thunderstorm indicators
    Condition::Windy
}

fn classify_daytime(i: &ClassifierInputs) -> Condition {
    let sky = if i.cloud_cover_pct <= CloudCoverThresholds::SUNNY {
        Condition::Sunny
    } else if i.cloud_cover_pct <= CloudCoverThresholds::PARTLY_CLOUDY {
        Condition::PartlyCloudy
    } else {
        Condition::Cloudy
    };

    // Clear-sky windy override: a strong or very gusty wind under an
    // otherwise sunny sky reads as windy, cloud tiers are left alone.
    if sky == Condition::Sunny {
        let windy = i.wind_mph >= WindThresholds::STRONG
            || (i.gust.is_very_gusty && i.wind_mph >= WindThresholds::LIGHT);
        if windy {
            return Condition::Windy;
        }
    }
    sky
}

fn classify_twilight(i: &ClassifierInputs) -> Condition {
    if i.lux > 50.0 && i.system == PressureSystem::Normal {
        Condition::PartlyCloudy
    } else {
        Condition::Cloudy
    }
}

fn classify_night(i: &ClassifierInputs) -> Condition {
    let humidity = i.humidity_pct;
    let wind = i.wind_mph;

    if i.system.is_low() && humidity > 90.0 && wind < 3.0 {
        Condition::Cloudy
    } else if i.system == PressureSystem::VeryHigh && wind < WindThresholds::CALM && humidity < 70.0
    {
        Condition::ClearNight
    } else if i.system.is_high() && !i.gust.is_gusty && humidity < 80.0 {
        Condition::ClearNight
    } else if i.system.is_low() && humidity < 65.0 {
        Condition::ClearNight
    } else if i.system == PressureSystem::Normal
        && (WindThresholds::CALM..WindThresholds::LIGHT).contains(&wind)
        && humidity < 85.0
    {
        Condition::PartlyCloudyNight
    } else if i.system.is_low() && humidity < 90.0 {
        Condition::PartlyCloudyNight
    } else if humidity > 90.0 {
        Condition::Cloudy
    } else {
        Condition::PartlyCloudyNight
    }
}
