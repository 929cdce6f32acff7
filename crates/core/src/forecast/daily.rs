//! Five-day daily forecast
//!
//! Each day projects temperature, condition, precipitation, wind, and
//! humidity from the current basis, the evolution trajectory, and the
//! history-derived volatility. Everything decays toward the present
//! observation as the horizon stretches: far days hedge toward
//! persistence.

use chrono::{Datelike, Duration};

use crate::core_types::condition::Condition;
use crate::core_types::units::{Fahrenheit, UnitSystem, INCHES_TO_MM, MPH_TO_KMH};
use crate::forecast::evolution::{condition_at, ladder_position, Evolution};
use crate::forecast::state::{ForecastBasis, MeteoState};
use crate::forecast::{
    canonical_precipitation_mm, condition_target_humidity, condition_temperature_range_f,
    condition_wind_factor, DailyForecast,
};

/// Annual temperature cycle amplitude, °F.
const SEASONAL_AMPLITUDE_F: f64 = 14.0;

/// Generate the 5-day forecast.
#[must_use]
pub fn generate_daily(
    basis: &ForecastBasis,
    state: &MeteoState,
    units: UnitSystem,
) -> Vec<DailyForecast> {
    let evolution = Evolution::from_state(state);
    let start_position = ladder_position(basis.condition);

    (0..5)
        .map(|day| {
            let datetime = basis.timestamp + Duration::days(i64::from(day) + 1);

            let condition = forecast_condition(
                day,
                start_position,
                &evolution,
                state.pressure.storm_probability,
            );
            let temp_f = forecast_temperature_f(basis, state, day);
            let swing_f = condition_temperature_range_f(condition, state.stability)
                * (1.0 + state.wind.gradient_wind_effect * 0.02).min(1.3);

            let precipitation_mm = forecast_precipitation_mm(condition, state, day);
            let precipitation_probability = precipitation_probability(basis, state, condition);
            let wind_mph = forecast_wind_mph(basis, state, condition, day);
            let humidity = forecast_humidity(state, condition);

            let wind_bearing = state
                .pressure
                .wind_direction
                .map(|summary| summary.mean_direction_deg)
                .or(basis.wind_bearing_deg);

            let (temp_high, temp_low) = match units {
                UnitSystem::Imperial => (temp_f, temp_f - swing_f),
                UnitSystem::Metric => (to_celsius(temp_f), to_celsius(temp_f - swing_f)),
            };

            DailyForecast {
                datetime,
                condition,
                temp_high,
                temp_low,
                precipitation: match units {
                    UnitSystem::Imperial => precipitation_mm / INCHES_TO_MM,
                    UnitSystem::Metric => precipitation_mm,
                },
                precipitation_probability,
                wind_speed: match units {
                    UnitSystem::Imperial => wind_mph,
                    UnitSystem::Metric => wind_mph * MPH_TO_KMH,
                },
                wind_bearing,
                humidity,
            }
        })
        .collect()
}

fn to_celsius(temp_f: f64) -> f64 {
    Fahrenheit(temp_f).to_celsius().value()
}

/// Annual temperature cycle: coldest in mid-January, warmest in
/// mid-July (northern-hemisphere phase).
fn seasonal_cycle_f(day_of_year: f64) -> f64 {
    let phase = 2.0 * std::f64::consts::PI * (day_of_year - 15.0) / 365.25;
    -SEASONAL_AMPLITUDE_F * phase.cos()
}

fn forecast_temperature_f(basis: &ForecastBasis, state: &MeteoState, day: u32) -> f64 {
    let day_f = f64::from(day);
    let doy = f64::from(basis.timestamp.ordinal());

    // Seasonal drift relative to today
    let seasonal = seasonal_cycle_f(doy + day_f + 1.0) - seasonal_cycle_f(doy);

    // Pressure systems push temperatures: highs run warm, lows cool
    let system_influence = if state.pressure.system.is_high() {
        2.0
    } else if state.pressure.system.is_low() {
        -3.0
    } else {
        0.0
    };
    let trend_influence = state.trend_3h_hpa() * 0.5 + state.trend_24h_hpa() * 0.3;
    let distance_dampening = (1.0 - day_f * 0.15).max(0.3);
    let pressure_influence =
        ((system_influence + trend_influence) * distance_dampening).clamp(-5.0, 5.0);

    // Volatility-scaled day-to-day variation, deterministic alternation
    let alternator = f64::from(day % 3) - 1.0;
    let noise = state.temp_volatility * 0.3 * alternator * (1.0 - day_f * 0.2).max(0.2);

    let raw = basis.temp_f + seasonal + pressure_influence + noise;

    // Stable air and forecast distance both pull the projection back
    // toward the present observation
    let deviation = (raw - basis.temp_f) * (1.0 - state.stability * 0.3) * (1.0 - day_f / 8.0);
    basis.temp_f + deviation
}

fn forecast_condition(
    day: u32,
    start_position: f64,
    evolution: &Evolution,
    storm_probability: f64,
) -> Condition {
    if day == 0 && storm_probability >= 70.0 {
        return Condition::LightningRainy;
    }

    let position = evolution.advance(start_position, 24.0 * f64::from(day + 1));
    condition_at(position)
}

fn forecast_precipitation_mm(condition: Condition, state: &MeteoState, day: u32) -> f64 {
    let mut amount = canonical_precipitation_mm(condition);
    if amount == 0.0 {
        return 0.0;
    }

    // Storm enhancement
    if state.pressure.storm_probability > 70.0 {
        amount *= 1.8;
    } else if state.pressure.storm_probability > 40.0 {
        amount *= 1.4;
    }

    // Falling pressure wrings more water out; rising dries up
    let trend_3h = state.trend_3h_hpa();
    if trend_3h < -1.0 {
        amount *= 1.5;
    } else if trend_3h < -0.5 {
        amount *= 1.25;
    } else if trend_3h > 1.0 {
        amount *= 0.4;
    }

    // Moisture supply and instability
    amount *= state.moisture.factor();
    amount *= 1.0 + (1.0 - state.stability) * 0.5;

    // Rising humidity amplifies, up to 1.5x
    let humidity_gain = (state.moisture.humidity_trend_per_hour * 0.1).clamp(0.0, 0.5);
    amount *= 1.0 + humidity_gain;

    amount * (1.0 - f64::from(day) * 0.15).max(0.2)
}

fn precipitation_probability(
    basis: &ForecastBasis,
    state: &MeteoState,
    condition: Condition,
) -> f64 {
    let mut probability: f64 = 0.0;

    let trend_3h = state.trend_3h_hpa();
    if trend_3h < 0.0 {
        probability += (-trend_3h * 20.0).min(40.0);
    }

    if basis.humidity_pct > 80.0 {
        probability += 30.0;
    } else if basis.humidity_pct > 60.0 {
        probability += 15.0;
    }

    probability += state.pressure.storm_probability * 0.5;
    probability += state.moisture.condensation_potential * 20.0;

    if condition.is_precipitating() {
        probability = probability.max(55.0);
    }

    probability.clamp(0.0, 100.0)
}

fn forecast_wind_mph(
    basis: &ForecastBasis,
    state: &MeteoState,
    condition: Condition,
    day: u32,
) -> f64 {
    let mut wind = basis.wind_mph * condition_wind_factor(condition);

    if state.pressure.system.is_low() {
        wind *= 1.3;
    } else if state.pressure.system.is_high() {
        wind *= 0.8;
    }

    wind += state.wind.gradient_wind_effect;

    // Unsteady direction means variable, gustier flow
    if state.wind.direction_stability < 0.3 {
        wind *= 1.2;
    } else if state.wind.direction_stability > 0.8 {
        wind *= 0.9;
    }

    wind *= (1.0 - f64::from(day) * 0.12).max(0.4);
    wind.max(1.0)
}

fn forecast_humidity(state: &MeteoState, condition: Condition) -> f64 {
    // A full day is ample time to converge on the condition target
    let mut humidity = condition_target_humidity(condition);

    if state.stability > 0.7 {
        humidity += 3.0;
    } else if state.stability < 0.3 {
        humidity -= 3.0;
    }

    if state.moisture.humidity_trend_per_hour > 1.0 {
        humidity += 5.0;
    } else if state.moisture.humidity_trend_per_hour < -1.0 {
        humidity -= 5.0;
    }

    humidity.clamp(0.0, 100.0)
}
