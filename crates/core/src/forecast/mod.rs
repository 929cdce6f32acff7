//! Forecast engine
//!
//! Deterministic daily (5-day) and hourly (24-hour) projections built
//! from the meteorological state bundle and the evolution trajectory. No
//! random draws anywhere: all variation derives from trend magnitude,
//! historical volatility, and diurnal astronomy.

pub mod daily;
pub mod evolution;
pub mod hourly;
pub mod state;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core_types::condition::Condition;

pub use daily::generate_daily;
pub use evolution::{condition_at, ladder_position, Evolution, TrendSeverity};
pub use hourly::generate_hourly;
pub use state::{ForecastBasis, MeteoState, MoistureAnalysis, WeatherSystemKind, WindPattern};

/// One daily forecast record. Scalar units follow the station's configured
/// output system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub datetime: DateTime<Utc>,
    pub condition: Condition,
    pub temp_high: f64,
    pub temp_low: f64,
    /// Expected precipitation over the day
    pub precipitation: f64,
    /// Probability in [0, 100]
    pub precipitation_probability: f64,
    pub wind_speed: f64,
    pub wind_bearing: Option<f64>,
    /// Relative humidity in [0, 100]
    pub humidity: f64,
}

/// One hourly forecast record. Scalar units follow the station's
/// configured output system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub datetime: DateTime<Utc>,
    pub condition: Condition,
    pub temperature: f64,
    pub precipitation: f64,
    /// Probability in [0, 100]
    pub precipitation_probability: f64,
    pub wind_speed: f64,
    pub wind_bearing: Option<f64>,
    /// Relative humidity in [0, 100]
    pub humidity: f64,
}

/// Forecast horizon selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastHorizon {
    /// 24 hourly records
    Hourly24,
    /// 5 daily records
    Daily120,
}

/// A generated forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "horizon", content = "records")]
pub enum Forecast {
    Hourly(Vec<HourlyForecast>),
    Daily(Vec<DailyForecast>),
}

// Shared per-condition parameter tables (canonical imperial / mm units).

/// Expected diurnal temperature range in °F: clear skies swing hard,
/// overcast and fog pin the temperature.
#[must_use]
pub(crate) fn condition_temperature_range_f(condition: Condition, stability: f64) -> f64 {
    let base = match condition {
        Condition::Sunny | Condition::ClearNight => 20.0,
        Condition::PartlyCloudy | Condition::PartlyCloudyNight | Condition::Windy => 16.0,
        Condition::Cloudy => 10.0,
        Condition::Snowy => 8.0,
        Condition::Rainy => 7.0,
        Condition::LightningRainy | Condition::Lightning => 5.0,
        Condition::Pouring => 6.0,
        Condition::Fog => 4.0,
    };
    (base * (0.5 + stability)).clamp(4.0, 27.0)
}

/// Humidity a condition converges toward, percent.
#[must_use]
pub(crate) fn condition_target_humidity(condition: Condition) -> f64 {
    match condition {
        Condition::Fog => 95.0,
        Condition::Pouring => 90.0,
        Condition::LightningRainy | Condition::Lightning => 85.0,
        Condition::Rainy => 80.0,
        Condition::Snowy => 75.0,
        Condition::Cloudy => 70.0,
        Condition::ClearNight | Condition::PartlyCloudyNight => 65.0,
        Condition::PartlyCloudy => 60.0,
        Condition::Windy => 55.0,
        Condition::Sunny => 50.0,
    }
}

/// Multiplier a condition applies to the current wind.
#[must_use]
pub(crate) fn condition_wind_factor(condition: Condition) -> f64 {
    match condition {
        Condition::Windy => 2.2,
        Condition::LightningRainy | Condition::Lightning => 1.6,
        Condition::Pouring => 1.4,
        Condition::Rainy => 1.3,
        Condition::Snowy => 1.1,
        Condition::Cloudy => 0.9,
        Condition::PartlyCloudy | Condition::PartlyCloudyNight => 0.95,
        Condition::Sunny | Condition::ClearNight => 0.8,
        Condition::Fog => 0.7,
    }
}

/// Canonical daily precipitation per condition, millimeters.
#[must_use]
pub(crate) fn canonical_precipitation_mm(condition: Condition) -> f64 {
    match condition {
        Condition::LightningRainy => 10.0,
        Condition::Pouring => 8.0,
        Condition::Snowy => 3.0,
        Condition::Rainy => 2.0,
        Condition::Cloudy => 0.3,
        Condition::Fog => 0.1,
        _ => 0.0,
    }
}
