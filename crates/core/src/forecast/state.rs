//! Meteorological state bundle for the forecast engine
//!
//! A one-shot analysis of everything the projections need: pressure
//! trends, atmospheric stability, moisture transport, wind patterns, and a
//! coarse classification of the weather system currently overhead.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::pressure_wind::PressureWindAnalysis;
use crate::core_types::condition::Condition;
use crate::core_types::constants::TemperatureThresholds;
use crate::core_types::units::INHG_TO_HPA;
use crate::trends::{TrendField, TrendsStore};

/// Current observed values the projections anchor to, canonical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastBasis {
    pub timestamp: DateTime<Utc>,
    pub condition: Condition,
    pub temp_f: f64,
    pub humidity_pct: f64,
    pub wind_mph: f64,
    pub wind_bearing_deg: Option<f64>,
    pub dewpoint_f: f64,
    pub cloud_cover_pct: f64,
    pub rain_rate_inh: f64,
    pub is_daytime: bool,
}

impl ForecastBasis {
    /// Temperature minus dewpoint, °F.
    #[must_use]
    pub fn spread_f(&self) -> f64 {
        self.temp_f - self.dewpoint_f
    }
}

/// Moisture availability and transport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoistureAnalysis {
    /// Nearness to saturation in [0, 1] from the dewpoint spread
    pub condensation_potential: f64,
    /// Transport proxy in [0, 1] from wind-direction steadiness
    pub transport_potential: f64,
    /// Humidity trend, percent per hour (0 when history is short)
    pub humidity_trend_per_hour: f64,
}

impl MoistureAnalysis {
    /// Combined multiplier applied to precipitation amounts.
    #[must_use]
    pub fn factor(&self) -> f64 {
        1.0 + self.transport_potential * self.condensation_potential
    }
}

/// Wind pattern diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindPattern {
    /// Direction steadiness in [0, 1]
    pub direction_stability: f64,
    pub gust_factor: f64,
    /// Pressure-gradient wind proxy, mph-scale
    pub gradient_wind_effect: f64,
}

/// Coarse classification of the system overhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherSystemKind {
    StableHigh,
    ActiveLow,
    FrontalSystem,
    AirMassChange,
    Transitional,
}

/// The complete state bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteoState {
    pub pressure: PressureWindAnalysis,
    /// Atmospheric stability index in [0, 1]; higher persists
    pub stability: f64,
    pub system: WeatherSystemKind,
    pub moisture: MoistureAnalysis,
    pub wind: WindPattern,
    /// Temperature volatility (°F sample stddev over 24 h)
    pub temp_volatility: f64,
    /// Temperature trend, °F per hour
    pub temp_trend_per_hour: f64,
}

impl MeteoState {
    /// Derive the bundle from the current basis and history.
    #[must_use]
    pub fn derive(
        basis: &ForecastBasis,
        pressure: &PressureWindAnalysis,
        store: &TrendsStore,
        now: DateTime<Utc>,
    ) -> Self {
        let temp = store.trend(TrendField::Temperature, now, Duration::hours(24));
        let humidity = store.trend(TrendField::Humidity, now, Duration::hours(24));

        let stability = stability_index(
            pressure.trend_24h_inhg_per_hour,
            basis.wind_mph,
            basis.humidity_pct,
        );

        let direction_stability = pressure
            .wind_direction
            .map_or(0.5, |summary| summary.stability);

        let condensation_potential = condensation_potential(basis.spread_f());
        let moisture = MoistureAnalysis {
            condensation_potential,
            transport_potential: direction_stability,
            humidity_trend_per_hour: humidity.map_or(0.0, |t| t.slope_per_hour),
        };

        let gradient_wind_effect = pressure
            .trend_3h_inhg_per_hour
            .map_or(0.0, |slope| (slope * 3.0 * INHG_TO_HPA).abs() * 2.0);

        let wind = WindPattern {
            direction_stability,
            gust_factor: pressure.gust.factor,
            gradient_wind_effect,
        };

        let temp_trend_per_hour = temp.map_or(0.0, |t| t.slope_per_hour);
        let system = classify_system(
            pressure,
            stability,
            direction_stability,
            temp_trend_per_hour,
        );

        Self {
            pressure: pressure.clone(),
            stability,
            system,
            moisture,
            wind,
            temp_volatility: temp.map_or(2.0, |t| t.volatility),
            temp_trend_per_hour,
        }
    }

    /// 3-hour pressure change in hPa (0 with no history).
    #[must_use]
    pub fn trend_3h_hpa(&self) -> f64 {
        self.pressure
            .trend_3h_inhg_per_hour
            .map_or(0.0, |slope| slope * 3.0 * INHG_TO_HPA)
    }

    /// 24-hour pressure change in hPa (0 with no history).
    #[must_use]
    pub fn trend_24h_hpa(&self) -> f64 {
        self.pressure
            .trend_24h_inhg_per_hour
            .map_or(0.0, |slope| slope * 24.0 * INHG_TO_HPA)
    }
}

/// Atmospheric stability in [0, 1]: 0.5 baseline, nudged by how fast the
/// pressure is moving, how hard the wind mixes the boundary layer, and how
/// moist the column is.
#[must_use]
pub fn stability_index(
    trend_24h_inhg_per_hour: Option<f64>,
    wind_mph: f64,
    humidity_pct: f64,
) -> f64 {
    let mut stability: f64 = 0.5;

    let change_24h_hpa = trend_24h_inhg_per_hour.map_or(0.0, |s| s * 24.0 * INHG_TO_HPA);
    if change_24h_hpa.abs() < 2.0 {
        stability += 0.2;
    }

    if wind_mph < 5.0 {
        stability += 0.15;
    } else if wind_mph > 15.0 {
        stability -= 0.15;
    }

    if humidity_pct > 70.0 {
        stability += 0.1;
    }

    stability.clamp(0.0, 1.0)
}

/// Nearness to saturation from the dewpoint spread.
#[must_use]
pub fn condensation_potential(spread_f: f64) -> f64 {
    if spread_f < TemperatureThresholds::SPREAD_SATURATED {
        0.8
    } else if spread_f < TemperatureThresholds::SPREAD_MODERATE {
        0.5
    } else {
        0.2
    }
}

fn classify_system(
    pressure: &PressureWindAnalysis,
    stability: f64,
    direction_stability: f64,
    temp_trend_per_hour: f64,
) -> WeatherSystemKind {
    if pressure.system.is_high() && stability > 0.7 {
        WeatherSystemKind::StableHigh
    } else if pressure.system.is_low() && stability < 0.3 {
        WeatherSystemKind::ActiveLow
    } else if direction_stability < 0.4 && pressure.storm_probability > 50.0 {
        WeatherSystemKind::FrontalSystem
    } else if (temp_trend_per_hour * 24.0).abs() > 2.0 && stability > 0.6 {
        WeatherSystemKind::AirMassChange
    } else {
        WeatherSystemKind::Transitional
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::pressure_wind::{GustAnalysis, PressureSystem, StormSeverity, WindClass};

    fn pressure_analysis(system: PressureSystem, storm: f64) -> PressureWindAnalysis {
        PressureWindAnalysis {
            sea_level_pressure_inhg: 29.92,
            system,
            trend_3h_inhg_per_hour: None,
            trend_24h_inhg_per_hour: None,
            storm_probability: storm,
            storm_severity: StormSeverity::classify(storm),
            wind_class: WindClass::Light,
            gust: GustAnalysis::analyze(5.0, 7.0),
            wind_direction: None,
        }
    }

    #[test]
    fn stability_baseline_and_adjustments() {
        // Calm, flat pressure, moist: 0.5 + 0.2 + 0.15 + 0.1 = 0.95
        let s = stability_index(None, 3.0, 80.0);
        assert!((s - 0.95).abs() < 1e-9);

        // Windy with a crashing barometer (-6 hPa over 24 h): 0.5 - 0.15
        let slope_inhg_per_hour = -6.0 / INHG_TO_HPA / 24.0;
        let s = stability_index(Some(slope_inhg_per_hour), 20.0, 50.0);
        assert!((s - 0.35).abs() < 1e-9);
    }

    #[test]
    fn stability_is_clamped() {
        for wind in [0.0, 10.0, 30.0] {
            for humidity in [10.0, 50.0, 95.0] {
                let s = stability_index(Some(-1.0), wind, humidity);
                assert!((0.0..=1.0).contains(&s));
            }
        }
    }

    #[test]
    fn condensation_bands() {
        assert_eq!(condensation_potential(2.0), 0.8);
        assert_eq!(condensation_potential(7.0), 0.5);
        assert_eq!(condensation_potential(18.0), 0.2);
    }

    #[test]
    fn high_pressure_with_stable_air_is_stable_high() {
        let p = pressure_analysis(PressureSystem::High, 0.0);
        let kind = classify_system(&p, 0.8, 0.9, 0.0);
        assert_eq!(kind, WeatherSystemKind::StableHigh);
    }

    #[test]
    fn veering_wind_with_storm_signal_is_frontal() {
        let p = pressure_analysis(PressureSystem::Normal, 60.0);
        let kind = classify_system(&p, 0.5, 0.2, 0.0);
        assert_eq!(kind, WeatherSystemKind::FrontalSystem);
    }

    #[test]
    fn default_is_transitional() {
        let p = pressure_analysis(PressureSystem::Normal, 10.0);
        let kind = classify_system(&p, 0.5, 0.6, 0.0);
        assert_eq!(kind, WeatherSystemKind::Transitional);
    }
}
