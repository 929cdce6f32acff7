//! Pressure-system and wind analysis
//!
//! Classifies the sea-level pressure into system bands, extracts the
//! short- and long-horizon pressure trends, scores storm probability as a
//! saturating point sum, and grades wind and gust behavior on the
//! Beaufort-derived thresholds.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::atmosphere::altitude::PressureBands;
use crate::core_types::constants::{PressureThresholds, WindThresholds};
use crate::trends::{TrendField, TrendsStore, WindDirectionSummary};

/// Pressure system classification, most severe band first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureSystem {
    VeryHigh,
    High,
    Normal,
    Low,
    VeryLow,
    ExtremelyLow,
}

impl PressureSystem {
    /// Classify a sea-level pressure against (altitude-shifted) bands.
    /// Intervals are half-open; the low side wins over the high side.
    #[must_use]
    pub fn classify(pressure_inhg: f64, bands: &PressureBands) -> Self {
        if pressure_inhg < bands.extremely_low {
            PressureSystem::ExtremelyLow
        } else if pressure_inhg < bands.very_low {
            PressureSystem::VeryLow
        } else if pressure_inhg < bands.low {
            PressureSystem::Low
        } else if pressure_inhg > bands.very_high {
            PressureSystem::VeryHigh
        } else if pressure_inhg > bands.high {
            PressureSystem::High
        } else {
            PressureSystem::Normal
        }
    }

    /// Any of the low-side bands.
    #[must_use]
    pub fn is_low(self) -> bool {
        matches!(
            self,
            PressureSystem::Low | PressureSystem::VeryLow | PressureSystem::ExtremelyLow
        )
    }

    /// Any of the high-side bands.
    #[must_use]
    pub fn is_high(self) -> bool {
        matches!(self, PressureSystem::High | PressureSystem::VeryHigh)
    }
}

/// Sustained wind classification.
///
/// `Light` spans light air through moderate breeze; the classifier ladder
/// applies its own finer-grained predicates where it needs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindClass {
    Calm,
    Light,
    Strong,
    Gale,
}

impl WindClass {
    /// Classify a sustained wind speed in mph.
    #[must_use]
    pub fn classify(wind_mph: f64) -> Self {
        if wind_mph < WindThresholds::CALM {
            WindClass::Calm
        } else if wind_mph < WindThresholds::STRONG {
            WindClass::Light
        } else if wind_mph < WindThresholds::GALE {
            WindClass::Strong
        } else {
            WindClass::Gale
        }
    }
}

/// Gust turbulence classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GustClass {
    None,
    Gusty,
    VeryGusty,
    SevereTurbulence,
}

/// Gust behavior for one observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GustAnalysis {
    /// Gust / sustained ratio, division guarded at 1 mph
    pub factor: f64,
    pub is_gusty: bool,
    pub is_very_gusty: bool,
    pub is_severe_turbulence: bool,
    pub class: GustClass,
}

impl GustAnalysis {
    /// Analyze gusts for a sustained speed and gust speed in mph.
    #[must_use]
    pub fn analyze(wind_mph: f64, gust_mph: f64) -> Self {
        let factor = gust_mph / wind_mph.max(WindThresholds::SPEED_EPSILON);

        let is_gusty = factor > WindThresholds::GUST_FACTOR_MODERATE
            && gust_mph > WindThresholds::GUST_MODERATE;
        let is_very_gusty =
            factor > WindThresholds::GUST_FACTOR_STRONG && gust_mph > WindThresholds::GUST_STRONG;
        let is_severe_turbulence = (factor > WindThresholds::GUST_FACTOR_SEVERE
            && gust_mph > WindThresholds::GUST_SEVERE)
            || gust_mph > WindThresholds::GUST_EXTREME;

        let class = if is_severe_turbulence {
            GustClass::SevereTurbulence
        } else if is_very_gusty {
            GustClass::VeryGusty
        } else if is_gusty {
            GustClass::Gusty
        } else {
            GustClass::None
        };

        Self {
            factor,
            is_gusty,
            is_very_gusty,
            is_severe_turbulence,
            class,
        }
    }
}

/// Storm severity grading on the 0-100 probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StormSeverity {
    None,
    Elevated,
    Severe,
}

impl StormSeverity {
    /// Grade a storm probability.
    #[must_use]
    pub fn classify(probability: f64) -> Self {
        if probability >= PressureThresholds::SEVERE_STORM {
            StormSeverity::Severe
        } else if probability >= PressureThresholds::ELEVATED_STORM {
            StormSeverity::Elevated
        } else {
            StormSeverity::None
        }
    }
}

/// Combined pressure and wind analysis for one observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureWindAnalysis {
    pub sea_level_pressure_inhg: f64,
    pub system: PressureSystem,
    /// 3-hour pressure slope, inHg per hour (None: insufficient history)
    pub trend_3h_inhg_per_hour: Option<f64>,
    /// 24-hour pressure slope, inHg per hour
    pub trend_24h_inhg_per_hour: Option<f64>,
    /// Storm probability in [0, 100]
    pub storm_probability: f64,
    pub storm_severity: StormSeverity,
    pub wind_class: WindClass,
    pub gust: GustAnalysis,
    /// Circular wind-direction statistics, when enough history exists
    pub wind_direction: Option<WindDirectionSummary>,
}

impl PressureWindAnalysis {
    /// Run the full analysis against the history store.
    #[must_use]
    pub fn analyze(
        sea_level_pressure_inhg: f64,
        wind_mph: f64,
        gust_mph: f64,
        bands: &PressureBands,
        store: &TrendsStore,
        now: DateTime<Utc>,
    ) -> Self {
        let system = PressureSystem::classify(sea_level_pressure_inhg, bands);
        let gust = GustAnalysis::analyze(wind_mph, gust_mph);

        let trend_3h = store
            .trend(TrendField::Pressure, now, Duration::hours(3))
            .map(|t| t.slope_per_hour);
        let trend_24h = store
            .trend(TrendField::Pressure, now, Duration::hours(24))
            .map(|t| t.slope_per_hour);
        let wind_direction = store.wind_direction(now, Duration::hours(24));

        let sustained_hours = store
            .pressure_below_since(now, Duration::hours(24), bands.very_low)
            .map(|since| (now - since).num_seconds() as f64 / 3600.0)
            .unwrap_or(0.0);

        let storm_probability = storm_probability(
            sea_level_pressure_inhg,
            bands,
            trend_3h,
            trend_24h,
            gust.factor,
            sustained_hours,
            wind_direction.as_ref(),
            system,
        );

        Self {
            sea_level_pressure_inhg,
            system,
            trend_3h_inhg_per_hour: trend_3h,
            trend_24h_inhg_per_hour: trend_24h,
            storm_probability,
            storm_severity: StormSeverity::classify(storm_probability),
            wind_class: WindClass::classify(wind_mph),
            gust,
            wind_direction,
        }
    }
}

/// Storm probability as a saturating point sum.
///
/// Falling pressure earns points proportional to the slope; the deep
/// pressure bands, turbulent gusts, sustained sub-storm pressure, and wind
/// direction instability add flat awards. Clamped to [0, 100].
#[allow(clippy::too_many_arguments)]
#[must_use]
pub fn storm_probability(
    pressure_inhg: f64,
    bands: &PressureBands,
    trend_3h: Option<f64>,
    trend_24h: Option<f64>,
    gust_factor: f64,
    sustained_low_hours: f64,
    wind_direction: Option<&WindDirectionSummary>,
    system: PressureSystem,
) -> f64 {
    let mut points = 0.0;

    if let Some(slope) = trend_3h {
        if slope < 0.0 {
            let units = -slope / 0.01;
            points += (units * PressureThresholds::STORM_PTS_PER_UNIT_3H)
                .min(PressureThresholds::STORM_CAP_3H);
        }
    }

    if let Some(slope) = trend_24h {
        if slope < 0.0 {
            let units = -slope / 0.01;
            points += (units * PressureThresholds::STORM_PTS_PER_UNIT_24H)
                .min(PressureThresholds::STORM_CAP_24H);
        }
    }

    if pressure_inhg < bands.very_low {
        points += PressureThresholds::STORM_PTS_VERY_LOW;
    }
    if pressure_inhg < bands.extremely_low {
        points += PressureThresholds::STORM_PTS_EXTREMELY_LOW;
    }

    if gust_factor > WindThresholds::GUST_FACTOR_STRONG {
        points += PressureThresholds::STORM_PTS_GUSTY;
    }

    points += (sustained_low_hours * PressureThresholds::STORM_PTS_PER_SUSTAINED_HOUR)
        .min(PressureThresholds::STORM_CAP_SUSTAINED);

    if let Some(dir) = wind_direction {
        if dir.significant_shift {
            points += PressureThresholds::STORM_PTS_DIRECTION_SHIFT;
        }
        let falling = trend_3h.is_some_and(|t| t < -0.01) || trend_24h.is_some_and(|t| t < -0.004);
        if dir.change_rate_deg_per_hour > 30.0 && falling {
            points += PressureThresholds::STORM_PTS_RAPID_VEER;
        }
        if dir.stability < 0.3 && system.is_low() {
            points += PressureThresholds::STORM_PTS_UNSTABLE_LOW;
        }
    }

    points.clamp(0.0, 100.0)
}
