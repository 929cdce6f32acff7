//! Weather evolution trajectory
//!
//! The forecast walks a condition ladder
//! (sunny ↔ partly_cloudy ↔ cloudy ↔ rainy ↔ pouring) driven by a signed
//! trajectory score: falling pressure deteriorates (negative score, ladder
//! position climbs), rising pressure improves. Step size per hour tracks
//! the trend magnitude, and confidence decays as the short- and long-term
//! trends disagree and as the projection reaches further out.

use serde::{Deserialize, Serialize};

use crate::core_types::condition::Condition;
use crate::forecast::state::MeteoState;

/// Ladder positions run 0.0 (sunny) through 4.0 (pouring).
pub const LADDER_TOP: f64 = 4.0;

/// Trend magnitude above which conditions evolve rapidly:
/// 1 inHg per 24 h, expressed per hour.
pub const RAPID_TREND_INHG_PER_HOUR: f64 = 1.0 / 24.0;
/// Moderate-evolution trend threshold, inHg per hour.
pub const MODERATE_TREND_INHG_PER_HOUR: f64 = 0.01;

/// Tier advance per hour for each trend regime.
pub const STEP_RAPID: f64 = 0.5;
pub const STEP_MODERATE: f64 = 0.1;
pub const STEP_GRADUAL: f64 = 0.02;

/// Confidence penalty per inHg/h of 3 h / 24 h trend disagreement.
const CONFIDENCE_DISAGREEMENT_SCALE: f64 = 10.0;

/// Pressure-trend severity over the 3-hour horizon (hPa change).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSeverity {
    Stable,
    Slow,
    Moderate,
    Rapid,
}

impl TrendSeverity {
    /// Classify a 3-hour pressure change in hPa.
    #[must_use]
    pub fn classify(change_3h_hpa: f64) -> Self {
        let magnitude = change_3h_hpa.abs();
        if magnitude < 0.2 {
            TrendSeverity::Stable
        } else if magnitude < 0.5 {
            TrendSeverity::Slow
        } else if magnitude < 1.5 {
            TrendSeverity::Moderate
        } else {
            TrendSeverity::Rapid
        }
    }
}

/// The evolution model derived from a meteorological state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evolution {
    /// Signed score in [-100, 100]; negative deteriorates
    pub trajectory_score: f64,
    /// Ladder tiers per hour
    pub step_per_hour: f64,
    /// Confidence in [0, 1] before distance decay
    pub base_confidence: f64,
    /// 3-hour trend severity for cadence decisions
    pub severity: TrendSeverity,
}

impl Evolution {
    /// Build the evolution model.
    #[must_use]
    pub fn from_state(state: &MeteoState) -> Self {
        let trend_3h = state.pressure.trend_3h_inhg_per_hour.unwrap_or(0.0);
        let trend_24h = state.pressure.trend_24h_inhg_per_hour.unwrap_or(0.0);
        let combined = 0.7 * trend_3h + 0.3 * trend_24h;

        // Unstable air amplifies whatever the pressure is doing
        let instability_gain = 1.0 + (1.0 - state.stability) * 0.5;
        let trajectory_score =
            (combined / RAPID_TREND_INHG_PER_HOUR * 100.0 * instability_gain).clamp(-100.0, 100.0);

        let magnitude = combined.abs();
        let step_per_hour = if magnitude > RAPID_TREND_INHG_PER_HOUR {
            STEP_RAPID
        } else if magnitude > MODERATE_TREND_INHG_PER_HOUR {
            STEP_MODERATE
        } else {
            STEP_GRADUAL
        };

        let base_confidence =
            (1.0 - (trend_3h - trend_24h).abs() * CONFIDENCE_DISAGREEMENT_SCALE).clamp(0.0, 1.0);

        Self {
            trajectory_score,
            step_per_hour,
            base_confidence,
            severity: TrendSeverity::classify(state.trend_3h_hpa()),
        }
    }

    /// Ladder position after `hours`, starting from `position`.
    #[must_use]
    pub fn advance(&self, position: f64, hours: f64) -> f64 {
        if self.trajectory_score.abs() < 1.0 {
            return position;
        }
        // Negative score climbs the ladder toward bad weather
        let direction = if self.trajectory_score < 0.0 { 1.0 } else { -1.0 };
        let weight = self.trajectory_score.abs() / 100.0;
        (position + direction * self.step_per_hour * weight * hours).clamp(0.0, LADDER_TOP)
    }

    /// Confidence for a projection `hours` out, decaying exponentially with
    /// distance (roughly halving per forecast day).
    #[must_use]
    pub fn confidence_at(&self, hours: f64) -> f64 {
        let distance_decay = (-0.5 * hours / 24.0).exp() * 0.95 + 0.05;
        (self.base_confidence * distance_decay).clamp(0.0, 1.0)
    }
}

/// Ladder position for a condition; conditions off the ladder map to the
/// nearest tier.
#[must_use]
pub fn ladder_position(condition: Condition) -> f64 {
    match condition {
        Condition::Sunny | Condition::ClearNight => 0.0,
        Condition::PartlyCloudy | Condition::PartlyCloudyNight | Condition::Windy => 1.0,
        Condition::Cloudy | Condition::Fog => 2.0,
        Condition::Rainy | Condition::Lightning => 3.0,
        Condition::Pouring | Condition::LightningRainy | Condition::Snowy => 4.0,
    }
}

/// Condition at a ladder position (daytime names; callers remap for
/// night).
#[must_use]
pub fn condition_at(position: f64) -> Condition {
    match position.round() as i64 {
        i64::MIN..=0 => Condition::Sunny,
        1 => Condition::PartlyCloudy,
        2 => Condition::Cloudy,
        3 => Condition::Rainy,
        _ => Condition::Pouring,
    }
}
