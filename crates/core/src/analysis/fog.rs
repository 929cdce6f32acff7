//! Fog scoring
//!
//! A weighted additive score over five factors: humidity, dewpoint spread,
//! wind, solar radiation, and an evaporation bonus. Fog needs
//! near-saturated air, so nothing scores at all below 88% humidity; during
//! the day, radiation anywhere near the clear-sky expectation rules fog
//! out regardless of the other factors.

use serde::{Deserialize, Serialize};

use crate::core_types::constants::FogThresholds;

/// Fog classification bands on the 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FogClass {
    None,
    Light,
    Moderate,
    Dense,
}

/// Fog analysis result for one observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FogAnalysis {
    /// Additive score, clamped to [0, 100]
    pub score: i32,
    pub class: FogClass,
}

impl FogAnalysis {
    /// No fog.
    #[must_use]
    pub fn none() -> Self {
        Self {
            score: 0,
            class: FogClass::None,
        }
    }

    /// True for any class other than `None`.
    #[must_use]
    pub fn is_foggy(&self) -> bool {
        self.class != FogClass::None
    }
}

/// Inputs to the fog scorer, all in canonical analysis units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FogInputs {
    pub temp_f: f64,
    pub humidity_pct: f64,
    /// Temperature minus dewpoint, °F
    pub spread_f: f64,
    pub wind_mph: f64,
    pub solar_wm2: f64,
    /// Theoretical clear-sky irradiance for the daytime sanity check
    pub expected_clear_sky_wm2: f64,
    pub is_daytime: bool,
}

/// Score fog likelihood for one observation.
#[must_use]
pub fn score_fog(inputs: &FogInputs) -> FogAnalysis {
    // Fog requires near-saturation; below the floor nothing else matters.
    if inputs.humidity_pct < FogThresholds::HUMIDITY_FLOOR {
        return FogAnalysis::none();
    }

    // Daytime sanity check: real fog blocks the sun. Radiation above half
    // the clear-sky expectation means high humidity without fog.
    if inputs.is_daytime
        && inputs.expected_clear_sky_wm2 > 0.0
        && inputs.solar_wm2
            > FogThresholds::DAYTIME_CLEAR_SKY_FRACTION * inputs.expected_clear_sky_wm2
    {
        return FogAnalysis::none();
    }

    let mut score = humidity_factor(inputs.humidity_pct);
    score += spread_factor(inputs.spread_f);
    score += wind_factor(inputs.wind_mph);
    score += if inputs.is_daytime {
        solar_factor_day(inputs.solar_wm2)
    } else {
        solar_factor_night(inputs.solar_wm2)
    };

    // Evaporation fog bonus: warm saturated air over wet ground
    if inputs.temp_f > FogThresholds::EVAPORATION_TEMP
        && inputs.humidity_pct >= FogThresholds::EVAPORATION_HUMIDITY
        && inputs.spread_f <= FogThresholds::EVAPORATION_SPREAD
    {
        score += FogThresholds::SCORE_EVAPORATION;
    }

    let score = score.clamp(0, 100);
    FogAnalysis {
        score,
        class: classify(score, inputs.humidity_pct),
    }
}

fn humidity_factor(humidity_pct: f64) -> i32 {
    if humidity_pct >= FogThresholds::HUMIDITY_DENSE {
        FogThresholds::SCORE_HUMIDITY_DENSE
    } else if humidity_pct >= FogThresholds::HUMIDITY_PROBABLE {
        FogThresholds::SCORE_HUMIDITY_PROBABLE
    } else if humidity_pct >= FogThresholds::HUMIDITY_POSSIBLE {
        FogThresholds::SCORE_HUMIDITY_POSSIBLE
    } else {
        FogThresholds::SCORE_HUMIDITY_MARGINAL
    }
}

fn spread_factor(spread_f: f64) -> i32 {
    if spread_f <= FogThresholds::SPREAD_SATURATED {
        FogThresholds::SCORE_SPREAD_SATURATED
    } else if spread_f <= FogThresholds::SPREAD_VERY_CLOSE {
        FogThresholds::SCORE_SPREAD_VERY_CLOSE
    } else if spread_f <= FogThresholds::SPREAD_CLOSE {
        FogThresholds::SCORE_SPREAD_CLOSE
    } else if spread_f <= FogThresholds::SPREAD_MARGINAL {
        FogThresholds::SCORE_SPREAD_MARGINAL
    } else {
        0
    }
}

fn wind_factor(wind_mph: f64) -> i32 {
    if wind_mph <= FogThresholds::WIND_CALM {
        FogThresholds::SCORE_WIND_CALM
    } else if wind_mph <= FogThresholds::WIND_LIGHT {
        FogThresholds::SCORE_WIND_LIGHT
    } else if wind_mph <= FogThresholds::WIND_MODERATE {
        FogThresholds::SCORE_WIND_MODERATE
    } else {
        FogThresholds::PENALTY_WIND_STRONG
    }
}

fn solar_factor_day(solar_wm2: f64) -> i32 {
    if solar_wm2 < FogThresholds::SOLAR_VERY_LOW {
        FogThresholds::SCORE_SOLAR_DAY_DENSE
    } else if solar_wm2 < FogThresholds::SOLAR_LOW {
        FogThresholds::SCORE_SOLAR_DAY_MODERATE
    } else if solar_wm2 < FogThresholds::SOLAR_REDUCED {
        FogThresholds::SCORE_SOLAR_DAY_LIGHT
    } else {
        0
    }
}

fn solar_factor_night(solar_wm2: f64) -> i32 {
    if solar_wm2 <= FogThresholds::SOLAR_NIGHT_MINIMAL {
        FogThresholds::SCORE_SOLAR_NIGHT
    } else if solar_wm2 <= FogThresholds::SOLAR_NIGHT_TWILIGHT {
        FogThresholds::SCORE_SOLAR_NIGHT_TWILIGHT
    } else {
        FogThresholds::PENALTY_SOLAR_NIGHT
    }
}

fn classify(score: i32, humidity_pct: f64) -> FogClass {
    if score >= FogThresholds::THRESHOLD_DENSE {
        FogClass::Dense
    } else if score >= FogThresholds::THRESHOLD_MODERATE {
        FogClass::Moderate
    } else if score >= FogThresholds::THRESHOLD_LIGHT
        && humidity_pct >= FogThresholds::LIGHT_HUMIDITY_CONFIRM
    {
        FogClass::Light
    } else {
        FogClass::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn night_inputs() -> FogInputs {
        FogInputs {
            temp_f: 34.0,
            humidity_pct: 99.0,
            spread_f: 0.3,
            wind_mph: 1.0,
            solar_wm2: 0.0,
            expected_clear_sky_wm2: 0.0,
            is_daytime: false,
        }
    }

    #[test]
    fn dense_radiation_fog_scores_high() {
        // 40 (humidity) + 30 (spread) + 15 (wind) + 10 (night dark) = 95
        let analysis = score_fog(&night_inputs());
        assert_eq!(analysis.score, 95);
        assert_eq!(analysis.class, FogClass::Dense);
    }

    #[test]
    fn below_humidity_floor_scores_zero() {
        let mut inputs = night_inputs();
        inputs.humidity_pct = 87.9;
        let analysis = score_fog(&inputs);
        assert_eq!(analysis.score, 0);
        assert_eq!(analysis.class, FogClass::None);
    }

    #[test]
    fn daytime_sunshine_vetoes_fog() {
        let inputs = FogInputs {
            temp_f: 60.0,
            humidity_pct: 99.0,
            spread_f: 0.5,
            wind_mph: 1.0,
            solar_wm2: 600.0,
            expected_clear_sky_wm2: 900.0,
            is_daytime: true,
        };
        assert_eq!(score_fog(&inputs).class, FogClass::None);
    }

    #[test]
    fn daytime_suppressed_sun_allows_fog() {
        let inputs = FogInputs {
            temp_f: 55.0,
            humidity_pct: 98.5,
            spread_f: 0.4,
            wind_mph: 2.0,
            solar_wm2: 40.0,
            expected_clear_sky_wm2: 800.0,
            is_daytime: true,
        };
        let analysis = score_fog(&inputs);
        // 40 + 30 + 15 + 15 = 100
        assert_eq!(analysis.score, 100);
        assert_eq!(analysis.class, FogClass::Dense);
    }

    #[test]
    fn strong_wind_disperses_marginal_fog() {
        let mut inputs = night_inputs();
        inputs.humidity_pct = 92.5;
        inputs.spread_f = 2.5;
        inputs.wind_mph = 12.0;
        // 20 + 5 - 10 + 10 = 25
        let analysis = score_fog(&inputs);
        assert_eq!(analysis.score, 25);
        assert_eq!(analysis.class, FogClass::None);
    }

    #[test]
    fn light_fog_needs_humidity_confirmation() {
        // Score in the light band but humidity below 95: no fog
        let mut inputs = night_inputs();
        inputs.humidity_pct = 93.0; // 20 points
        inputs.spread_f = 2.5; // 5
        inputs.wind_mph = 4.0; // 10, night darkness adds 10 → total 45
        let analysis = score_fog(&inputs);
        assert_eq!(analysis.score, 45);
        assert_eq!(analysis.class, FogClass::None);

        inputs.humidity_pct = 95.5; // 30 points → total 55 = moderate
        let analysis = score_fog(&inputs);
        assert_eq!(analysis.class, FogClass::Moderate);
    }

    #[test]
    fn humidity_monotonicity_within_bands() {
        // Raising humidity never lowers the score
        let mut last = 0;
        for humidity in [88.0, 90.0, 92.0, 94.0, 95.0, 97.0, 98.0, 99.5] {
            let mut inputs = night_inputs();
            inputs.humidity_pct = humidity;
            let score = score_fog(&inputs).score;
            assert!(
                score >= last,
                "score regressed at {humidity}%: {score} < {last}"
            );
            last = score;
        }
    }

    #[test]
    fn spread_monotonicity() {
        // Shrinking the spread never lowers the score
        let mut last = 0;
        for spread in [4.0, 3.0, 2.0, 1.0, 0.5, 0.1] {
            let mut inputs = night_inputs();
            inputs.spread_f = spread;
            let score = score_fog(&inputs).score;
            assert!(
                score >= last,
                "score regressed at spread {spread}: {score} < {last}"
            );
            last = score;
        }
    }

    #[test]
    fn evaporation_bonus_applies_when_warm() {
        let mut cold = night_inputs();
        cold.temp_f = 38.0;
        let mut warm = night_inputs();
        warm.temp_f = 45.0;
        assert_eq!(score_fog(&warm).score - score_fog(&cold).score, 5);
    }

    #[test]
    fn score_is_clamped_to_range() {
        // Strong wind + bright night: penalties cannot push below zero
        let inputs = FogInputs {
            temp_f: 50.0,
            humidity_pct: 88.5,
            spread_f: 5.0,
            wind_mph: 20.0,
            solar_wm2: 30.0,
            expected_clear_sky_wm2: 0.0,
            is_daytime: false,
        };
        let analysis = score_fog(&inputs);
        assert!(analysis.score >= 0);
    }
}
