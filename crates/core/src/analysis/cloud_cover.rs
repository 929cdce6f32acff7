//! Cloud-cover estimation from solar sensors
//!
//! Fuses solar radiation (primary), illuminance (secondary), and UV index
//! (tertiary) into a cloud-cover percentage.
//!
//! Above 15° solar elevation the analyzer works in the *relative* regime:
//! each channel is normalized against its astronomically derived clear-sky
//! expectation. Below 15°, or when every channel reads low, the relative
//! ratios are unreliable and a graded *absolute* fallback table applies.
//!
//! Four adjustments follow, in order: the user luminance multiplier
//! (applied to the raw readings, faded out toward the zenith), a pressure
//! trend nudge (falling pressure means building cloud), a historical
//! clear-sky bias (recent persistent clear weather argues against a
//! sudden overcast reading from a degraded sensor), and an inter-update
//! truncation that disallows jumps larger than 30 points.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::pressure_wind::PressureSystem;
use crate::atmosphere::solar::SolarContext;
use crate::core_types::constants::{
    CloudCoverThresholds, HysteresisThresholds, PressureThresholds, SolarThresholds,
    DEFAULT_ZENITH_MAX_WM2, ZENITH_MAX_RANGE,
};
use crate::core_types::units::INHG_TO_HPA;
use crate::error::Warning;

/// Which estimation regime produced the raw percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudRegime {
    /// Astronomically normalized channel ratios
    Relative,
    /// Graded absolute table for low sun or low light
    AbsoluteFallback,
}

/// Inputs to the cloud-cover analyzer, canonical units.
#[derive(Debug, Clone, Copy)]
pub struct CloudInputs<'a> {
    /// Moving-averaged solar radiation, W/m²
    pub solar_avg_wm2: f64,
    pub lux: f64,
    pub uv_index: f64,
    pub solar: &'a SolarContext,
    /// Configured zenith maximum; validated against the calibration band
    pub zenith_max_wm2: f64,
    /// User luminance multiplier, clamped to [0.1, 5.0]
    pub luminance_multiplier: f64,
    /// 3-hour pressure slope, inHg per hour
    pub pressure_trend_3h: Option<f64>,
    pub pressure_system: PressureSystem,
    /// Fraction of the last 6 h classified sunny / clear-night
    pub clear_fraction_6h: Option<f64>,
    /// True when solar inputs are estimated or substituted
    pub solar_degraded: bool,
    /// Hour of day from the snapshot timestamp
    pub hour_of_day: u32,
    /// Cloud cover emitted for the previous observation
    pub previous_cloud_pct: Option<f64>,
}

/// Cloud-cover analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudAnalysis {
    /// Final cloud cover after all adjustments and truncation, [0, 100]
    pub cloud_cover_pct: f64,
    /// Pre-truncation value; the hysteresis filter inspects the raw jump
    pub raw_pct: f64,
    /// Raw change against the previous observation
    pub raw_delta: Option<f64>,
    /// Clear-sky irradiance the measurement was normalized against
    pub expected_clear_sky_wm2: f64,
    pub regime: CloudRegime,
    /// Calibration warning when the configured zenith max was out of band
    pub warning: Option<Warning>,
}

/// Run the cloud-cover analysis.
#[must_use]
pub fn analyze_cloud_cover(inputs: &CloudInputs<'_>) -> CloudAnalysis {
    // Calibration guard on the configured zenith maximum
    let (zenith_max, warning) = validate_zenith_max(inputs.zenith_max_wm2);

    // Adjustment 1: luminance multiplier, faded out as the sun climbs
    let multiplier = effective_luminance_multiplier(
        inputs.luminance_multiplier,
        inputs.solar.elevation_deg,
    );
    let radiation = inputs.solar_avg_wm2 * multiplier;
    let lux = inputs.lux * multiplier;
    let uv = inputs.uv_index;

    let expected = inputs.solar.expected_irradiance(zenith_max).max(50.0);

    let low_light = radiation < 200.0 && lux < 20_000.0 && uv < 1.0;
    let relative_ok =
        inputs.solar.elevation_deg >= SolarThresholds::RELATIVE_REGIME_MIN_ELEVATION && !low_light;

    let (raw, regime) = if relative_ok {
        (
            relative_cloud_cover(radiation, lux, uv, expected),
            CloudRegime::Relative,
        )
    } else {
        (
            absolute_fallback(radiation, lux, uv),
            CloudRegime::AbsoluteFallback,
        )
    };
    debug!(regime = ?regime, raw, "cloud cover regime selected");

    // Adjustment 2: pressure-trend nudge
    let mut adjusted = raw + pressure_nudge(inputs.pressure_trend_3h);

    // Adjustment 3: historical clear-sky bias, only when the estimate is
    // already indirect (fallback regime or degraded solar data)
    if regime == CloudRegime::AbsoluteFallback || inputs.solar_degraded {
        adjusted -= clear_sky_bias(
            inputs.clear_fraction_6h,
            inputs.pressure_system,
            inputs.pressure_trend_3h,
            inputs.hour_of_day,
        );
    }

    let raw_pct = adjusted.clamp(0.0, 100.0);
    let raw_delta = inputs.previous_cloud_pct.map(|prev| raw_pct - prev);

    // Adjustment 4: inter-update truncation
    let cloud_cover_pct = match inputs.previous_cloud_pct {
        Some(prev) => {
            let delta = (raw_pct - prev).clamp(
                -HysteresisThresholds::MAX_CLOUD_DELTA,
                HysteresisThresholds::MAX_CLOUD_DELTA,
            );
            (prev + delta).clamp(0.0, 100.0)
        }
        None => raw_pct,
    };

    CloudAnalysis {
        cloud_cover_pct,
        raw_pct,
        raw_delta,
        expected_clear_sky_wm2: expected,
        regime,
        warning,
    }
}

fn validate_zenith_max(configured: f64) -> (f64, Option<Warning>) {
    let (lo, hi) = ZENITH_MAX_RANGE;
    if (lo..=hi).contains(&configured) {
        (configured, None)
    } else {
        warn!(
            configured,
            fallback = DEFAULT_ZENITH_MAX_WM2,
            "zenith max radiation outside calibration band"
        );
        (
            DEFAULT_ZENITH_MAX_WM2,
            Some(Warning::Calibration {
                field: "zenith_max_radiation_wm2".into(),
                substituted: DEFAULT_ZENITH_MAX_WM2,
            }),
        )
    }
}

/// The user multiplier corrects sensor siting (shade, tinted dome). The
/// correction matters most with the sun low and not at all overhead, so it
/// fades linearly with elevation.
fn effective_luminance_multiplier(multiplier: f64, elevation_deg: f64) -> f64 {
    let clamped = multiplier.clamp(0.1, 5.0);
    let elevation_factor = (1.0 - elevation_deg / 90.0).max(0.0);
    1.0 + (clamped - 1.0) * elevation_factor
}

fn relative_cloud_cover(radiation: f64, lux: f64, uv: f64, expected: f64) -> f64 {
    let cloud_solar = (100.0 - 100.0 * radiation / expected).clamp(0.0, 100.0);
    let cloud_lux =
        (100.0 - 100.0 * lux / CloudCoverThresholds::LUX_CLEAR_SKY).clamp(0.0, 100.0);
    let cloud_uv = (100.0 - 100.0 * uv / CloudCoverThresholds::UV_CLEAR_SKY).clamp(0.0, 100.0);

    if radiation >= 10.0 {
        if lux > 0.0 && uv > 0.0 {
            0.80 * cloud_solar + 0.15 * cloud_lux + 0.05 * cloud_uv
        } else if lux > 0.0 {
            0.85 * cloud_solar + 0.15 * cloud_lux
        } else if uv > 0.0 {
            0.90 * cloud_solar + 0.10 * cloud_uv
        } else {
            cloud_solar
        }
    } else if lux >= 1000.0 {
        if uv > 0.0 {
            0.9 * cloud_lux + 0.1 * cloud_uv
        } else {
            cloud_lux
        }
    } else if uv > 0.0 {
        cloud_uv
    } else {
        CloudCoverThresholds::NEUTRAL
    }
}

/// Graded absolute table for the low-light regime. All channels dim means
/// heavy overcast; progressively brighter readings walk the estimate down.
fn absolute_fallback(radiation: f64, lux: f64, uv: f64) -> f64 {
    if radiation < 50.0 && lux < 5000.0 && uv == 0.0 {
        CloudCoverThresholds::FALLBACK_HEAVY_OVERCAST
    } else if radiation < 100.0 && lux < 10_000.0 {
        CloudCoverThresholds::FALLBACK_MOSTLY_CLOUDY
    } else if radiation < 200.0 && lux < 20_000.0 && uv < 1.0 {
        CloudCoverThresholds::FALLBACK_PARTLY_CLOUDY
    } else {
        // Bright sensors under a low sun: the ratios are untrustworthy,
        // report neutral
        CloudCoverThresholds::NEUTRAL
    }
}

/// Falling 3-hour pressure adds up to +10 cloud points, rising subtracts
/// up to 10. Scaled at 5 points per hPa of 3-hour change.
fn pressure_nudge(trend_3h_inhg_per_hour: Option<f64>) -> f64 {
    let Some(slope) = trend_3h_inhg_per_hour else {
        return 0.0;
    };
    let change_hpa_3h = slope * 3.0 * INHG_TO_HPA;
    (-change_hpa_3h * PressureThresholds::CLOUD_NUDGE_PER_HPA).clamp(
        -PressureThresholds::CLOUD_NUDGE_CAP,
        PressureThresholds::CLOUD_NUDGE_CAP,
    )
}

/// Bias toward clear skies when the recent past was persistently clear and
/// the pressure situation supports it. Mornings damp the bias: radiation
/// fog and overnight stratus legitimately cloud a station that was clear
/// all yesterday.
fn clear_sky_bias(
    clear_fraction_6h: Option<f64>,
    system: PressureSystem,
    trend_3h: Option<f64>,
    hour_of_day: u32,
) -> f64 {
    let Some(clear_fraction) = clear_fraction_6h else {
        return 0.0;
    };

    let high_pressure_boost = if system.is_high() { 0.2 } else { 0.0 };
    let rising_trend_boost = if trend_3h.is_some_and(|t| t > 0.01) {
        0.15
    } else {
        0.0
    };

    let mut strength = (clear_fraction + high_pressure_boost + rising_trend_boost).clamp(0.0, 1.0);

    let is_morning = (6..10).contains(&hour_of_day);
    if is_morning {
        strength = strength.min((strength / 2.0).max(0.5));
    }

    if strength > 0.7 {
        50.0 * strength
    } else if strength > 0.5 {
        30.0 * strength
    } else {
        0.0
    }
}
