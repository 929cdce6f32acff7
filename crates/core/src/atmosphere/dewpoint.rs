//! Dewpoint calculation (Magnus-Tetens)
//!
//! The dewpoint is the temperature at which air saturates. The
//! Magnus-Tetens approximation is accurate to about ±0.4 °C over the
//! -40..50 °C range, which covers any surface station.

use crate::error::{CoreError, Warning};

/// Magnus coefficient a (dimensionless)
const MAGNUS_A: f64 = 17.27;
/// Magnus coefficient b (°C)
const MAGNUS_B: f64 = 237.7;

/// Compute the dewpoint in °F from temperature (°F) and relative humidity.
///
/// Humidity must lie in (0, 100]; zero or negative humidity has no defined
/// dewpoint and out-of-range values are a caller bug the pipeline rejects
/// up front.
pub fn dewpoint_f(temp_f: f64, humidity_pct: f64) -> Result<f64, CoreError> {
    if humidity_pct <= 0.0 || humidity_pct > 100.0 {
        return Err(CoreError::InvalidHumidity {
            value: humidity_pct,
        });
    }

    let temp_c = (temp_f - 32.0) * 5.0 / 9.0;
    let gamma = (MAGNUS_A * temp_c) / (MAGNUS_B + temp_c) + (humidity_pct / 100.0).ln();
    let dewpoint_c = (MAGNUS_B * gamma) / (MAGNUS_A - gamma);

    Ok(dewpoint_c * 9.0 / 5.0 + 32.0)
}

/// Resolve the dewpoint for an observation: an externally measured reading
/// wins over the computed value, but can never exceed the air temperature.
///
/// Returns the dewpoint in °F plus a warning when an external reading had
/// to be clamped.
pub fn resolve_dewpoint_f(
    temp_f: f64,
    humidity_pct: f64,
    external_dewpoint_f: Option<f64>,
) -> Result<(f64, Option<Warning>), CoreError> {
    match external_dewpoint_f {
        Some(external) if external > temp_f => Ok((temp_f, Some(Warning::DewpointClamped))),
        Some(external) => Ok((external, None)),
        None => Ok((dewpoint_f(temp_f, humidity_pct)?, None)),
    }
}
