//! Altitude correction via the barometric formula
//!
//! Converts station pressure to its sea-level equivalent and shifts the
//! pressure classification bands so a mountain station classifies the same
//! weather as a coastal one.
//!
//! ```text
//! P0 = P * (1 - L*h/T0)^(-g*M / (R*L))
//! ```
//!
//! with the ICAO standard atmosphere constants below.

use crate::core_types::constants::PressureThresholds;
use crate::core_types::units::INHG_TO_HPA;

/// Temperature lapse rate (K/m)
const LAPSE_RATE: f64 = 0.0065;
/// Standard sea-level temperature (K)
const SEA_LEVEL_TEMP: f64 = 288.15;
/// Gravitational acceleration (m/s²)
const GRAVITY: f64 = 9.80665;
/// Molar mass of dry air (kg/mol)
const MOLAR_MASS: f64 = 0.0289644;
/// Universal gas constant (J/(mol·K))
const GAS_CONSTANT: f64 = 8.31432;

fn barometric_exponent() -> f64 {
    (GRAVITY * MOLAR_MASS) / (GAS_CONSTANT * LAPSE_RATE)
}

/// Convert station pressure (inHg) to the sea-level equivalent.
///
/// `altitude_m <= 0` returns the input unchanged; zero means "do not
/// correct". The formula's `(1 - L*h/T0)` base stays positive for every
/// real-world altitude (it reaches zero at ~44 km).
#[must_use]
pub fn station_to_sea_level(pressure_inhg: f64, altitude_m: f64) -> f64 {
    if altitude_m <= 0.0 {
        return pressure_inhg;
    }

    let base = 1.0 - (LAPSE_RATE * altitude_m) / SEA_LEVEL_TEMP;
    if base <= 0.0 {
        return pressure_inhg;
    }

    pressure_inhg * base.powf(-barometric_exponent())
}

/// Inverse of [`station_to_sea_level`]: the pressure a station at
/// `altitude_m` would read for the given sea-level pressure.
#[must_use]
pub fn sea_level_to_station(pressure_inhg: f64, altitude_m: f64) -> f64 {
    if altitude_m <= 0.0 {
        return pressure_inhg;
    }

    let base = 1.0 - (LAPSE_RATE * altitude_m) / SEA_LEVEL_TEMP;
    if base <= 0.0 {
        return pressure_inhg;
    }

    pressure_inhg * base.powf(barometric_exponent())
}

/// Pressure classification thresholds (inHg), optionally shifted for a
/// station altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureBands {
    pub extremely_low: f64,
    pub very_low: f64,
    pub low: f64,
    pub high: f64,
    pub very_high: f64,
}

impl PressureBands {
    /// The sea-level reference bands.
    #[must_use]
    pub fn sea_level() -> Self {
        Self {
            extremely_low: PressureThresholds::EXTREMELY_LOW,
            very_low: PressureThresholds::VERY_LOW,
            low: PressureThresholds::LOW,
            high: PressureThresholds::HIGH,
            very_high: PressureThresholds::VERY_HIGH,
        }
    }

    /// Bands shifted for a station at `altitude_m`.
    ///
    /// Pressure drops roughly 1 hPa per 8 m of elevation, so each band
    /// moves down by that amount. An altitude of zero (or below) returns
    /// the sea-level bands.
    #[must_use]
    pub fn at_altitude(altitude_m: f64) -> Self {
        let base = Self::sea_level();
        if altitude_m <= 0.0 {
            return base;
        }

        let shift_inhg = (altitude_m * PressureThresholds::HPA_PER_METER) / INHG_TO_HPA;
        Self {
            extremely_low: base.extremely_low - shift_inhg,
            very_low: base.very_low - shift_inhg,
            low: base.low - shift_inhg,
            high: base.high - shift_inhg,
            very_high: base.very_high - shift_inhg,
        }
    }
}
