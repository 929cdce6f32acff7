//! Sensor snapshot wire format and canonicalization
//!
//! A snapshot is a record of optional, unit-tagged readings. Each numeric
//! field carries its origin unit so stations reporting metric and imperial
//! mixes are handled uniformly: canonicalization converts everything to the
//! Imperial analysis units (°F, inHg, mph, in/h) and substitutes documented
//! defaults for absent optional sensors, emitting a degraded-sensor warning
//! per substitution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core_types::condition::RainState;
use crate::core_types::constants::{
    DEFAULT_HUMIDITY_PCT, DEFAULT_PRESSURE_INHG, DEFAULT_SOLAR_WM2, DEFAULT_WIND_MPH,
};
use crate::core_types::units::{
    Celsius, Feet, Hectopascals, KilometersPerHour, MetersPerSecond, MillimetersPerHour,
};
use crate::error::{CoreError, Warning};

/// Temperature units accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    Fahrenheit,
    Celsius,
}

/// Pressure units accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureUnit {
    InchesOfMercury,
    Hectopascals,
    Millibars,
}

/// Speed units accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    MilesPerHour,
    KilometersPerHour,
    MetersPerSecond,
}

/// Precipitation-rate units accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainRateUnit {
    InchesPerHour,
    MillimetersPerHour,
}

/// Length units accepted on the wire (station altitude).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    Meters,
    Feet,
}

/// A unit-tagged temperature reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub value: f64,
    pub unit: TemperatureUnit,
}

impl TemperatureReading {
    /// A reading already in °F.
    #[must_use]
    pub fn fahrenheit(value: f64) -> Self {
        Self {
            value,
            unit: TemperatureUnit::Fahrenheit,
        }
    }

    /// A reading in °C.
    #[must_use]
    pub fn celsius(value: f64) -> Self {
        Self {
            value,
            unit: TemperatureUnit::Celsius,
        }
    }

    /// Canonicalize to °F.
    #[must_use]
    pub fn as_fahrenheit(self) -> f64 {
        match self.unit {
            TemperatureUnit::Fahrenheit => self.value,
            TemperatureUnit::Celsius => Celsius(self.value).to_fahrenheit().value(),
        }
    }
}

/// A unit-tagged pressure reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureReading {
    pub value: f64,
    pub unit: PressureUnit,
}

impl PressureReading {
    /// A reading already in inHg.
    #[must_use]
    pub fn inhg(value: f64) -> Self {
        Self {
            value,
            unit: PressureUnit::InchesOfMercury,
        }
    }

    /// A reading in hPa.
    #[must_use]
    pub fn hpa(value: f64) -> Self {
        Self {
            value,
            unit: PressureUnit::Hectopascals,
        }
    }

    /// Canonicalize to inHg.
    #[must_use]
    pub fn as_inhg(self) -> f64 {
        match self.unit {
            PressureUnit::InchesOfMercury => self.value,
            PressureUnit::Hectopascals | PressureUnit::Millibars => {
                Hectopascals(self.value).to_inches_of_mercury().value()
            }
        }
    }
}

/// A unit-tagged speed reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedReading {
    pub value: f64,
    pub unit: SpeedUnit,
}

impl SpeedReading {
    /// A reading already in mph.
    #[must_use]
    pub fn mph(value: f64) -> Self {
        Self {
            value,
            unit: SpeedUnit::MilesPerHour,
        }
    }

    /// A reading in km/h.
    #[must_use]
    pub fn kmh(value: f64) -> Self {
        Self {
            value,
            unit: SpeedUnit::KilometersPerHour,
        }
    }

    /// A reading in m/s.
    #[must_use]
    pub fn mps(value: f64) -> Self {
        Self {
            value,
            unit: SpeedUnit::MetersPerSecond,
        }
    }

    /// Canonicalize to mph.
    #[must_use]
    pub fn as_mph(self) -> f64 {
        match self.unit {
            SpeedUnit::MilesPerHour => self.value,
            SpeedUnit::KilometersPerHour => KilometersPerHour(self.value).to_mph().value(),
            SpeedUnit::MetersPerSecond => MetersPerSecond(self.value).to_mph().value(),
        }
    }
}

/// A unit-tagged precipitation-rate reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RainRateReading {
    pub value: f64,
    pub unit: RainRateUnit,
}

impl RainRateReading {
    /// A reading already in in/h.
    #[must_use]
    pub fn inches_per_hour(value: f64) -> Self {
        Self {
            value,
            unit: RainRateUnit::InchesPerHour,
        }
    }

    /// A reading in mm/h.
    #[must_use]
    pub fn mm_per_hour(value: f64) -> Self {
        Self {
            value,
            unit: RainRateUnit::MillimetersPerHour,
        }
    }

    /// Canonicalize to in/h.
    #[must_use]
    pub fn as_inches_per_hour(self) -> f64 {
        match self.unit {
            RainRateUnit::InchesPerHour => self.value,
            RainRateUnit::MillimetersPerHour => {
                MillimetersPerHour(self.value).to_inches_per_hour().value()
            }
        }
    }
}

/// A unit-tagged length reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthReading {
    pub value: f64,
    pub unit: LengthUnit,
}

impl LengthReading {
    /// A reading already in meters.
    #[must_use]
    pub fn meters(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Meters,
        }
    }

    /// A reading in feet.
    #[must_use]
    pub fn feet(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Feet,
        }
    }

    /// Canonicalize to meters.
    #[must_use]
    pub fn as_meters(self) -> f64 {
        match self.unit {
            LengthUnit::Meters => self.value,
            LengthUnit::Feet => Feet(self.value).to_meters().value(),
        }
    }
}

/// A raw environmental sensor snapshot.
///
/// Only `outdoor_temp` is strictly required; `humidity` is required unless
/// an external `dewpoint` reading is supplied. Every other field degrades
/// gracefully when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    /// Observation time; drives all time reasoning in the core
    pub timestamp: DateTime<Utc>,
    /// Outdoor air temperature (required)
    pub outdoor_temp: Option<TemperatureReading>,
    /// Relative humidity, percent (required unless `dewpoint` is present)
    pub humidity: Option<f64>,
    /// Externally measured dewpoint
    pub dewpoint: Option<TemperatureReading>,
    /// Station (or sea-level) pressure
    pub pressure: Option<PressureReading>,
    /// True when `pressure` is already a sea-level value
    #[serde(default)]
    pub pressure_is_sea_level: bool,
    /// Sustained wind speed
    pub wind_speed: Option<SpeedReading>,
    /// Wind gust speed
    pub wind_gust: Option<SpeedReading>,
    /// Wind bearing in degrees (0 = north)
    pub wind_direction_deg: Option<f64>,
    /// Precipitation rate
    pub rain_rate: Option<RainRateReading>,
    /// Moisture contact state
    pub rain_state: Option<RainState>,
    /// Solar irradiance, W/m²
    pub solar_radiation_wm2: Option<f64>,
    /// Solar illuminance, lux
    pub solar_lux: Option<f64>,
    /// UV index
    pub uv_index: Option<f64>,
    /// Solar elevation above the horizon, degrees
    pub solar_elevation_deg: Option<f64>,
    /// Station altitude; overrides the configured altitude when present.
    /// Zero or negative means "do not correct".
    pub altitude: Option<LengthReading>,
}

impl SensorSnapshot {
    /// An empty snapshot at the given time; populate fields directly.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            outdoor_temp: None,
            humidity: None,
            dewpoint: None,
            pressure: None,
            pressure_is_sea_level: false,
            wind_speed: None,
            wind_gust: None,
            wind_direction_deg: None,
            rain_rate: None,
            rain_state: None,
            solar_radiation_wm2: None,
            solar_lux: None,
            uv_index: None,
            solar_elevation_deg: None,
            altitude: None,
        }
    }
}

/// A snapshot canonicalized to the Imperial analysis units, with defaults
/// substituted for missing optional sensors.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalObservation {
    pub timestamp: DateTime<Utc>,
    pub temp_f: f64,
    pub humidity_pct: f64,
    /// External dewpoint in °F, when supplied
    pub external_dewpoint_f: Option<f64>,
    pub pressure_inhg: f64,
    pub pressure_is_sea_level: bool,
    pub wind_mph: f64,
    pub gust_mph: f64,
    pub wind_direction_deg: Option<f64>,
    pub rain_rate_inh: f64,
    pub rain_state: RainState,
    pub solar_wm2: f64,
    pub lux: f64,
    pub uv_index: f64,
    /// Sensor-supplied solar elevation, degrees
    pub solar_elevation_deg: Option<f64>,
    /// Station altitude in meters (snapshot override or None)
    pub altitude_m: Option<f64>,
}

fn check_finite(field: &'static str, value: f64) -> Result<f64, CoreError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::InvalidRange { field, value })
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<f64, CoreError> {
    let value = check_finite(field, value)?;
    if value < 0.0 {
        return Err(CoreError::InvalidRange { field, value });
    }
    Ok(value)
}

impl SensorSnapshot {
    /// Canonicalize to the Imperial analysis units.
    ///
    /// Fails on missing required inputs, out-of-range humidity, and
    /// non-finite readings. Absent optional sensors substitute the
    /// documented defaults and append a degraded-sensor warning.
    pub fn canonicalize(&self) -> Result<(CanonicalObservation, Vec<Warning>), CoreError> {
        let mut warnings = Vec::new();

        let temp_f = match self.outdoor_temp {
            Some(reading) => check_finite("outdoor_temp", reading.as_fahrenheit())?,
            None => return Err(CoreError::InsufficientInput("outdoor_temp is required")),
        };

        let humidity_pct = match self.humidity {
            Some(h) => {
                let h = check_finite("humidity", h)?;
                if !(0.0..=100.0).contains(&h) {
                    return Err(CoreError::InvalidHumidity { value: h });
                }
                h
            }
            None if self.dewpoint.is_some() => {
                warnings.push(Warning::DegradedSensor {
                    sensor: "humidity".into(),
                });
                DEFAULT_HUMIDITY_PCT
            }
            None => {
                return Err(CoreError::InsufficientInput(
                    "humidity is required without an external dewpoint",
                ))
            }
        };

        let external_dewpoint_f = match self.dewpoint {
            Some(reading) => Some(check_finite("dewpoint", reading.as_fahrenheit())?),
            None => None,
        };

        let pressure_inhg = match self.pressure {
            Some(reading) => check_non_negative("pressure", reading.as_inhg())?,
            None => {
                warnings.push(Warning::DegradedSensor {
                    sensor: "pressure".into(),
                });
                DEFAULT_PRESSURE_INHG
            }
        };

        let wind_mph = match self.wind_speed {
            Some(reading) => check_non_negative("wind_speed", reading.as_mph())?,
            None => {
                warnings.push(Warning::DegradedSensor {
                    sensor: "wind_speed".into(),
                });
                DEFAULT_WIND_MPH
            }
        };

        let gust_mph = match self.wind_gust {
            Some(reading) => check_non_negative("wind_gust", reading.as_mph())?,
            None => wind_mph,
        };

        let wind_direction_deg = match self.wind_direction_deg {
            Some(d) => Some(check_finite("wind_direction_deg", d)?.rem_euclid(360.0)),
            None => None,
        };

        let rain_rate_inh = match self.rain_rate {
            Some(reading) => check_non_negative("rain_rate", reading.as_inches_per_hour())?,
            None => 0.0,
        };

        let solar_wm2 = match self.solar_radiation_wm2 {
            Some(v) => check_non_negative("solar_radiation_wm2", v)?,
            None => {
                warnings.push(Warning::DegradedSensor {
                    sensor: "solar_radiation".into(),
                });
                DEFAULT_SOLAR_WM2
            }
        };

        let lux = match self.solar_lux {
            Some(v) => check_non_negative("solar_lux", v)?,
            None => 0.0,
        };

        let uv_index = match self.uv_index {
            Some(v) => check_non_negative("uv_index", v)?,
            None => 0.0,
        };

        let solar_elevation_deg = match self.solar_elevation_deg {
            Some(v) => Some(check_finite("solar_elevation_deg", v)?),
            None => None,
        };

        let altitude_m = match self.altitude {
            Some(reading) => Some(check_finite("altitude", reading.as_meters())?),
            None => None,
        };

        Ok((
            CanonicalObservation {
                timestamp: self.timestamp,
                temp_f,
                humidity_pct,
                external_dewpoint_f,
                pressure_inhg,
                pressure_is_sea_level: self.pressure_is_sea_level,
                wind_mph,
                gust_mph,
                wind_direction_deg,
                rain_rate_inh,
                rain_state: self.rain_state.unwrap_or_default(),
                solar_wm2,
                lux,
                uv_index,
                solar_elevation_deg,
                altitude_m,
            },
            warnings,
        ))
    }
}
