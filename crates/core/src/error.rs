//! Error and warning taxonomy for the inference core
//!
//! Errors are fatal to a single `observe` call and leave the caller's
//! state untouched. Warnings are data: they ride along on the inference so
//! the host can log or display them, the core itself never logs them as
//! errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors returned from the core boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A required input is missing: outdoor temperature, or humidity
    /// without an externally measured dewpoint.
    #[error("insufficient input: {0}")]
    InsufficientInput(&'static str),

    /// Relative humidity outside [0, 100].
    #[error("invalid humidity: {value}% is outside [0, 100]")]
    InvalidHumidity {
        /// The offending reading
        value: f64,
    },

    /// A numeric reading is non-finite or outside its physically
    /// representable range.
    #[error("invalid range for {field}: {value}")]
    InvalidRange {
        /// Which snapshot field failed validation
        field: &'static str,
        /// The offending reading
        value: f64,
    },

    /// The snapshot timestamp precedes the newest observation already
    /// absorbed into the state. Equal timestamps are accepted and replace
    /// the prior entry.
    #[error("out-of-order observation: snapshot predates the latest absorbed observation")]
    OutOfOrderObservation,
}

/// Non-fatal anomalies attached to an [`Inference`](crate::pipeline::Inference).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Warning {
    /// A configured value was out of band and a default was substituted.
    Calibration {
        /// The configuration field involved
        field: String,
        /// The value that was actually used
        substituted: f64,
    },
    /// An optional sensor was absent; a default was substituted and the
    /// analysis degraded accordingly.
    DegradedSensor {
        /// The missing sensor
        sensor: String,
    },
    /// An externally supplied dewpoint exceeded the air temperature and was
    /// clamped to it.
    DewpointClamped,
    /// Not enough history to compute a trend over the requested horizon.
    InsufficientHistory {
        /// What the trend was requested for
        quantity: String,
    },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::Calibration { field, substituted } => {
                write!(f, "calibration: {field} out of band, using {substituted}")
            }
            Warning::DegradedSensor { sensor } => {
                write!(f, "degraded: {sensor} sensor missing")
            }
            Warning::DewpointClamped => {
                write!(f, "external dewpoint exceeded air temperature; clamped")
            }
            Warning::InsufficientHistory { quantity } => {
                write!(f, "insufficient history for {quantity} trend")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_field() {
        let e = CoreError::InvalidRange {
            field: "rain_rate",
            value: -1.0,
        };
        assert!(e.to_string().contains("rain_rate"));

        let e = CoreError::InvalidHumidity { value: 130.0 };
        assert!(e.to_string().contains("130"));
    }

    #[test]
    fn warnings_serialize_with_kind_tag() {
        let w = Warning::DegradedSensor {
            sensor: "solar_radiation".into(),
        };
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains("\"kind\":\"degraded_sensor\""));
    }
}
