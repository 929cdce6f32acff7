//! Core types shared across the inference pipeline
//!
//! Unit newtypes, the closed condition vocabulary, the unit-tagged sensor
//! snapshot, and the frozen meteorological threshold tables.

pub mod condition;
pub mod constants;
pub mod snapshot;
pub mod units;

pub use condition::{Condition, RainState};
pub use snapshot::{
    CanonicalObservation, LengthReading, PressureReading, RainRateReading, SensorSnapshot,
    SpeedReading, TemperatureReading,
};
