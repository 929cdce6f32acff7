//! Skywatch inference core
//!
//! A deterministic weather-inference engine for home weather stations. Raw
//! sensor snapshots go in; a classified weather condition, derived
//! atmospheric quantities, and 5-day / 24-hour forecasts come out.
//!
//! The core is pure at its boundary: [`observe`] and [`forecast`] are
//! total functions over `(snapshot, state)`, never touch a wall clock, and
//! never block. The caller owns the [`StationState`] and threads it
//! through successive calls; a failed observation leaves it untouched.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use skywatch_core::{new_state, observe, StationConfig};
//! use skywatch_core::core_types::snapshot::{SensorSnapshot, TemperatureReading};
//!
//! let state = new_state(StationConfig::default());
//!
//! let mut snapshot =
//!     SensorSnapshot::new(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap());
//! snapshot.outdoor_temp = Some(TemperatureReading::celsius(24.0));
//! snapshot.humidity = Some(45.0);
//!
//! let (inference, _next_state) = observe(&snapshot, &state).unwrap();
//! println!("{}", inference.condition);
//! ```

pub mod analysis;
pub mod atmosphere;
pub mod core_types;
pub mod error;
pub mod forecast;
pub mod pipeline;
pub mod trends;

pub use core_types::condition::{Condition, RainState};
pub use core_types::snapshot::SensorSnapshot;
pub use core_types::units::UnitSystem;
pub use error::{CoreError, Warning};
pub use forecast::{DailyForecast, Forecast, ForecastHorizon, HourlyForecast};
pub use pipeline::{forecast, new_state, observe, DerivedState, Inference, StationConfig,
    StationState};
