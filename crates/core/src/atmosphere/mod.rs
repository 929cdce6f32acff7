//! Physical atmosphere models
//!
//! Altitude-aware pressure handling, dewpoint thermodynamics, and the
//! clear-sky solar radiation model the cloud analyzer normalizes against.

pub mod altitude;
pub mod dewpoint;
pub mod solar;

pub use altitude::PressureBands;
pub use solar::SolarContext;
