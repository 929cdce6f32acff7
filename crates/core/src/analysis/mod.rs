//! Weather analysis
//!
//! The per-update analyzers: cloud cover, fog scoring, pressure/wind
//! systems, visibility, the priority-ladder classifier, and the condition
//! hysteresis filter.

pub mod classifier;
pub mod cloud_cover;
pub mod fog;
pub mod hysteresis;
pub mod pressure_wind;
pub mod visibility;

pub use classifier::{classify, ClassifierInputs};
pub use cloud_cover::{analyze_cloud_cover, CloudAnalysis, CloudInputs, CloudRegime};
pub use fog::{score_fog, FogAnalysis, FogClass, FogInputs};
pub use hysteresis::{HysteresisDecision, HysteresisFilter};
pub use pressure_wind::{
    GustAnalysis, GustClass, PressureSystem, PressureWindAnalysis, StormSeverity, WindClass,
};
pub use visibility::{estimate_visibility_km, VisibilityInputs};
