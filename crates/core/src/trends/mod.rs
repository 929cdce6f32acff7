//! Historical trend analysis
//!
//! The bounded sensor-history store and its statistical queries: linear
//! trends, volatility, and circular wind-direction statistics.

pub mod store;

pub use store::{
    angular_difference, circular_mean_and_stability, prevailing_sector, CompassSector, TrendField,
    TrendSample, TrendSummary, TrendsStore, WindDirectionSummary,
};
