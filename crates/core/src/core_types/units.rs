//! Semantic unit types for type-safe meteorological quantities
//!
//! Newtype wrappers prevent accidental mixing of incompatible units
//! (Fahrenheit with Celsius, inHg with hPa, mph with m/s). All analysis
//! code canonicalizes to Imperial units (°F, inHg, mph, in/h) before doing
//! arithmetic; outputs are re-encoded to the caller's unit system.
//!
//! # Design
//! - Each type wraps f64 (the analysis pipeline is tolerance-sensitive)
//! - Explicit conversion methods between related types, exact factors
//! - Total ordering via `f64::total_cmp` (NaN sorts above all values)
//! - Serde support for serialization
//!
//! # Usage
//! ```
//! use skywatch_core::core_types::units::{Celsius, Fahrenheit};
//!
//! let t = Celsius(25.0);
//! let f: Fahrenheit = t.into();
//! assert!((f.0 - 77.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// Output unit system for inferences and forecasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    /// °C, hPa, km/h, mm/h, km
    Metric,
    /// °F, inHg, mph, in/h, miles
    Imperial,
}

impl Default for UnitSystem {
    fn default() -> Self {
        UnitSystem::Metric
    }
}

/// 1 inHg ≡ 33.8639 hPa
pub const INHG_TO_HPA: f64 = 33.8639;
/// 1 mph ≡ 1.60934 km/h
pub const MPH_TO_KMH: f64 = 1.60934;
/// 1 mph ≡ 0.44704 m/s
pub const MPH_TO_MPS: f64 = 0.44704;
/// 1 inch ≡ 25.4 mm
pub const INCHES_TO_MM: f64 = 25.4;
/// 1 foot ≡ 0.3048 m
pub const FEET_TO_METERS: f64 = 0.3048;

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Temperature in degrees Fahrenheit (canonical analysis unit)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Fahrenheit(pub f64);

impl Eq for Fahrenheit {}

impl PartialOrd for Fahrenheit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fahrenheit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Fahrenheit {
    /// Water freezing point
    pub const FREEZING: Fahrenheit = Fahrenheit(32.0);

    /// Create a new Fahrenheit temperature
    #[inline]
    pub fn new(value: f64) -> Self {
        Fahrenheit(value)
    }

    /// Get the raw f64 value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to Celsius
    #[inline]
    pub fn to_celsius(self) -> Celsius {
        Celsius((self.0 - 32.0) * 5.0 / 9.0)
    }
}

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Celsius {
        f.to_celsius()
    }
}

impl From<f64> for Fahrenheit {
    fn from(v: f64) -> Self {
        Fahrenheit(v)
    }
}

impl From<Fahrenheit> for f64 {
    fn from(f: Fahrenheit) -> f64 {
        f.0
    }
}

impl Add for Fahrenheit {
    type Output = Fahrenheit;
    fn add(self, rhs: Fahrenheit) -> Fahrenheit {
        Fahrenheit(self.0 + rhs.0)
    }
}

impl Sub for Fahrenheit {
    type Output = Fahrenheit;
    fn sub(self, rhs: Fahrenheit) -> Fahrenheit {
        Fahrenheit(self.0 - rhs.0)
    }
}

impl Mul<f64> for Fahrenheit {
    type Output = Fahrenheit;
    fn mul(self, rhs: f64) -> Fahrenheit {
        Fahrenheit(self.0 * rhs)
    }
}

impl fmt::Display for Fahrenheit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°F", self.0)
    }
}

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(pub f64);

impl Eq for Celsius {}

impl PartialOrd for Celsius {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Celsius {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Celsius {
    /// Water freezing point
    pub const FREEZING: Celsius = Celsius(0.0);

    /// Create a new Celsius temperature
    #[inline]
    pub fn new(value: f64) -> Self {
        Celsius(value)
    }

    /// Get the raw f64 value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to Fahrenheit
    #[inline]
    pub fn to_fahrenheit(self) -> Fahrenheit {
        Fahrenheit(self.0 * 9.0 / 5.0 + 32.0)
    }
}

impl From<Celsius> for Fahrenheit {
    fn from(c: Celsius) -> Fahrenheit {
        c.to_fahrenheit()
    }
}

impl From<f64> for Celsius {
    fn from(v: f64) -> Self {
        Celsius(v)
    }
}

impl From<Celsius> for f64 {
    fn from(c: Celsius) -> f64 {
        c.0
    }
}

impl Add for Celsius {
    type Output = Celsius;
    fn add(self, rhs: Celsius) -> Celsius {
        Celsius(self.0 + rhs.0)
    }
}

impl Sub for Celsius {
    type Output = Celsius;
    fn sub(self, rhs: Celsius) -> Celsius {
        Celsius(self.0 - rhs.0)
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

// ============================================================================
// PRESSURE
// ============================================================================

/// Atmospheric pressure in inches of mercury (canonical analysis unit)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct InchesOfMercury(pub f64);

impl Eq for InchesOfMercury {}

impl PartialOrd for InchesOfMercury {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InchesOfMercury {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl InchesOfMercury {
    /// Standard sea-level pressure
    pub const STANDARD: InchesOfMercury = InchesOfMercury(29.92);

    /// Create a new pressure value
    #[inline]
    pub fn new(value: f64) -> Self {
        InchesOfMercury(value)
    }

    /// Get the raw f64 value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to hectopascals
    #[inline]
    pub fn to_hectopascals(self) -> Hectopascals {
        Hectopascals(self.0 * INHG_TO_HPA)
    }
}

impl From<InchesOfMercury> for Hectopascals {
    fn from(p: InchesOfMercury) -> Hectopascals {
        p.to_hectopascals()
    }
}

impl From<f64> for InchesOfMercury {
    fn from(v: f64) -> Self {
        InchesOfMercury(v)
    }
}

impl From<InchesOfMercury> for f64 {
    fn from(p: InchesOfMercury) -> f64 {
        p.0
    }
}

impl Add for InchesOfMercury {
    type Output = InchesOfMercury;
    fn add(self, rhs: InchesOfMercury) -> InchesOfMercury {
        InchesOfMercury(self.0 + rhs.0)
    }
}

impl Sub for InchesOfMercury {
    type Output = InchesOfMercury;
    fn sub(self, rhs: InchesOfMercury) -> InchesOfMercury {
        InchesOfMercury(self.0 - rhs.0)
    }
}

impl fmt::Display for InchesOfMercury {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} inHg", self.0)
    }
}

/// Atmospheric pressure in hectopascals (= millibars)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Hectopascals(pub f64);

impl Eq for Hectopascals {}

impl PartialOrd for Hectopascals {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hectopascals {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hectopascals {
    /// Standard sea-level pressure
    pub const STANDARD: Hectopascals = Hectopascals(1013.25);

    /// Create a new pressure value
    #[inline]
    pub fn new(value: f64) -> Self {
        Hectopascals(value)
    }

    /// Get the raw f64 value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to inches of mercury
    #[inline]
    pub fn to_inches_of_mercury(self) -> InchesOfMercury {
        InchesOfMercury(self.0 / INHG_TO_HPA)
    }
}

impl From<Hectopascals> for InchesOfMercury {
    fn from(p: Hectopascals) -> InchesOfMercury {
        p.to_inches_of_mercury()
    }
}

impl From<f64> for Hectopascals {
    fn from(v: f64) -> Self {
        Hectopascals(v)
    }
}

impl From<Hectopascals> for f64 {
    fn from(p: Hectopascals) -> f64 {
        p.0
    }
}

impl Sub for Hectopascals {
    type Output = Hectopascals;
    fn sub(self, rhs: Hectopascals) -> Hectopascals {
        Hectopascals(self.0 - rhs.0)
    }
}

impl fmt::Display for Hectopascals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} hPa", self.0)
    }
}

// ============================================================================
// SPEED
// ============================================================================

/// Speed in miles per hour (canonical analysis unit)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MilesPerHour(pub f64);

impl Eq for MilesPerHour {}

impl PartialOrd for MilesPerHour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MilesPerHour {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl MilesPerHour {
    /// Create a new speed value
    #[inline]
    pub fn new(value: f64) -> Self {
        MilesPerHour(value)
    }

    /// Get the raw f64 value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to km/h
    #[inline]
    pub fn to_kmh(self) -> KilometersPerHour {
        KilometersPerHour(self.0 * MPH_TO_KMH)
    }

    /// Convert to m/s
    #[inline]
    pub fn to_mps(self) -> MetersPerSecond {
        MetersPerSecond(self.0 * MPH_TO_MPS)
    }
}

impl From<MilesPerHour> for KilometersPerHour {
    fn from(s: MilesPerHour) -> KilometersPerHour {
        s.to_kmh()
    }
}

impl From<f64> for MilesPerHour {
    fn from(v: f64) -> Self {
        MilesPerHour(v)
    }
}

impl From<MilesPerHour> for f64 {
    fn from(s: MilesPerHour) -> f64 {
        s.0
    }
}

impl Add for MilesPerHour {
    type Output = MilesPerHour;
    fn add(self, rhs: MilesPerHour) -> MilesPerHour {
        MilesPerHour(self.0 + rhs.0)
    }
}

impl Sub for MilesPerHour {
    type Output = MilesPerHour;
    fn sub(self, rhs: MilesPerHour) -> MilesPerHour {
        MilesPerHour(self.0 - rhs.0)
    }
}

impl Mul<f64> for MilesPerHour {
    type Output = MilesPerHour;
    fn mul(self, rhs: f64) -> MilesPerHour {
        MilesPerHour(self.0 * rhs)
    }
}

impl Div<MilesPerHour> for MilesPerHour {
    type Output = f64;
    fn div(self, rhs: MilesPerHour) -> f64 {
        self.0 / rhs.0
    }
}

impl fmt::Display for MilesPerHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} mph", self.0)
    }
}

/// Speed in kilometers per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct KilometersPerHour(pub f64);

impl KilometersPerHour {
    /// Create a new speed value
    #[inline]
    pub fn new(value: f64) -> Self {
        KilometersPerHour(value)
    }

    /// Get the raw f64 value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to mph
    #[inline]
    pub fn to_mph(self) -> MilesPerHour {
        MilesPerHour(self.0 / MPH_TO_KMH)
    }
}

impl From<KilometersPerHour> for MilesPerHour {
    fn from(s: KilometersPerHour) -> MilesPerHour {
        s.to_mph()
    }
}

impl From<f64> for KilometersPerHour {
    fn from(v: f64) -> Self {
        KilometersPerHour(v)
    }
}

impl From<KilometersPerHour> for f64 {
    fn from(s: KilometersPerHour) -> f64 {
        s.0
    }
}

impl fmt::Display for KilometersPerHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} km/h", self.0)
    }
}

/// Speed in meters per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MetersPerSecond(pub f64);

impl MetersPerSecond {
    /// Create a new speed value
    #[inline]
    pub fn new(value: f64) -> Self {
        MetersPerSecond(value)
    }

    /// Get the raw f64 value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to mph
    #[inline]
    pub fn to_mph(self) -> MilesPerHour {
        MilesPerHour(self.0 / MPH_TO_MPS)
    }
}

impl From<MetersPerSecond> for MilesPerHour {
    fn from(s: MetersPerSecond) -> MilesPerHour {
        s.to_mph()
    }
}

impl From<f64> for MetersPerSecond {
    fn from(v: f64) -> Self {
        MetersPerSecond(v)
    }
}

impl fmt::Display for MetersPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} m/s", self.0)
    }
}

// ============================================================================
// PRECIPITATION RATE
// ============================================================================

/// Precipitation rate in inches per hour (canonical analysis unit)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct InchesPerHour(pub f64);

impl Eq for InchesPerHour {}

impl PartialOrd for InchesPerHour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InchesPerHour {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl InchesPerHour {
    /// Create a new rate value
    #[inline]
    pub fn new(value: f64) -> Self {
        InchesPerHour(value)
    }

    /// Get the raw f64 value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to mm/h
    #[inline]
    pub fn to_mm_per_hour(self) -> MillimetersPerHour {
        MillimetersPerHour(self.0 * INCHES_TO_MM)
    }
}

impl From<InchesPerHour> for MillimetersPerHour {
    fn from(r: InchesPerHour) -> MillimetersPerHour {
        r.to_mm_per_hour()
    }
}

impl From<f64> for InchesPerHour {
    fn from(v: f64) -> Self {
        InchesPerHour(v)
    }
}

impl From<InchesPerHour> for f64 {
    fn from(r: InchesPerHour) -> f64 {
        r.0
    }
}

impl fmt::Display for InchesPerHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} in/h", self.0)
    }
}

/// Precipitation rate in millimeters per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MillimetersPerHour(pub f64);

impl MillimetersPerHour {
    /// Create a new rate value
    #[inline]
    pub fn new(value: f64) -> Self {
        MillimetersPerHour(value)
    }

    /// Get the raw f64 value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to in/h
    #[inline]
    pub fn to_inches_per_hour(self) -> InchesPerHour {
        InchesPerHour(self.0 / INCHES_TO_MM)
    }
}

impl From<MillimetersPerHour> for InchesPerHour {
    fn from(r: MillimetersPerHour) -> InchesPerHour {
        r.to_inches_per_hour()
    }
}

impl From<f64> for MillimetersPerHour {
    fn from(v: f64) -> Self {
        MillimetersPerHour(v)
    }
}

impl fmt::Display for MillimetersPerHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} mm/h", self.0)
    }
}

// ============================================================================
// LENGTH
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Meters(pub f64);

impl Meters {
    /// Create a new length value
    #[inline]
    pub fn new(value: f64) -> Self {
        Meters(value)
    }

    /// Get the raw f64 value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to feet
    #[inline]
    pub fn to_feet(self) -> Feet {
        Feet(self.0 / FEET_TO_METERS)
    }
}

impl From<f64> for Meters {
    fn from(v: f64) -> Self {
        Meters(v)
    }
}

impl From<Meters> for f64 {
    fn from(m: Meters) -> f64 {
        m.0
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} m", self.0)
    }
}

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Feet(pub f64);

impl Feet {
    /// Create a new length value
    #[inline]
    pub fn new(value: f64) -> Self {
        Feet(value)
    }

    /// Get the raw f64 value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to meters
    #[inline]
    pub fn to_meters(self) -> Meters {
        Meters(self.0 * FEET_TO_METERS)
    }
}

impl From<Feet> for Meters {
    fn from(f: Feet) -> Meters {
        f.to_meters()
    }
}

impl From<f64> for Feet {
    fn from(v: f64) -> Self {
        Feet(v)
    }
}

impl fmt::Display for Feet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} ft", self.0)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fahrenheit_to_celsius() {
        let f = Fahrenheit(212.0);
        let c = f.to_celsius();
        assert!((c.0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_celsius_to_fahrenheit() {
        let c = Celsius(-40.0);
        let f = c.to_fahrenheit();
        assert!((f.0 + 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_pressure_round_trip() {
        let p = InchesOfMercury(29.92);
        let back = p.to_hectopascals().to_inches_of_mercury();
        assert!((back.0 - p.0).abs() < 1e-12);
    }

    #[test]
    fn test_speed_conversions() {
        let mph = MilesPerHour(10.0);
        assert!((mph.to_kmh().0 - 16.0934).abs() < 1e-9);
        assert!((mph.to_mps().0 - 4.4704).abs() < 1e-9);

        let back = mph.to_kmh().to_mph();
        assert!((back.0 - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_rain_rate_round_trip() {
        let r = InchesPerHour(0.25);
        assert!((r.to_mm_per_hour().0 - 6.35).abs() < 1e-9);
        let back = r.to_mm_per_hour().to_inches_per_hour();
        assert!((back.0 - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_feet_to_meters() {
        let ft = Feet(1000.0);
        assert!((ft.to_meters().0 - 304.8).abs() < 1e-9);
    }

    #[test]
    fn test_nan_sorts_above_values() {
        let a = Fahrenheit(f64::NAN);
        let b = Fahrenheit(100.0);
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Greater);
    }
}
