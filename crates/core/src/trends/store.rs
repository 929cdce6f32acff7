//! Bounded, time-indexed store of sensor history
//!
//! A `BTreeMap` keyed by observation time: inserts are O(log n), equal
//! timestamps replace the prior entry, and bounded-horizon scans walk an
//! ordered range. Retention is 168 hours; at a 5-minute cadence that is
//! roughly two thousand entries.
//!
//! Query surface: least-squares trends per hour, mean/min/max, sample
//! standard deviation (volatility), and circular statistics for wind
//! direction.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core_types::condition::Condition;
use crate::core_types::constants::{TRENDS_RETENTION_HOURS, TREND_MIN_SAMPLES};

/// One stored observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSample {
    pub temperature_f: f64,
    pub humidity_pct: f64,
    pub pressure_inhg: f64,
    pub wind_speed_mph: f64,
    pub wind_direction_deg: Option<f64>,
    pub solar_radiation_wm2: f64,
    /// The condition emitted for this observation
    pub condition: Condition,
}

/// Which scalar series a trend query reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendField {
    Temperature,
    Humidity,
    Pressure,
    WindSpeed,
    SolarRadiation,
}

impl TrendField {
    fn extract(self, sample: &TrendSample) -> f64 {
        match self {
            TrendField::Temperature => sample.temperature_f,
            TrendField::Humidity => sample.humidity_pct,
            TrendField::Pressure => sample.pressure_inhg,
            TrendField::WindSpeed => sample.wind_speed_mph,
            TrendField::SolarRadiation => sample.solar_radiation_wm2,
        }
    }
}

/// Summary statistics for one series over one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    /// Most recent value in the window
    pub current: f64,
    /// Mean over the window
    pub average: f64,
    /// Least-squares slope, units per hour
    pub slope_per_hour: f64,
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation
    pub volatility: f64,
    pub sample_count: usize,
}

/// Compass quadrant for prevailing-wind reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompassSector {
    North,
    East,
    South,
    West,
}

/// Circular statistics for wind direction over one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindDirectionSummary {
    /// Circular mean bearing, degrees in [0, 360)
    pub mean_direction_deg: f64,
    /// Mean resultant vector length in [0, 1]; 1 = perfectly steady
    pub stability: f64,
    /// Mean absolute direction change, degrees per hour
    pub change_rate_deg_per_hour: f64,
    /// Net change over the window exceeded 45°
    pub significant_shift: bool,
    /// Quadrant most of the window's bearings fall in
    pub prevailing: CompassSector,
    pub sample_count: usize,
}

/// The bounded history store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendsStore {
    samples: BTreeMap<DateTime<Utc>, TrendSample>,
}

impl TrendsStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retained samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no samples are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Timestamp of the newest sample.
    #[must_use]
    pub fn latest_timestamp(&self) -> Option<DateTime<Utc>> {
        self.samples.keys().next_back().copied()
    }

    /// Insert a sample, replacing any entry with the same timestamp, then
    /// evict everything older than the 168-hour retention window.
    pub fn insert(&mut self, timestamp: DateTime<Utc>, sample: TrendSample) {
        self.samples.insert(timestamp, sample);
        let cutoff = timestamp - Duration::hours(TRENDS_RETENTION_HOURS);
        self.samples = self.samples.split_off(&cutoff);
    }

    /// Iterate samples within `[now - horizon, now]`, oldest first.
    pub fn window(
        &self,
        now: DateTime<Utc>,
        horizon: Duration,
    ) -> impl Iterator<Item = (&DateTime<Utc>, &TrendSample)> {
        let start = now - horizon;
        self.samples.range(start..=now)
    }

    /// Trend summary for a scalar series over `[now - horizon, now]`.
    ///
    /// Returns `None` with fewer than three samples; a two-point "trend"
    /// is noise.
    #[must_use]
    pub fn trend(
        &self,
        field: TrendField,
        now: DateTime<Utc>,
        horizon: Duration,
    ) -> Option<TrendSummary> {
        let window: Vec<(f64, f64)> = self
            .window(now, horizon)
            .map(|(t, s)| {
                let hours = (*t - (now - horizon)).num_seconds() as f64 / 3600.0;
                (hours, field.extract(s))
            })
            .collect();

        if window.len() < TREND_MIN_SAMPLES {
            return None;
        }

        let values: Vec<f64> = window.iter().map(|(_, v)| *v).collect();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let volatility = variance.sqrt();

        Some(TrendSummary {
            current: *values.last().expect("window is non-empty"),
            average: mean,
            slope_per_hour: least_squares_slope(&window),
            min,
            max,
            volatility,
            sample_count: values.len(),
        })
    }

    /// Circular wind-direction statistics over `[now - horizon, now]`.
    ///
    /// Entries without a direction reading are skipped; `None` with fewer
    /// than three usable samples.
    #[must_use]
    pub fn wind_direction(
        &self,
        now: DateTime<Utc>,
        horizon: Duration,
    ) -> Option<WindDirectionSummary> {
        let window: Vec<(DateTime<Utc>, f64)> = self
            .window(now, horizon)
            .filter_map(|(t, s)| s.wind_direction_deg.map(|d| (*t, d)))
            .collect();

        if window.len() < TREND_MIN_SAMPLES {
            return None;
        }

        let directions: Vec<f64> = window.iter().map(|(_, d)| *d).collect();
        let (mean_direction_deg, stability) = circular_mean_and_stability(&directions);

        let mut total_change = 0.0;
        for pair in directions.windows(2) {
            total_change += angular_difference(pair[0], pair[1]).abs();
        }
        let span_hours =
            (window.last().expect("non-empty").0 - window.first().expect("non-empty").0)
                .num_seconds() as f64
                / 3600.0;
        let change_rate_deg_per_hour = if span_hours > 0.0 {
            total_change / span_hours
        } else {
            0.0
        };

        let net_change = angular_difference(
            window.first().expect("non-empty").1,
            window.last().expect("non-empty").1,
        );

        Some(WindDirectionSummary {
            mean_direction_deg,
            stability,
            change_rate_deg_per_hour,
            significant_shift: net_change.abs() > 45.0,
            prevailing: prevailing_sector(&directions),
            sample_count: window.len(),
        })
    }

    /// Fraction of samples in the window whose emitted condition satisfies
    /// the predicate. `None` when the window is empty.
    #[must_use]
    pub fn condition_fraction(
        &self,
        now: DateTime<Utc>,
        horizon: Duration,
        predicate: impl Fn(Condition) -> bool,
    ) -> Option<f64> {
        let mut total = 0usize;
        let mut matched = 0usize;
        for (_, sample) in self.window(now, horizon) {
            total += 1;
            if predicate(sample.condition) {
                matched += 1;
            }
        }
        if total == 0 {
            None
        } else {
            Some(matched as f64 / total as f64)
        }
    }

    /// Earliest time within the window at which every later pressure sample
    /// (inclusive) stayed below `threshold_inhg`. Drives the sustained-low
    /// storm contribution.
    #[must_use]
    pub fn pressure_below_since(
        &self,
        now: DateTime<Utc>,
        horizon: Duration,
        threshold_inhg: f64,
    ) -> Option<DateTime<Utc>> {
        let mut since = None;
        for (t, s) in self.window(now, horizon) {
            if s.pressure_inhg < threshold_inhg {
                since.get_or_insert(*t);
            } else {
                since = None;
            }
        }
        since
    }

    /// Weighted recent average of solar radiation over the configured
    /// averaging window, favoring newer readings (weights ramp linearly
    /// from 0.3 to 1.0). Zero readings are excluded; requires at least
    /// three usable samples, otherwise the current reading passes through.
    #[must_use]
    pub fn solar_radiation_average(
        &self,
        now: DateTime<Utc>,
        window: Duration,
        current_wm2: f64,
    ) -> f64 {
        let readings: Vec<f64> = self
            .window(now, window)
            .map(|(_, s)| s.solar_radiation_wm2)
            .filter(|v| *v > 0.0)
            .collect();

        if readings.len() < TREND_MIN_SAMPLES {
            return current_wm2;
        }

        let n = readings.len();
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;
        for (i, value) in readings.iter().enumerate() {
            let weight = 0.3 + 0.7 * i as f64 / (n - 1) as f64;
            weighted_sum += value * weight;
            total_weight += weight;
        }

        weighted_sum / total_weight
    }
}

/// Least-squares slope of `(hours, value)` pairs. Zero when the points are
/// degenerate (all at one instant).
fn least_squares_slope(points: &[(f64, f64)]) -> f64 {
    let n = points.len() as f64;
    if points.len() < 2 {
        return 0.0;
    }

    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();
    let sum_x2: f64 = points.iter().map(|(x, _)| x * x).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }

    (n * sum_xy - sum_x * sum_y) / denominator
}

/// Circular mean bearing and resultant-vector stability for a set of
/// bearings in degrees.
#[must_use]
pub fn circular_mean_and_stability(directions_deg: &[f64]) -> (f64, f64) {
    if directions_deg.is_empty() {
        return (0.0, 0.0);
    }

    let n = directions_deg.len() as f64;
    let sin_sum: f64 = directions_deg.iter().map(|d| d.to_radians().sin()).sum();
    let cos_sum: f64 = directions_deg.iter().map(|d| d.to_radians().cos()).sum();

    let mean = sin_sum.atan2(cos_sum).to_degrees().rem_euclid(360.0);
    let resultant = (sin_sum.powi(2) + cos_sum.powi(2)).sqrt() / n;

    (mean, resultant.clamp(0.0, 1.0))
}

/// Smallest signed angular difference `to - from`, in (-180, 180].
#[must_use]
pub fn angular_difference(from_deg: f64, to_deg: f64) -> f64 {
    let diff = (to_deg - from_deg).rem_euclid(360.0);
    if diff > 180.0 {
        diff - 360.0
    } else {
        diff
    }
}

/// The prevailing 90° sector for a set of bearings. Ties go to the
/// earlier sector in N/E/S/W order; an empty set reads as north.
#[must_use]
pub fn prevailing_sector(directions_deg: &[f64]) -> CompassSector {
    let mut counts = [0usize; 4]; // north, east, south, west
    for d in directions_deg {
        let normalized = d.rem_euclid(360.0);
        let sector = if !(45.0..315.0).contains(&normalized) {
            0
        } else if normalized < 135.0 {
            1
        } else if normalized < 225.0 {
            2
        } else {
            3
        };
        counts[sector] += 1;
    }

    let sectors = [
        CompassSector::North,
        CompassSector::East,
        CompassSector::South,
        CompassSector::West,
    ];
    let mut best = 0;
    for (i, count) in counts.iter().enumerate() {
        if *count > counts[best] {
            best = i;
        }
    }
    sectors[best]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
    }

    fn sample(pressure: f64) -> TrendSample {
        TrendSample {
            temperature_f: 60.0,
            humidity_pct: 50.0,
            pressure_inhg: pressure,
            wind_speed_mph: 5.0,
            wind_direction_deg: Some(180.0),
            solar_radiation_wm2: 0.0,
            condition: Condition::PartlyCloudy,
        }
    }

    #[test]
    fn equal_timestamps_replace() {
        let mut store = TrendsStore::new();
        store.insert(t0(), sample(29.90));
        store.insert(t0(), sample(29.50));
        assert_eq!(store.len(), 1);
        let (_, s) = store.window(t0(), Duration::hours(1)).next().unwrap();
        assert_eq!(s.pressure_inhg, 29.50);
    }

    #[test]
    fn retention_evicts_beyond_168_hours() {
        let mut store = TrendsStore::new();
        store.insert(t0(), sample(29.90));
        store.insert(t0() + Duration::hours(100), sample(29.90));
        store.insert(t0() + Duration::hours(169), sample(29.90));
        assert_eq!(store.len(), 2, "the 169-hour-old entry must be evicted");
    }

    #[test]
    fn trend_requires_three_samples() {
        let mut store = TrendsStore::new();
        let now = t0() + Duration::hours(2);
        store.insert(t0(), sample(29.90));
        store.insert(t0() + Duration::hours(1), sample(29.80));
        assert!(store
            .trend(TrendField::Pressure, now, Duration::hours(3))
            .is_none());

        store.insert(now, sample(29.70));
        let trend = store
            .trend(TrendField::Pressure, now, Duration::hours(3))
            .unwrap();
        // Falling 0.1 inHg per hour
        assert!((trend.slope_per_hour + 0.1).abs() < 1e-9);
        assert_eq!(trend.sample_count, 3);
        assert_eq!(trend.current, 29.70);
    }

    #[test]
    fn volatility_is_sample_stddev() {
        let mut store = TrendsStore::new();
        let now = t0() + Duration::hours(2);
        for (i, v) in [29.90, 29.90, 29.90].iter().enumerate() {
            store.insert(t0() + Duration::hours(i as i64), sample(*v));
        }
        let trend = store
            .trend(TrendField::Pressure, now, Duration::hours(3))
            .unwrap();
        assert!(trend.volatility.abs() < 1e-12);
    }

    #[test]
    fn circular_mean_wraps_correctly() {
        // 350° and 10° average to north, not 180°
        let (mean, stability) = circular_mean_and_stability(&[350.0, 10.0]);
        assert!(mean < 1.0 || mean > 359.0, "mean was {mean}");
        assert!(stability > 0.9);
    }

    #[test]
    fn circular_mean_full_turn_is_identity() {
        let theta = 73.0;
        let (mean, _) = circular_mean_and_stability(&[theta, theta + 360.0]);
        assert!((mean - theta).abs() < 1e-6);
    }

    #[test]
    fn opposed_directions_have_no_stability() {
        let (_, stability) = circular_mean_and_stability(&[0.0, 180.0]);
        assert!(stability < 1e-9);
    }

    #[test]
    fn angular_difference_signed_shortest() {
        assert!((angular_difference(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((angular_difference(10.0, 350.0) + 20.0).abs() < 1e-9);
        assert!((angular_difference(0.0, 180.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn prevailing_sector_counts_quadrants() {
        assert_eq!(
            prevailing_sector(&[350.0, 2.0, 40.0, 200.0]),
            CompassSector::North
        );
        assert_eq!(prevailing_sector(&[100.0, 120.0, 10.0]), CompassSector::East);
    }

    #[test]
    fn pressure_below_since_tracks_sustained_runs() {
        let mut store = TrendsStore::new();
        let now = t0() + Duration::hours(3);
        store.insert(t0(), sample(29.90)); // above
        store.insert(t0() + Duration::hours(1), sample(29.30)); // below
        store.insert(t0() + Duration::hours(2), sample(29.60)); // recovers
        store.insert(now, sample(29.40)); // below again

        let since = store
            .pressure_below_since(now, Duration::hours(24), 29.50)
            .unwrap();
        assert_eq!(since, now, "run restarts after the recovery sample");
    }

    #[test]
    fn solar_average_needs_three_nonzero_readings() {
        let mut store = TrendsStore::new();
        let now = t0() + Duration::minutes(10);
        store.insert(t0(), {
            let mut s = sample(29.90);
            s.solar_radiation_wm2 = 500.0;
            s
        });
        // Only one non-zero reading: passthrough
        assert_eq!(
            store.solar_radiation_average(now, Duration::minutes(15), 432.0),
            432.0
        );

        for i in 1..3 {
            store.insert(t0() + Duration::minutes(i * 3), {
                let mut s = sample(29.90);
                s.solar_radiation_wm2 = 500.0 + i as f64 * 100.0;
                s
            });
        }
        let avg = store.solar_radiation_average(now, Duration::minutes(15), 432.0);
        // Recency weighting pulls the average above the arithmetic mean
        assert!(avg > 600.0 && avg < 700.0, "weighted average was {avg}");
    }
}
