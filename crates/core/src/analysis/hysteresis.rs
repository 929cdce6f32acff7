//! Condition hysteresis
//!
//! Suppresses single-update flicker between neighboring conditions. A new
//! candidate is accepted when it was already seen in the last hour, when
//! the transition is a major change (clear-to-severe in either direction),
//! or when the cloud-cover movement this update is large enough to justify
//! the jump. A raw cloud-cover swing beyond 30 points in one update is
//! treated as sensor noise and never switches the condition.
//!
//! The history records *raw* candidates (pre-filter), so a genuinely new
//! condition is accepted on its second consecutive appearance.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core_types::condition::Condition;
use crate::core_types::constants::HysteresisThresholds;

/// True for transitions that always bypass hysteresis: one side calm or
/// clear (or fog), the other severe weather.
#[must_use]
pub fn is_major_change(from: Condition, to: Condition) -> bool {
    (from.is_tranquil() && to.is_severe()) || (from.is_severe() && to.is_tranquil())
}

/// Why the filter emitted what it emitted. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HysteresisDecision {
    /// Candidate equals the previous condition
    Unchanged,
    /// Candidate was seen within the recency window
    RecentlySeen,
    /// Clear-to-severe (or back) transitions pass immediately
    MajorChange,
    /// Cloud-cover movement justified the transition
    CloudDelta,
    /// Candidate rejected; previous condition kept
    Suppressed,
}

/// Time-windowed candidate history plus the acceptance rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HysteresisFilter {
    history: VecDeque<(DateTime<Utc>, Condition)>,
}

impl HysteresisFilter {
    /// An empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of retained candidate entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// True when no candidates are retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Apply the filter for one update.
    ///
    /// `raw_cloud_delta` is the *pre-truncation* cloud-cover change this
    /// update; `None` when there was no prior cloud estimate. The raw
    /// candidate is recorded in the history either way.
    pub fn apply(
        &mut self,
        now: DateTime<Utc>,
        previous: Option<Condition>,
        candidate: Condition,
        raw_cloud_delta: Option<f64>,
    ) -> (Condition, HysteresisDecision) {
        let decision = self.decide(now, previous, candidate, raw_cloud_delta);
        self.record(now, candidate);

        let emitted = match decision {
            HysteresisDecision::Suppressed => previous.unwrap_or(candidate),
            _ => candidate,
        };
        (emitted, decision)
    }

    fn decide(
        &self,
        now: DateTime<Utc>,
        previous: Option<Condition>,
        candidate: Condition,
        raw_cloud_delta: Option<f64>,
    ) -> HysteresisDecision {
        let Some(previous) = previous else {
            // First observation: nothing to be stable against.
            return HysteresisDecision::Unchanged;
        };

        if candidate == previous {
            return HysteresisDecision::Unchanged;
        }

        // The candidate must be persisting: the raw candidate of the
        // previous update, within the recency window, already was it. A
        // plain seen-in-the-last-hour count would let two alternating
        // candidates flip the output every update.
        let recency = now - Duration::hours(HysteresisThresholds::RECENCY_HOURS);
        let persisting = self
            .history
            .back()
            .is_some_and(|(t, c)| *t >= recency && *c == candidate);
        if persisting {
            return HysteresisDecision::RecentlySeen;
        }

        if is_major_change(previous, candidate) {
            return HysteresisDecision::MajorChange;
        }

        let delta = raw_cloud_delta.unwrap_or(0.0);

        // A jump past the per-update cloud ceiling is noise, not weather.
        if delta.abs() > HysteresisThresholds::MAX_CLOUD_DELTA {
            return HysteresisDecision::Suppressed;
        }

        let required = match (previous.cloud_tier(), candidate.cloud_tier()) {
            (Some(a), Some(b)) if a.abs_diff(b) == 1 => HysteresisThresholds::ADJACENT_DELTA,
            _ => HysteresisThresholds::NON_ADJACENT_DELTA,
        };

        if delta.abs() >= required {
            HysteresisDecision::CloudDelta
        } else {
            HysteresisDecision::Suppressed
        }
    }

    fn record(&mut self, now: DateTime<Utc>, candidate: Condition) {
        self.history.push_back((now, candidate));
        let cutoff = now - Duration::hours(HysteresisThresholds::HISTORY_HOURS);
        while let Some((t, _)) = self.history.front() {
            if *t < cutoff {
                self.history.pop_front();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn first_observation_passes_through() {
        let mut filter = HysteresisFilter::new();
        let (emitted, decision) = filter.apply(t0(), None, Condition::Cloudy, None);
        assert_eq!(emitted, Condition::Cloudy);
        assert_eq!(decision, HysteresisDecision::Unchanged);
    }

    #[test]
    fn unchanged_candidate_is_stable() {
        let mut filter = HysteresisFilter::new();
        filter.apply(t0(), None, Condition::Sunny, None);
        let (emitted, decision) =
            filter.apply(t0() + Duration::minutes(10), Some(Condition::Sunny), Condition::Sunny, Some(2.0));
        assert_eq!(emitted, Condition::Sunny);
        assert_eq!(decision, HysteresisDecision::Unchanged);
    }

    #[test]
    fn new_candidate_suppressed_then_accepted_on_second_sight() {
        let mut filter = HysteresisFilter::new();
        filter.apply(t0(), None, Condition::Sunny, None);

        // Small cloud movement: first appearance of partly_cloudy suppressed
        let (emitted, decision) = filter.apply(
            t0() + Duration::minutes(10),
            Some(Condition::Sunny),
            Condition::PartlyCloudy,
            Some(8.0),
        );
        assert_eq!(emitted, Condition::Sunny);
        assert_eq!(decision, HysteresisDecision::Suppressed);

        // Second appearance within the hour: accepted
        let (emitted, decision) = filter.apply(
            t0() + Duration::minutes(20),
            Some(Condition::Sunny),
            Condition::PartlyCloudy,
            Some(8.0),
        );
        assert_eq!(emitted, Condition::PartlyCloudy);
        assert_eq!(decision, HysteresisDecision::RecentlySeen);
    }

    #[test]
    fn adjacent_tier_change_needs_15_points() {
        let mut filter = HysteresisFilter::new();
        filter.apply(t0(), None, Condition::Sunny, None);

        let (emitted, decision) = filter.apply(
            t0() + Duration::minutes(10),
            Some(Condition::Sunny),
            Condition::PartlyCloudy,
            Some(18.0),
        );
        assert_eq!(emitted, Condition::PartlyCloudy);
        assert_eq!(decision, HysteresisDecision::CloudDelta);
    }

    #[test]
    fn non_adjacent_jump_needs_25_points() {
        let mut filter = HysteresisFilter::new();
        filter.apply(t0(), None, Condition::Sunny, None);

        let (emitted, _) = filter.apply(
            t0() + Duration::minutes(10),
            Some(Condition::Sunny),
            Condition::Cloudy,
            Some(20.0),
        );
        assert_eq!(emitted, Condition::Sunny, "20 < 25: suppressed");

        let mut filter = HysteresisFilter::new();
        filter.apply(t0(), None, Condition::Sunny, None);
        let (emitted, _) = filter.apply(
            t0() + Duration::minutes(10),
            Some(Condition::Sunny),
            Condition::Cloudy,
            Some(27.0),
        );
        assert_eq!(emitted, Condition::Cloudy, "27 ≥ 25: accepted");
    }

    #[test]
    fn oversized_jump_is_noise_even_when_adjacent() {
        let mut filter = HysteresisFilter::new();
        filter.apply(t0(), None, Condition::PartlyCloudy, None);

        // 45-point raw swing: the adjacent rule would pass (≥15) but the
        // 30-point ceiling keeps the previous condition
        let (emitted, decision) = filter.apply(
            t0() + Duration::minutes(10),
            Some(Condition::PartlyCloudy),
            Condition::Cloudy,
            Some(45.0),
        );
        assert_eq!(emitted, Condition::PartlyCloudy);
        assert_eq!(decision, HysteresisDecision::Suppressed);
    }

    #[test]
    fn major_changes_bypass_everything() {
        let mut filter = HysteresisFilter::new();
        filter.apply(t0(), None, Condition::Sunny, None);

        let (emitted, decision) = filter.apply(
            t0() + Duration::minutes(10),
            Some(Condition::Sunny),
            Condition::LightningRainy,
            Some(0.0),
        );
        assert_eq!(emitted, Condition::LightningRainy);
        assert_eq!(decision, HysteresisDecision::MajorChange);

        // And back again
        let (emitted, _) = filter.apply(
            t0() + Duration::minutes(20),
            Some(Condition::LightningRainy),
            Condition::Fog,
            Some(0.0),
        );
        assert_eq!(emitted, Condition::Fog);
    }

    #[test]
    fn no_period_one_oscillation_on_small_deltas() {
        // Alternating candidates with small deltas must not alternate the
        // emitted condition every update
        let mut filter = HysteresisFilter::new();
        filter.apply(t0(), None, Condition::Sunny, None);

        let mut previous = Condition::Sunny;
        let mut emitted_seq = Vec::new();
        for i in 1..6 {
            let candidate = if i % 2 == 0 {
                Condition::Sunny
            } else {
                Condition::PartlyCloudy
            };
            let (emitted, _) = filter.apply(
                t0() + Duration::minutes(10 * i),
                Some(previous),
                candidate,
                Some(5.0),
            );
            emitted_seq.push(emitted);
            previous = emitted;
        }

        let flips = emitted_seq.windows(2).filter(|w| w[0] != w[1]).count();
        assert!(
            flips <= 1,
            "emitted sequence flip-flopped: {emitted_seq:?}"
        );
    }

    #[test]
    fn history_evicts_beyond_24_hours() {
        let mut filter = HysteresisFilter::new();
        filter.apply(t0(), None, Condition::Sunny, None);
        filter.apply(
            t0() + Duration::hours(25),
            Some(Condition::Sunny),
            Condition::Sunny,
            None,
        );
        assert_eq!(filter.len(), 1);
    }
}
