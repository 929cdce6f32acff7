//! Weather condition vocabulary
//!
//! The closed set of conditions the inference pipeline can emit. The
//! variants map one-to-one onto the condition strings home-automation
//! platforms expect, so the serde names are the wire format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A classified weather condition.
///
/// This is a closed vocabulary: the classifier and the forecast engine only
/// ever produce these twelve values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Clear daytime sky
    Sunny,
    /// Scattered daytime cloud
    PartlyCloudy,
    /// Broken to overcast cloud
    Cloudy,
    /// Clear nighttime sky
    ClearNight,
    /// Scattered nighttime cloud
    PartlyCloudyNight,
    /// Fog or dense mist
    Fog,
    /// Light to moderate rain
    Rainy,
    /// Heavy rain
    Pouring,
    /// Snow or wintry precipitation
    Snowy,
    /// Thunderstorm without measurable precipitation
    Lightning,
    /// Thunderstorm with precipitation
    LightningRainy,
    /// Sustained strong wind
    Windy,
}

impl Condition {
    /// Every member of the vocabulary, in declaration order.
    pub const ALL: [Condition; 12] = [
        Condition::Sunny,
        Condition::PartlyCloudy,
        Condition::Cloudy,
        Condition::ClearNight,
        Condition::PartlyCloudyNight,
        Condition::Fog,
        Condition::Rainy,
        Condition::Pouring,
        Condition::Snowy,
        Condition::Lightning,
        Condition::LightningRainy,
        Condition::Windy,
    ];

    /// The wire-format name (matches the serde representation).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Sunny => "sunny",
            Condition::PartlyCloudy => "partly_cloudy",
            Condition::Cloudy => "cloudy",
            Condition::ClearNight => "clear_night",
            Condition::PartlyCloudyNight => "partly_cloudy_night",
            Condition::Fog => "fog",
            Condition::Rainy => "rainy",
            Condition::Pouring => "pouring",
            Condition::Snowy => "snowy",
            Condition::Lightning => "lightning",
            Condition::LightningRainy => "lightning_rainy",
            Condition::Windy => "windy",
        }
    }

    /// True for the calm/clear side of the major-change partition.
    #[must_use]
    pub fn is_tranquil(self) -> bool {
        matches!(
            self,
            Condition::Sunny | Condition::ClearNight | Condition::Fog
        )
    }

    /// True for the severe side of the major-change partition.
    #[must_use]
    pub fn is_severe(self) -> bool {
        matches!(
            self,
            Condition::LightningRainy
                | Condition::Pouring
                | Condition::Snowy
                | Condition::Lightning
                | Condition::Windy
        )
    }

    /// True when the condition implies active precipitation.
    #[must_use]
    pub fn is_precipitating(self) -> bool {
        matches!(
            self,
            Condition::Rainy | Condition::Pouring | Condition::Snowy | Condition::LightningRainy
        )
    }

    /// Cloud-cover tier index for hysteresis adjacency: sunny-like = 0,
    /// partly cloudy = 1, cloudy = 2. `None` for conditions outside the
    /// cloud ladder.
    #[must_use]
    pub fn cloud_tier(self) -> Option<u8> {
        match self {
            Condition::Sunny | Condition::ClearNight => Some(0),
            Condition::PartlyCloudy | Condition::PartlyCloudyNight => Some(1),
            Condition::Cloudy => Some(2),
            _ => None,
        }
    }

    /// Nighttime rendering of a daytime condition (sunny → clear_night,
    /// partly_cloudy → partly_cloudy_night); weather conditions pass
    /// through unchanged.
    #[must_use]
    pub fn night_equivalent(self) -> Condition {
        match self {
            Condition::Sunny => Condition::ClearNight,
            Condition::PartlyCloudy => Condition::PartlyCloudyNight,
            other => other,
        }
    }

    /// Daytime rendering of a nighttime condition.
    #[must_use]
    pub fn day_equivalent(self) -> Condition {
        match self {
            Condition::ClearNight => Condition::Sunny,
            Condition::PartlyCloudyNight => Condition::PartlyCloudy,
            other => other,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moisture sensor state: a simple wet/dry contact reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainState {
    /// Sensor surface is wet
    Wet,
    /// Sensor surface is dry
    Dry,
}

impl Default for RainState {
    fn default() -> Self {
        RainState::Dry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_snake_case() {
        assert_eq!(Condition::PartlyCloudyNight.as_str(), "partly_cloudy_night");
        assert_eq!(Condition::LightningRainy.as_str(), "lightning_rainy");

        let json = serde_json::to_string(&Condition::ClearNight).unwrap();
        assert_eq!(json, "\"clear_night\"");
    }

    #[test]
    fn severity_partition_is_disjoint() {
        for c in Condition::ALL {
            assert!(
                !(c.is_tranquil() && c.is_severe()),
                "{c} cannot be both tranquil and severe"
            );
        }
    }

    #[test]
    fn night_day_mapping_round_trips_cloud_ladder() {
        assert_eq!(
            Condition::Sunny.night_equivalent().day_equivalent(),
            Condition::Sunny
        );
        assert_eq!(
            Condition::PartlyCloudy.night_equivalent(),
            Condition::PartlyCloudyNight
        );
        // Weather passes through untouched
        assert_eq!(Condition::Pouring.night_equivalent(), Condition::Pouring);
    }

    #[test]
    fn cloud_tiers() {
        assert_eq!(Condition::Sunny.cloud_tier(), Some(0));
        assert_eq!(Condition::Cloudy.cloud_tier(), Some(2));
        assert_eq!(Condition::Fog.cloud_tier(), None);
    }
}
