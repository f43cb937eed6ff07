//! Per-phase duration thresholds.

use super::state::Phase;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long the controller stays in each phase before timing out.
///
/// Durations are fixed configuration: the controller reads them and never
/// changes them. In serialized form every field is a whole number of
/// milliseconds, e.g. `green = 30000`.
///
/// # Example
///
/// ```rust
/// use crosswalk::core::{Durations, Phase};
/// use std::time::Duration;
///
/// let durations = Durations::default().with(Phase::Green, Duration::from_secs(5));
/// assert_eq!(durations.threshold(Phase::Green), Duration::from_secs(5));
/// assert_eq!(durations.threshold(Phase::Yellow), Duration::from_secs(3));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Durations {
    #[serde(with = "millis")]
    pub green: Duration,
    #[serde(with = "millis")]
    pub yellow: Duration,
    #[serde(with = "millis")]
    pub red_walk: Duration,
    #[serde(with = "millis")]
    pub red_flash: Duration,
    #[serde(with = "millis")]
    pub red_wait: Duration,
}

impl Default for Durations {
    /// Defaults:
    /// - `green = 30s`
    /// - `yellow = 3s`
    /// - `red_walk = 15s`
    /// - `red_flash = 5s`
    /// - `red_wait = 3s`
    fn default() -> Self {
        Self {
            green: Duration::from_secs(30),
            yellow: Duration::from_secs(3),
            red_walk: Duration::from_secs(15),
            red_flash: Duration::from_secs(5),
            red_wait: Duration::from_secs(3),
        }
    }
}

impl Durations {
    /// Build durations from millisecond values in cycle order.
    pub const fn from_millis(
        green: u64,
        yellow: u64,
        red_walk: u64,
        red_flash: u64,
        red_wait: u64,
    ) -> Self {
        Self {
            green: Duration::from_millis(green),
            yellow: Duration::from_millis(yellow),
            red_walk: Duration::from_millis(red_walk),
            red_flash: Duration::from_millis(red_flash),
            red_wait: Duration::from_millis(red_wait),
        }
    }

    /// Threshold at which `phase` times out.
    pub const fn threshold(&self, phase: Phase) -> Duration {
        match phase {
            Phase::Green => self.green,
            Phase::Yellow => self.yellow,
            Phase::RedWalk => self.red_walk,
            Phase::RedFlash => self.red_flash,
            Phase::RedWait => self.red_wait,
        }
    }

    /// Return a copy with the threshold for `phase` replaced.
    pub fn with(mut self, phase: Phase, duration: Duration) -> Self {
        let slot = match phase {
            Phase::Green => &mut self.green,
            Phase::Yellow => &mut self.yellow,
            Phase::RedWalk => &mut self.red_walk,
            Phase::RedFlash => &mut self.red_flash,
            Phase::RedWait => &mut self.red_wait,
        };
        *slot = duration;
        self
    }

    /// First phase whose threshold is zero, if any.
    pub fn first_zero(&self) -> Option<Phase> {
        Phase::ALL
            .into_iter()
            .find(|phase| self.threshold(*phase).is_zero())
    }

    /// Length of one full cycle, with or without a pedestrian crossing.
    pub fn cycle_length(&self, with_crossing: bool) -> Duration {
        let base = self.green + self.yellow + self.red_wait;
        if with_crossing {
            base + self.red_walk + self.red_flash
        } else {
            base
        }
    }
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
pub fn saturating_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(super::saturating_millis(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
