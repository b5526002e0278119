//! Cumulative per-unit battle statistics.

use std::collections::BTreeMap;

/// Probabilistic rolls tracked with separate attempt/success counters.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RollKind {
    /// 30% family roll of non-basic standard skills.
    GenericStatus,
    Slow,
    Weaken,
    Gust,
    Cleanse,
    /// Multi-hit chance to strike a third target.
    ThirdHit,
}

/// Attempt/success pair for one roll kind.
///
/// Attempts count every invocation; successes only count rolls that landed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollCounter {
    pub attempts: u32,
    pub successes: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitStatistics {
    pub damage_dealt: u64,
    pub damage_received: u64,
    pub healing_done: u64,
    pub healing_received: u64,
    pub rolls: BTreeMap<RollKind, RollCounter>,
}

impl UnitStatistics {
    /// Records one roll and returns its outcome unchanged.
    pub fn record_roll(&mut self, kind: RollKind, success: bool) -> bool {
        let counter = self.rolls.entry(kind).or_default();
        counter.attempts += 1;
        if success {
            counter.successes += 1;
        }
        success
    }

    pub fn roll(&self, kind: RollKind) -> RollCounter {
        self.rolls.get(&kind).copied().unwrap_or_default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempts_and_successes_are_tracked_separately() {
        let mut stats = UnitStatistics::default();
        stats.record_roll(RollKind::Slow, false);
        stats.record_roll(RollKind::Slow, true);
        stats.record_roll(RollKind::Slow, false);

        let slow = stats.roll(RollKind::Slow);
        assert_eq!(slow.attempts, 3);
        assert_eq!(slow.successes, 1);
        assert_eq!(stats.roll(RollKind::Weaken), RollCounter::default());
    }
}
