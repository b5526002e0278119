//! End-of-tick battle evaluation.

use crate::state::{Roster, Side};

/// Result of partitioning the roster by side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Ongoing,
    /// Every ally is down. Takes precedence over a simultaneous enemy wipe.
    AlliesDefeated,
    EnemiesDefeated,
}

pub fn evaluate(roster: &Roster) -> Verdict {
    if roster.is_defeated(Side::Ally) {
        Verdict::AlliesDefeated
    } else if roster.is_defeated(Side::Enemy) {
        Verdict::EnemiesDefeated
    } else {
        Verdict::Ongoing
    }
}
