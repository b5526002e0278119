//! Multi-stage dungeon run state.

use super::unit::Unit;

/// Lifecycle of a dungeon run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    InProgress,
    Victory,
    Defeat,
}

impl RunStatus {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// An ordered sequence of encounters sharing one ally roster.
///
/// # Invariants
///
/// - `stage` only increases
/// - once `status` is terminal, no further stage advances occur
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DungeonRun {
    /// Current stage, numbered from 0.
    pub stage: u32,
    pub total_stages: u32,
    /// Stage-0 enemies; every later stage is scaled from these base values.
    pub enemy_templates: Vec<Unit>,
    pub status: RunStatus,
}

impl DungeonRun {
    pub fn new(total_stages: u32, enemy_templates: Vec<Unit>) -> Self {
        Self {
            stage: 0,
            total_stages: total_stages.max(1),
            enemy_templates,
            status: RunStatus::InProgress,
        }
    }

    pub fn is_last_stage(&self) -> bool {
        self.stage + 1 >= self.total_stages
    }

    /// Stages fully cleared so far.
    pub fn stages_cleared(&self) -> u32 {
        match self.status {
            RunStatus::Victory => self.total_stages,
            RunStatus::InProgress | RunStatus::Defeat => self.stage,
        }
    }
}
