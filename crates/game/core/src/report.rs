//! Terminal battle result handed to the reporting collaborator.

use crate::state::{Roster, Side, UnitId, UnitStatistics};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Outcome {
    Victory,
    Defeat,
}

/// Final state and cumulative statistics of one unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitReport {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
    pub hp: u32,
    pub max_hp: u32,
    pub statistics: UnitStatistics,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleReport {
    pub outcome: Outcome,
    pub stages_cleared: u32,
    pub total_stages: u32,
    pub ticks: u64,
    pub rounds: u64,
    /// Allies, then the enemies of the final stage.
    pub units: Vec<UnitReport>,
}

impl BattleReport {
    pub(crate) fn new(
        outcome: Outcome,
        stages_cleared: u32,
        total_stages: u32,
        ticks: u64,
        rounds: u64,
        roster: &Roster,
    ) -> Self {
        let units = roster
            .units()
            .iter()
            .map(|u| UnitReport {
                id: u.id,
                name: u.name.clone(),
                side: u.side,
                hp: u.hp,
                max_hp: u.max_hp,
                statistics: u.statistics.clone(),
            })
            .collect();

        Self {
            outcome,
            stages_cleared,
            total_stages,
            ticks,
            rounds,
            units,
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitReport> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn side(&self, side: Side) -> impl Iterator<Item = &UnitReport> {
        self.units.iter().filter(move |u| u.side == side)
    }
}
