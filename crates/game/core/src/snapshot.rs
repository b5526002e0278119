//! Read-only view of a running battle for presentation layers.

use crate::state::{RunStatus, Side, StatusEffect, Unit, UnitId};
use crate::stats;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSnapshot {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
    pub hp: u32,
    pub max_hp: u32,
    pub gauge: f64,
    pub attack: u32,
    pub speed: u32,
    pub effects: Vec<StatusEffect>,
}

impl From<&Unit> for UnitSnapshot {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
            side: unit.side,
            hp: unit.hp,
            max_hp: unit.max_hp,
            gauge: unit.gauge,
            attack: stats::effective_attack(unit),
            speed: stats::effective_speed(unit),
            effects: unit.effects.iter().copied().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleSnapshot {
    pub stage: u32,
    pub total_stages: u32,
    pub tick: u64,
    pub round: u64,
    pub status: RunStatus,
    /// Number of log entries so far; pass to `BattleLog::since` to resume.
    pub log_len: usize,
    pub units: Vec<UnitSnapshot>,
}
