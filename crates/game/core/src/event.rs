//! Battle event log.
//!
//! Every resolved happening is recorded as a [`BattleEvent`]. The log is
//! append-only; observers poll it with [`BattleLog::since`] using the length
//! they last saw. `Display` renders the human-readable log line.

use core::fmt;

use crate::report::Outcome;
use crate::state::{EffectName, Side, SkillTier, Unit, UnitId};

/// Lightweight reference to a unit as it was when the event happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTag {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
}

impl From<&Unit> for UnitTag {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
            side: unit.side,
        }
    }
}

impl fmt::Display for UnitTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Damage dealt to one target.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hit {
    pub target: UnitTag,
    /// HP actually removed.
    pub damage: u32,
    /// Target HP after the hit.
    pub remaining_hp: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heal {
    pub target: UnitTag,
    /// HP actually restored.
    pub amount: u32,
}

/// One unit's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub actor: UnitTag,
    pub skill: String,
    pub tier: SkillTier,
    /// Primary target first, then extra hits in the order they landed.
    /// Empty for support actions aimed at an ally.
    pub hits: Vec<Hit>,
    pub heal: Option<Heal>,
    /// Ally chosen by a cleanse skill.
    pub support_target: Option<UnitTag>,
}

impl ActionRecord {
    pub fn total_damage(&self) -> u64 {
        self.hits.iter().map(|h| h.damage as u64).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum StatusChange {
    /// A new effect instance was attached.
    Applied { effect: EffectName, turns: u32 },
    /// An existing instance of the same kind was extended.
    Extended { effect: EffectName, turns: u32 },
    /// Damage-over-time ticked on the owner's turn.
    Ticked { effect: EffectName, damage: u32 },
    Expired { effect: EffectName },
    /// Removed by a cleanse before expiring.
    Cleansed { effect: EffectName },
    /// Gauge points knocked off the unit.
    GaugeDrained { amount: f64 },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusRecord {
    pub unit: UnitTag,
    pub source: Option<UnitId>,
    pub change: StatusChange,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum StageChange {
    Cleared,
    Began,
}

/// Closed set of log entries.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum BattleEvent {
    Init {
        total_stages: u32,
        allies: Vec<UnitTag>,
        enemies: Vec<UnitTag>,
    },
    Action(ActionRecord),
    Status(StatusRecord),
    /// At least one unit acted during `tick`.
    Round {
        round: u64,
        tick: u64,
    },
    /// Stage numbers are 0-based.
    Stage {
        stage: u32,
        change: StageChange,
    },
    BattleEnd {
        outcome: Outcome,
        stages_cleared: u32,
    },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init {
                total_stages,
                allies,
                enemies,
            } => write!(
                f,
                "Dungeon run begins: {} allies vs {} enemies, {} stages",
                allies.len(),
                enemies.len(),
                total_stages
            ),
            Self::Action(record) => {
                write!(f, "{} uses {}", record.actor, record.skill)?;
                if let Some(target) = &record.support_target {
                    write!(f, " on {target}")?;
                }
                for (i, hit) in record.hits.iter().enumerate() {
                    let sep = if i == 0 { " on" } else { ", then" };
                    write!(
                        f,
                        "{sep} {} for {} damage ({} HP left)",
                        hit.target, hit.damage, hit.remaining_hp
                    )?;
                }
                if let Some(heal) = &record.heal {
                    write!(f, "; heals {} for {}", heal.target, heal.amount)?;
                }
                Ok(())
            }
            Self::Status(record) => match record.change {
                StatusChange::Applied { effect, turns } => {
                    write!(f, "{} is afflicted by {effect} ({turns} turns)", record.unit)
                }
                StatusChange::Extended { effect, turns } => {
                    write!(f, "{}'s {effect} extends to {turns} turns", record.unit)
                }
                StatusChange::Ticked { effect, damage } => {
                    write!(f, "{} takes {damage} {effect} damage", record.unit)
                }
                StatusChange::Expired { effect } => {
                    write!(f, "{}'s {effect} wears off", record.unit)
                }
                StatusChange::Cleansed { effect } => {
                    write!(f, "{} is cleansed of {effect}", record.unit)
                }
                StatusChange::GaugeDrained { amount } => {
                    write!(f, "{} loses {amount} action gauge", record.unit)
                }
            },
            Self::Round { round, tick } => write!(f, "-- Round {round} (tick {tick}) --"),
            Self::Stage { stage, change } => match change {
                StageChange::Cleared => write!(f, "Stage {} cleared", stage + 1),
                StageChange::Began => write!(f, "Stage {} begins", stage + 1),
            },
            Self::BattleEnd {
                outcome,
                stages_cleared,
            } => write!(f, "Battle over: {outcome} after {stages_cleared} stages cleared"),
        }
    }
}

/// Ordered, append-only event log.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleLog {
    events: Vec<BattleEvent>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        tracing::trace!(index = self.events.len(), %event, "battle event");
        self.events.push(event);
    }

    /// Events recorded at or after `offset`.
    pub fn since(&self, offset: usize) -> &[BattleEvent] {
        self.events.get(offset..).unwrap_or(&[])
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&BattleEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str, id: u32, side: Side) -> UnitTag {
        UnitTag {
            id: UnitId(id),
            name: name.into(),
            side,
        }
    }

    #[test]
    fn action_renders_every_hit() {
        let event = BattleEvent::Action(ActionRecord {
            actor: tag("Ranger", 0, Side::Ally),
            skill: "Volley".into(),
            tier: SkillTier::Advanced,
            hits: vec![
                Hit {
                    target: tag("Imp", 1, Side::Enemy),
                    damage: 30,
                    remaining_hp: 70,
                },
                Hit {
                    target: tag("Bat", 2, Side::Enemy),
                    damage: 30,
                    remaining_hp: 0,
                },
            ],
            heal: None,
            support_target: None,
        });

        assert_eq!(
            event.to_string(),
            "Ranger uses Volley on Imp for 30 damage (70 HP left), then Bat for 30 damage (0 HP left)"
        );
    }

    #[test]
    fn since_returns_only_new_events() {
        let mut log = BattleLog::new();
        log.push(BattleEvent::Round { round: 1, tick: 3 });
        log.push(BattleEvent::Stage {
            stage: 0,
            change: StageChange::Cleared,
        });

        assert_eq!(log.since(1).len(), 1);
        assert!(log.since(2).is_empty());
        assert!(log.since(10).is_empty());
    }

    #[test]
    fn stage_numbers_render_one_based() {
        let event = BattleEvent::Stage {
            stage: 0,
            change: StageChange::Began,
        };
        assert_eq!(event.to_string(), "Stage 1 begins");
    }
}
