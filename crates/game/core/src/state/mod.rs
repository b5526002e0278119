//! Battle state types.
//!
//! - [`Unit`]: a combatant with stats, skills, gauge and effects
//! - [`Roster`]: both sides of the current encounter
//! - [`DungeonRun`]: stage progression across encounters

pub mod roster;
pub mod run;
pub mod skill;
pub mod statistics;
pub mod status;
pub mod unit;

pub use roster::Roster;
pub use run::{DungeonRun, RunStatus};
pub use skill::{EffectFamily, Skill, SkillBehavior, SkillSet, SkillTemplate, SkillTier};
pub use statistics::{RollCounter, RollKind, UnitStatistics};
pub use status::{
    Applied, EffectName, StatusEffect, StatusEffectKind, StatusEffects, StatusModifiers,
};
pub use unit::{AuraModifier, BaseStats, Side, Unit, UnitId, UnitTemplate};
