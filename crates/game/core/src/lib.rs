//! Deterministic turn-based combat engine for dungeon runs.
//!
//! `battle-core` defines the canonical combat rules (gauge scheduling, skill
//! resolution, status effects, stage progression) as pure, synchronous APIs
//! with no I/O. All battle state mutation flows through
//! [`engine::BattleSimulator`]; every random decision is drawn from an
//! injectable [`env::RngOracle`], so a run is reproducible from its seed.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod event;
pub mod report;
pub mod snapshot;
pub mod state;
pub mod stats;

pub use config::BattleConfig;
pub use engine::{BattleSimulator, EngineError, TickOutcome};
pub use env::{PcgRng, RngOracle};
pub use error::{BattleError, ErrorSeverity, RosterError};
pub use event::{
    ActionRecord, BattleEvent, BattleLog, Heal, Hit, StageChange, StatusChange, StatusRecord,
    UnitTag,
};
pub use report::{BattleReport, Outcome, UnitReport};
pub use snapshot::{BattleSnapshot, UnitSnapshot};
pub use state::{
    AuraModifier, BaseStats, DungeonRun, EffectFamily, EffectName, RollCounter, RollKind, Roster,
    RunStatus, Side, Skill, SkillBehavior, SkillSet, SkillTemplate, SkillTier, StatusEffect,
    StatusEffectKind, Unit, UnitId, UnitStatistics, UnitTemplate,
};
pub use stats::{effective_attack, effective_speed};
