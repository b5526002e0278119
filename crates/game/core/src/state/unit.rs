//! Combatant state.
//!
//! # Invariants
//!
//! - `0 <= hp <= max_hp` after every mutation (use [`Unit::take_damage`] and
//!   [`Unit::heal`], never write `hp` directly during a battle)
//! - `0 <= gauge < 100` outside of the scheduler's advance step
//! - `action_counter` only increases

use core::cmp::Ordering;
use core::fmt;

use crate::config::BattleConfig;
use crate::error::RosterError;
use crate::stats;

use super::skill::{SkillSet, SkillTemplate};
use super::statistics::UnitStatistics;
use super::status::StatusEffects;

/// Unique identifier for a unit within a run. Stable across stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

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
pub enum Side {
    Ally,
    Enemy,
}

impl Side {
    pub const fn opposite(self) -> Self {
        match self {
            Self::Ally => Self::Enemy,
            Self::Enemy => Self::Ally,
        }
    }
}

/// Base stat block before aura and status modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseStats {
    pub attack: u32,
    pub vitality: u32,
    pub speed: u32,
}

impl BaseStats {
    /// Substituted for unset stats in malformed or partial unit data.
    pub const DEFAULT_ATTACK: u32 = 10;
    pub const DEFAULT_VITALITY: u32 = 10;
    pub const DEFAULT_SPEED: u32 = 10;

    pub const fn new(attack: u32, vitality: u32, speed: u32) -> Self {
        Self {
            attack,
            vitality,
            speed,
        }
    }
}

impl Default for BaseStats {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_ATTACK,
            Self::DEFAULT_VITALITY,
            Self::DEFAULT_SPEED,
        )
    }
}

/// Percentage bonuses granted by an equipped aura (20 = +20%).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AuraModifier {
    pub attack_pct: i32,
    pub vitality_pct: i32,
    pub speed_pct: i32,
}

/// Unit definition as supplied by the roster collaborator.
///
/// Stats may be missing; skills must at least contain a basic skill.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTemplate {
    pub name: String,
    pub attack: Option<u32>,
    pub vitality: Option<u32>,
    pub speed: Option<u32>,
    pub aura: Option<AuraModifier>,
    pub skills: SkillTemplate,
}

impl UnitTemplate {
    /// Resolves unset stats to their documented defaults.
    pub fn base_stats(&self) -> BaseStats {
        BaseStats::new(
            self.attack.unwrap_or(BaseStats::DEFAULT_ATTACK),
            self.vitality.unwrap_or(BaseStats::DEFAULT_VITALITY),
            self.speed.unwrap_or(BaseStats::DEFAULT_SPEED),
        )
    }
}

/// A combatant instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
    pub hp: u32,
    pub max_hp: u32,
    pub base: BaseStats,
    pub aura: Option<AuraModifier>,
    pub skills: SkillSet,
    /// Number of turns taken; drives skill selection.
    pub action_counter: u32,
    /// Action gauge in `[0, 100)`.
    pub gauge: f64,
    pub effects: StatusEffects,
    pub statistics: UnitStatistics,
}

impl Unit {
    /// Creates a full-HP unit.
    pub fn new(
        id: UnitId,
        name: impl Into<String>,
        side: Side,
        base: BaseStats,
        aura: Option<AuraModifier>,
        skills: SkillSet,
        config: &BattleConfig,
    ) -> Self {
        let max_hp = stats::max_hp(&base, aura.as_ref(), config);
        Self {
            id,
            name: name.into(),
            side,
            hp: max_hp,
            max_hp,
            base,
            aura,
            skills,
            action_counter: 0,
            gauge: 0.0,
            effects: StatusEffects::empty(),
            statistics: UnitStatistics::default(),
        }
    }

    /// Validates a template and builds a full-HP unit from it.
    pub fn from_template(
        id: UnitId,
        side: Side,
        template: &UnitTemplate,
        config: &BattleConfig,
    ) -> Result<Self, RosterError> {
        let basic =
            template
                .skills
                .basic
                .clone()
                .ok_or_else(|| RosterError::MissingBasicSkill {
                    name: template.name.clone(),
                })?;

        let mut skills = SkillSet {
            basic,
            advanced: template.skills.advanced.clone(),
            ultimate: template.skills.ultimate.clone(),
        };

        for skill in [
            Some(&mut skills.basic),
            skills.advanced.as_mut(),
            skills.ultimate.as_mut(),
        ]
        .into_iter()
        .flatten()
        {
            if !skill.multiplier.is_finite() || skill.multiplier < 0.0 {
                return Err(RosterError::InvalidMultiplier {
                    name: template.name.clone(),
                    skill: skill.name.clone(),
                });
            }
            skill.cooldown = skill.cooldown.max(1);
        }

        Ok(Self::new(
            id,
            template.name.clone(),
            side,
            template.base_stats(),
            template.aura,
            skills,
            config,
        ))
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Reduces HP (floored at 0) and records the damage received.
    ///
    /// Returns the HP actually removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.hp);
        self.hp -= applied;
        self.statistics.damage_received += applied as u64;
        applied
    }

    /// Restores HP (capped at max) and records the healing received.
    ///
    /// Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += applied;
        self.statistics.healing_received += applied as u64;
        applied
    }

    /// Lowers the gauge by `amount` points, never below 0.
    pub fn drain_gauge(&mut self, amount: f64) {
        self.gauge = (self.gauge - amount).max(0.0);
    }

    /// Compares HP percentages without division (`max_hp` floored to 1).
    pub fn hp_fraction_cmp(&self, other: &Unit) -> Ordering {
        let lhs = self.hp as u64 * other.max_hp.max(1) as u64;
        let rhs = other.hp as u64 * self.max_hp.max(1) as u64;
        lhs.cmp(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::skill::Skill;

    fn template() -> UnitTemplate {
        UnitTemplate {
            name: "Knight".into(),
            attack: Some(100),
            vitality: Some(80),
            speed: None,
            aura: None,
            skills: SkillTemplate {
                basic: Some(Skill::new("Slash", 1.0)),
                ..SkillTemplate::default()
            },
        }
    }

    #[test]
    fn template_defaults_missing_stats() {
        let unit =
            Unit::from_template(UnitId(0), Side::Ally, &template(), &BattleConfig::default())
                .unwrap();
        assert_eq!(unit.base.speed, BaseStats::DEFAULT_SPEED);
        assert_eq!(unit.max_hp, 800);
        assert_eq!(unit.hp, 800);
        assert_eq!(unit.gauge, 0.0);
    }

    #[test]
    fn template_without_basic_skill_is_rejected() {
        let mut template = template();
        template.skills.basic = None;
        let err = Unit::from_template(UnitId(0), Side::Ally, &template, &BattleConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            RosterError::MissingBasicSkill {
                name: "Knight".into()
            }
        );
    }

    #[test]
    fn negative_multiplier_is_rejected() {
        let mut template = template();
        template.skills.advanced = Some(Skill::new("Backfire", -1.0));
        let err = Unit::from_template(UnitId(0), Side::Ally, &template, &BattleConfig::default())
            .unwrap_err();
        assert!(matches!(err, RosterError::InvalidMultiplier { .. }));
    }

    #[test]
    fn hp_stays_within_bounds() {
        let mut unit =
            Unit::from_template(UnitId(0), Side::Ally, &template(), &BattleConfig::default())
                .unwrap();

        assert_eq!(unit.take_damage(1_000), 800);
        assert_eq!(unit.hp, 0);
        assert!(!unit.is_alive());

        assert_eq!(unit.heal(50), 50);
        assert_eq!(unit.heal(10_000), 750);
        assert_eq!(unit.hp, unit.max_hp);
        assert_eq!(unit.statistics.damage_received, 800);
        assert_eq!(unit.statistics.healing_received, 800);
    }

    #[test]
    fn gauge_drain_never_goes_negative() {
        let mut unit =
            Unit::from_template(UnitId(0), Side::Ally, &template(), &BattleConfig::default())
                .unwrap();
        unit.gauge = 4.0;
        unit.drain_gauge(10.0);
        assert_eq!(unit.gauge, 0.0);
    }

    #[test]
    fn side_string_forms() {
        assert_eq!(Side::Ally.to_string(), "ally");
        assert_eq!(Side::Enemy.opposite(), Side::Ally);
    }
}
