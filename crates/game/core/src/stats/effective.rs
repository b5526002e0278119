//! Effective stat resolution.
//!
//! ```text
//! effective = floor(base × (100 + aura%) / 100)
//!             then, per active debuff in activation order:
//!             floor(value × (100 − debuff%) / 100)
//! ```

use crate::config::BattleConfig;
use crate::state::{AuraModifier, BaseStats, Unit};

use super::bonus::{Bonus, BonusStack};

/// Builds the bonus stack for one stat: aura first, then debuffs.
fn stack_for(aura_pct: i32, debuffs: &[u32]) -> BonusStack {
    let mut stack = BonusStack::new();
    if aura_pct != 0 {
        stack.add(Bonus::Increased(aura_pct));
    }
    stack.extend(debuffs.iter().copied().map(Bonus::Less));
    stack
}

pub fn effective_attack(unit: &Unit) -> u32 {
    let aura = unit.aura.map_or(0, |a| a.attack_pct);
    let mods = unit.effects.modifiers();
    stack_for(aura, &mods.attack_less).apply(unit.base.attack)
}

pub fn effective_speed(unit: &Unit) -> u32 {
    let aura = unit.aura.map_or(0, |a| a.speed_pct);
    let mods = unit.effects.modifiers();
    stack_for(aura, &mods.speed_less).apply(unit.base.speed)
}

/// Vitality has no debuff kind; only the aura applies.
pub fn effective_vitality(base: &BaseStats, aura: Option<&AuraModifier>) -> u32 {
    let aura = aura.map_or(0, |a| a.vitality_pct);
    stack_for(aura, &[]).apply(base.vitality)
}

/// Max HP from effective vitality, floored to 1.
pub fn max_hp(base: &BaseStats, aura: Option<&AuraModifier>, config: &BattleConfig) -> u32 {
    effective_vitality(base, aura)
        .saturating_mul(config.hp_per_vitality)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Side, Skill, SkillSet, StatusEffect, UnitId};

    fn unit(base: BaseStats, aura: Option<AuraModifier>) -> Unit {
        Unit::new(
            UnitId(1),
            "Tester",
            Side::Ally,
            base,
            aura,
            SkillSet::new(Skill::new("Strike", 1.0)),
            &BattleConfig::default(),
        )
    }

    #[test]
    fn aura_applies_before_debuffs() {
        let aura = AuraModifier {
            attack_pct: 20,
            ..AuraModifier::default()
        };
        let mut unit = unit(BaseStats::new(57, 10, 40), Some(aura));
        assert_eq!(effective_attack(&unit), 68);

        unit.effects.apply(StatusEffect::weaken(10, 2, UnitId(2)));
        assert_eq!(effective_attack(&unit), 61);
    }

    #[test]
    fn speed_debuff_leaves_attack_untouched() {
        let mut unit = unit(BaseStats::new(100, 10, 40), None);
        unit.effects.apply(StatusEffect::slow(15, 2, UnitId(2)));
        assert_eq!(effective_speed(&unit), 34);
        assert_eq!(effective_attack(&unit), 100);
    }

    #[test]
    fn max_hp_scales_with_vitality_aura() {
        let config = BattleConfig::default();
        let base = BaseStats::new(10, 80, 10);
        assert_eq!(max_hp(&base, None, &config), 800);

        let aura = AuraModifier {
            vitality_pct: 15,
            ..AuraModifier::default()
        };
        assert_eq!(max_hp(&base, Some(&aura), &config), 920);
    }

    #[test]
    fn zero_vitality_still_yields_one_hp() {
        let base = BaseStats::new(10, 0, 10);
        assert_eq!(max_hp(&base, None, &BattleConfig::default()), 1);
    }
}
