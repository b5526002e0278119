//! Status effect system for units.
//!
//! # Turn-based Duration
//!
//! Effects store their remaining duration in whole turns of the *owner*.
//! Durations only move when the owner's gauge fills, never per global tick;
//! see [`crate::engine::status`] for the lifecycle.
//!
//! # Stacking
//!
//! At most one effect of a given [`StatusEffectKind`] is active on a unit.
//! Reapplying a kind extends the existing instance to the longer of the two
//! durations instead of adding a second instance.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::state::UnitId;

/// Kinds of status effects. Each kind occupies at most one slot per unit.
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
pub enum StatusEffectKind {
    /// HP loss on each of the owner's turns (burn, poison).
    DamageOverTime,
    /// Attack reduced by `magnitude` percent.
    AttackDebuff,
    /// Speed reduced by `magnitude` percent.
    SpeedDebuff,
    /// Gauge gain reduced by `magnitude` percent.
    MeterDrain,
    /// Marks an ally that was just cleansed.
    CleanseTargetMarker,
}

impl StatusEffectKind {
    /// Harmful kinds are stripped from allies between stages and are the
    /// only kinds a cleanse can remove.
    pub const fn is_harmful(self) -> bool {
        !matches!(self, Self::CleanseTargetMarker)
    }
}

/// Display name of an effect instance.
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
pub enum EffectName {
    Burn,
    Poison,
    Weaken,
    Slow,
    Drain,
    Cleansed,
}

/// A single timed effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub name: EffectName,
    pub kind: StatusEffectKind,
    /// Damage per turn for damage-over-time, percentage for debuffs.
    pub magnitude: u32,
    /// Remaining duration in owner turns.
    pub remaining: u32,
    pub source: UnitId,
}

impl StatusEffect {
    pub fn new(
        name: EffectName,
        kind: StatusEffectKind,
        magnitude: u32,
        remaining: u32,
        source: UnitId,
    ) -> Self {
        Self {
            name,
            kind,
            magnitude,
            remaining,
            source,
        }
    }

    pub fn burn(damage_per_turn: u32, turns: u32, source: UnitId) -> Self {
        Self::new(
            EffectName::Burn,
            StatusEffectKind::DamageOverTime,
            damage_per_turn,
            turns,
            source,
        )
    }

    pub fn poison(damage_per_turn: u32, turns: u32, source: UnitId) -> Self {
        Self::new(
            EffectName::Poison,
            StatusEffectKind::DamageOverTime,
            damage_per_turn,
            turns,
            source,
        )
    }

    pub fn weaken(pct: u32, turns: u32, source: UnitId) -> Self {
        Self::new(
            EffectName::Weaken,
            StatusEffectKind::AttackDebuff,
            pct,
            turns,
            source,
        )
    }

    pub fn slow(pct: u32, turns: u32, source: UnitId) -> Self {
        Self::new(
            EffectName::Slow,
            StatusEffectKind::SpeedDebuff,
            pct,
            turns,
            source,
        )
    }

    pub fn cleanse_marker(source: UnitId) -> Self {
        Self::new(
            EffectName::Cleansed,
            StatusEffectKind::CleanseTargetMarker,
            0,
            1,
            source,
        )
    }
}

/// Percentage reductions contributed by active effects, in activation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusModifiers {
    pub attack_less: ArrayVec<u32, { BattleConfig::MAX_STATUS_EFFECTS }>,
    pub speed_less: ArrayVec<u32, { BattleConfig::MAX_STATUS_EFFECTS }>,
    pub gauge_gain_less: ArrayVec<u32, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

/// Result of [`StatusEffects::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// A new instance was appended.
    Added,
    /// An instance of the same kind existed; its duration is now `remaining`.
    Extended { remaining: u32 },
}

/// Active status effects on a unit, in activation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Adds an effect, or extends the existing effect of the same kind to
    /// `max(existing, new)` remaining turns.
    pub fn apply(&mut self, effect: StatusEffect) -> Applied {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.remaining = existing.remaining.max(effect.remaining);
            return Applied::Extended {
                remaining: existing.remaining,
            };
        }

        // One slot per kind, so capacity is never exceeded.
        self.effects.push(effect);
        Applied::Added
    }

    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Number of active instances of `kind` (0 or 1).
    pub fn count(&self, kind: StatusEffectKind) -> usize {
        self.effects.iter().filter(|e| e.kind == kind).count()
    }

    /// Magnitudes of all active effects of `kind`, in activation order.
    pub fn magnitudes(&self, kind: StatusEffectKind) -> impl Iterator<Item = u32> + '_ {
        self.effects
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| e.magnitude)
    }

    /// Collects stat reductions for the stat model and the gauge scheduler.
    pub fn modifiers(&self) -> StatusModifiers {
        StatusModifiers {
            attack_less: self.magnitudes(StatusEffectKind::AttackDebuff).collect(),
            speed_less: self.magnitudes(StatusEffectKind::SpeedDebuff).collect(),
            gauge_gain_less: self.magnitudes(StatusEffectKind::MeterDrain).collect(),
        }
    }

    /// Removes an effect kind immediately, returning it if present.
    pub fn remove(&mut self, kind: StatusEffectKind) -> Option<StatusEffect> {
        let position = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(position))
    }

    /// Decrements every effect by one turn.
    pub fn decrement(&mut self) {
        for effect in self.effects.iter_mut() {
            effect.remaining = effect.remaining.saturating_sub(1);
        }
    }

    /// Removes effects that have run out and returns them in activation order.
    pub fn take_expired(&mut self) -> ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }> {
        let mut expired = ArrayVec::new();
        self.effects.retain(|e| {
            if e.remaining == 0 {
                expired.push(*e);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Strips harmful kinds, keeping beneficial ones.
    pub fn strip_harmful(&mut self) {
        self.effects.retain(|e| !e.kind.is_harmful());
    }

    /// Harmful effects, in activation order.
    pub fn harmful(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter().filter(|e| e.kind.is_harmful())
    }

    pub fn has_harmful(&self) -> bool {
        self.harmful().next().is_some()
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: UnitId = UnitId(9);

    #[test]
    fn reapplying_a_kind_extends_instead_of_stacking() {
        let mut effects = StatusEffects::empty();
        assert_eq!(effects.apply(StatusEffect::weaken(10, 2, SRC)), Applied::Added);
        assert_eq!(
            effects.apply(StatusEffect::weaken(10, 4, SRC)),
            Applied::Extended { remaining: 4 }
        );
        assert_eq!(
            effects.apply(StatusEffect::weaken(10, 1, SRC)),
            Applied::Extended { remaining: 4 }
        );
        assert_eq!(effects.count(StatusEffectKind::AttackDebuff), 1);
    }

    #[test]
    fn burn_and_poison_share_the_damage_over_time_slot() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::burn(40, 2, SRC));
        effects.apply(StatusEffect::poison(40, 3, SRC));

        let dot = effects.get(StatusEffectKind::DamageOverTime).unwrap();
        assert_eq!(dot.name, EffectName::Burn);
        assert_eq!(dot.remaining, 3);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn every_kind_fits() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::burn(1, 1, SRC));
        effects.apply(StatusEffect::weaken(10, 1, SRC));
        effects.apply(StatusEffect::slow(15, 1, SRC));
        effects.apply(StatusEffect::new(
            EffectName::Drain,
            StatusEffectKind::MeterDrain,
            50,
            1,
            SRC,
        ));
        effects.apply(StatusEffect::cleanse_marker(SRC));
        assert_eq!(effects.len(), BattleConfig::MAX_STATUS_EFFECTS);
    }

    #[test]
    fn expiry_happens_once_duration_reaches_zero() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::weaken(10, 1, SRC));
        effects.apply(StatusEffect::slow(15, 2, SRC));

        effects.decrement();
        let expired = effects.take_expired();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].name, EffectName::Weaken);
        assert!(effects.has(StatusEffectKind::SpeedDebuff));
    }

    #[test]
    fn modifiers_split_by_stat() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::slow(15, 2, SRC));
        effects.apply(StatusEffect::weaken(10, 2, SRC));
        effects.apply(StatusEffect::burn(7, 2, SRC));

        let mods = effects.modifiers();
        assert_eq!(mods.attack_less.as_slice(), &[10]);
        assert_eq!(mods.speed_less.as_slice(), &[15]);
        assert!(mods.gauge_gain_less.is_empty());
    }

    #[test]
    fn strip_harmful_keeps_markers() {
        let mut effects = StatusEffects::empty();
        effects.apply(StatusEffect::poison(5, 3, SRC));
        effects.apply(StatusEffect::cleanse_marker(SRC));
        effects.strip_harmful();

        assert_eq!(effects.len(), 1);
        assert!(effects.has(StatusEffectKind::CleanseTargetMarker));
        assert!(!effects.has_harmful());
    }
}
