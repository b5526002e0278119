//! Status effect lifecycle.
//!
//! Effects progress only on their owner's turn:
//!
//! 1. damage-over-time deals its magnitude as damage
//! 2. every effect loses one turn
//! 3. effects at 0 turns are removed and reported as expired
//!
//! On any other tick effects are left untouched.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::event::{BattleEvent, BattleLog, StatusChange, StatusRecord, UnitTag};
use crate::state::{
    Applied, StatusEffect, StatusEffectKind, StatusModifiers, Unit, UnitId,
};

/// Runs one status step for `unit`. No-op unless it is the unit's own turn.
pub fn tick(unit: &mut Unit, is_units_turn: bool, log: &mut BattleLog) {
    if !is_units_turn {
        return;
    }

    let dots: ArrayVec<StatusEffect, { BattleConfig::MAX_STATUS_EFFECTS }> = unit
        .effects
        .iter()
        .filter(|e| e.kind == StatusEffectKind::DamageOverTime)
        .copied()
        .collect();

    for dot in dots {
        let damage = unit.take_damage(dot.magnitude);
        log.push(status_event(
            unit,
            Some(dot.source),
            StatusChange::Ticked {
                effect: dot.name,
                damage,
            },
        ));
    }

    unit.effects.decrement();
    for expired in unit.effects.take_expired() {
        log.push(status_event(
            unit,
            Some(expired.source),
            StatusChange::Expired {
                effect: expired.name,
            },
        ));
    }
}

/// Attaches `effect`, or extends the existing effect of the same kind.
pub fn apply(target: &mut Unit, effect: StatusEffect, log: &mut BattleLog) -> Applied {
    let applied = target.effects.apply(effect);
    let change = match applied {
        Applied::Added => StatusChange::Applied {
            effect: effect.name,
            turns: effect.remaining,
        },
        Applied::Extended { remaining } => StatusChange::Extended {
            effect: target
                .effects
                .get(effect.kind)
                .map_or(effect.name, |e| e.name),
            turns: remaining,
        },
    };
    log.push(status_event(target, Some(effect.source), change));
    applied
}

/// Removes one harmful effect kind and marks the unit as cleansed.
pub fn cleanse(
    target: &mut Unit,
    kind: StatusEffectKind,
    source: UnitId,
    log: &mut BattleLog,
) -> Option<StatusEffect> {
    if !kind.is_harmful() {
        return None;
    }
    let removed = target.effects.remove(kind)?;
    target.effects.apply(StatusEffect::cleanse_marker(source));
    log.push(status_event(
        target,
        Some(source),
        StatusChange::Cleansed {
            effect: removed.name,
        },
    ));
    Some(removed)
}

/// Knocks `amount` points off the target's action gauge.
pub fn drain_gauge(target: &mut Unit, amount: f64, source: UnitId, log: &mut BattleLog) {
    target.drain_gauge(amount);
    log.push(status_event(
        target,
        Some(source),
        StatusChange::GaugeDrained { amount },
    ));
}

/// Stat reductions the stat model combines with aura bonuses.
pub fn modifiers(unit: &Unit) -> StatusModifiers {
    unit.effects.modifiers()
}

fn status_event(unit: &Unit, source: Option<UnitId>, change: StatusChange) -> BattleEvent {
    BattleEvent::Status(StatusRecord {
        unit: UnitTag::from(unit),
        source,
        change,
    })
}
