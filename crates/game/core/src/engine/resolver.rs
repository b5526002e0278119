//! Skill resolution for a single turn.
//!
//! Order of operations:
//!
//! 1. bump the action counter and select the skill tier
//! 2. pick the primary target (skip the action if none)
//! 3. damage the primary and any extra targets
//! 4. heal, for healing skills
//! 5. log the action
//! 6. roll the skill's status effect
//!
//! Every roll counts an attempt on the actor; successes only count when the
//! roll lands. Effects are attached only to targets still alive.

use arrayvec::ArrayVec;

use crate::combat::{
    calculate_damage, dot_damage, has_additional, lowest_hp_ally, percent_of_max_hp,
    select_additional, select_primary,
};
use crate::config::BattleConfig;
use crate::env::{ActionRolls, RngOracle, RollContext};
use crate::event::{ActionRecord, BattleEvent, BattleLog, Heal, Hit, UnitTag};
use crate::state::{
    EffectFamily, RollKind, Roster, Side, Skill, SkillBehavior, SkillTier, StatusEffect,
    StatusEffectKind, Unit, UnitId,
};
use crate::stats;

use super::status;

const THIRD_HIT_CHANCE: u32 = 25;

const SLOW_CHANCE: u32 = 10;
const SLOW_PCT: u32 = 20;
const SLOW_TURNS: u32 = 1;

const WEAKEN_CHANCE: u32 = 20;
const WEAKEN_PCT: u32 = 10;
const WEAKEN_TURNS: u32 = 2;

const GUST_CHANCE: u32 = 10;
const GUST_DRAIN: f64 = 10.0;

const CLEANSE_CHANCE: u32 = 10;

const GENERIC_WEAKEN_PCT: u32 = 10;
const GENERIC_SLOW_PCT: u32 = 15;
const GENERIC_TURNS: u32 = 2;

const BURN_DEFAULT_TURNS: u32 = 2;
const BURN_MIN_TURNS: u32 = 1;
const BURN_MAX_TURNS: u32 = 3;
const POISON_TURNS: u32 = 3;

/// Everything a turn needs besides the roster.
pub struct ActionContext<'a, R: RngOracle + ?Sized> {
    pub config: &'a BattleConfig,
    pub rolls: ActionRolls<'a, R>,
    pub log: &'a mut BattleLog,
}

/// Resolves the turn of the unit at roster index `actor`.
///
/// Returns `false` if the action was skipped.
pub fn resolve_action<R: RngOracle + ?Sized>(
    roster: &mut Roster,
    actor: usize,
    ctx: &mut ActionContext<'_, R>,
) -> bool {
    let Some(unit) = roster.get_mut(actor) else {
        tracing::warn!(actor, "actor index out of range; action skipped");
        return false;
    };

    unit.action_counter += 1;
    let (tier, skill) = unit.skills.select(unit.action_counter);
    let skill = skill.clone();
    let actor_tag = UnitTag::from(&*unit);
    let side = unit.side;
    let attack = stats::effective_attack(unit);
    let caster_max_hp = unit.max_hp;

    let Some(primary) = select_primary(roster, actor, skill.behavior, &ctx.rolls) else {
        tracing::warn!(
            actor = %actor_tag.id,
            skill = %skill.name,
            "no valid target; action skipped"
        );
        return false;
    };
    let support = roster.get(primary).is_some_and(|u| u.side == side);

    let mut record = ActionRecord {
        actor: actor_tag,
        skill: skill.name.clone(),
        tier,
        hits: Vec::new(),
        heal: None,
        support_target: None,
    };

    if support {
        record.support_target = roster.get(primary).map(UnitTag::from);
    } else {
        let damage = calculate_damage(attack, skill.multiplier);
        record.hits.extend(strike(roster, actor, primary, damage));

        let mut chosen = vec![primary];
        if matches!(skill.behavior, SkillBehavior::MultiHit | SkillBehavior::DualHit) {
            record
                .hits
                .extend(strike_extra(roster, actor, side, &mut chosen, 0, damage, &ctx.rolls));
        }
        if skill.behavior == SkillBehavior::MultiHit
            && chosen.len() > 1
            && has_additional(roster, side, &chosen)
            && roll(
                roster,
                actor,
                RollKind::ThirdHit,
                RollContext::ThirdHit,
                THIRD_HIT_CHANCE,
                &ctx.rolls,
            )
        {
            record
                .hits
                .extend(strike_extra(roster, actor, side, &mut chosen, 1, damage, &ctx.rolls));
        }
    }

    if skill.behavior == SkillBehavior::Heal {
        record.heal = heal_lowest(roster, actor, side, caster_max_hp, ctx.config);
    }

    tracing::debug!(
        actor = %record.actor.id,
        skill = %record.skill,
        %tier,
        damage = record.total_damage(),
        "action resolved"
    );
    ctx.log.push(BattleEvent::Action(record));

    roll_status(roster, actor, primary, support, tier, &skill, ctx);
    true
}

/// Applies `damage` to `target` and credits the actor.
fn strike(roster: &mut Roster, actor: usize, target: usize, damage: u32) -> Option<Hit> {
    let unit = roster.get_mut(target)?;
    let applied = unit.take_damage(damage);
    let hit = Hit {
        target: UnitTag::from(&*unit),
        damage: applied,
        remaining_hp: unit.hp,
    };
    if let Some(attacker) = roster.get_mut(actor) {
        attacker.statistics.damage_dealt += applied as u64;
    }
    Some(hit)
}

/// Draws one more opposing target and strikes it.
fn strike_extra<R: RngOracle + ?Sized>(
    roster: &mut Roster,
    actor: usize,
    side: Side,
    chosen: &mut Vec<usize>,
    draw: u8,
    damage: u32,
    rolls: &ActionRolls<'_, R>,
) -> Option<Hit> {
    let Some(target) = select_additional(roster, side, chosen.as_slice(), draw, rolls) else {
        tracing::debug!(draw, "no extra target left");
        return None;
    };
    chosen.push(target);
    strike(roster, actor, target, damage)
}

/// Heals the most wounded living ally for a share of the caster's max HP.
fn heal_lowest(
    roster: &mut Roster,
    actor: usize,
    side: Side,
    caster_max_hp: u32,
    config: &BattleConfig,
) -> Option<Heal> {
    let target = lowest_hp_ally(roster, side)?;
    let amount = percent_of_max_hp(caster_max_hp, config.heal_pct_of_caster_max_hp);

    let unit = roster.get_mut(target)?;
    let applied = unit.heal(amount);
    let tag = UnitTag::from(&*unit);
    if let Some(caster) = roster.get_mut(actor) {
        caster.statistics.healing_done += applied as u64;
    }
    Some(Heal {
        target: tag,
        amount: applied,
    })
}

/// Rolls a percentage chance and records it on the actor's counters.
fn roll<R: RngOracle + ?Sized>(
    roster: &mut Roster,
    actor: usize,
    kind: RollKind,
    context: RollContext,
    pct: u32,
    rolls: &ActionRolls<'_, R>,
) -> bool {
    let success = rolls.chance(context, pct);
    if let Some(unit) = roster.get_mut(actor) {
        unit.statistics.record_roll(kind, success);
    }
    success
}

fn living(roster: &mut Roster, index: usize) -> Option<&mut Unit> {
    roster.get_mut(index).filter(|u| u.is_alive())
}

fn roll_status<R: RngOracle + ?Sized>(
    roster: &mut Roster,
    actor: usize,
    primary: usize,
    support: bool,
    tier: SkillTier,
    skill: &Skill,
    ctx: &mut ActionContext<'_, R>,
) {
    let Some(source) = roster.get(actor).map(|u| u.id) else {
        return;
    };

    match skill.behavior {
        SkillBehavior::Standard => {
            if tier == SkillTier::Basic || support {
                return;
            }
            let chance = ctx.config.generic_status_chance;
            if !roll(roster, actor, RollKind::GenericStatus, RollContext::StatusChance, chance, &ctx.rolls) {
                return;
            }
            let Some(target) = living(roster, primary) else {
                return;
            };
            let effect = family_effect(skill, target.max_hp, source, ctx);
            status::apply(target, effect, ctx.log);
        }
        SkillBehavior::Slow => {
            if roll(roster, actor, RollKind::Slow, RollContext::StatusChance, SLOW_CHANCE, &ctx.rolls)
                && let Some(target) = living(roster, primary)
            {
                status::apply(target, StatusEffect::slow(SLOW_PCT, SLOW_TURNS, source), ctx.log);
            }
        }
        SkillBehavior::Weaken => {
            if roll(roster, actor, RollKind::Weaken, RollContext::StatusChance, WEAKEN_CHANCE, &ctx.rolls)
                && let Some(target) = living(roster, primary)
            {
                status::apply(
                    target,
                    StatusEffect::weaken(WEAKEN_PCT, WEAKEN_TURNS, source),
                    ctx.log,
                );
            }
        }
        SkillBehavior::Gust => {
            if roll(roster, actor, RollKind::Gust, RollContext::StatusChance, GUST_CHANCE, &ctx.rolls)
                && let Some(target) = living(roster, primary)
            {
                status::drain_gauge(target, GUST_DRAIN, source, ctx.log);
            }
        }
        SkillBehavior::Cleanse => {
            if !support
                || !roll(roster, actor, RollKind::Cleanse, RollContext::StatusChance, CLEANSE_CHANCE, &ctx.rolls)
            {
                return;
            }
            let Some(target) = living(roster, primary) else {
                return;
            };
            let harmful: ArrayVec<StatusEffectKind, { BattleConfig::MAX_STATUS_EFFECTS }> =
                target.effects.harmful().map(|e| e.kind).collect();
            let pick = ctx.rolls.pick(RollContext::CleanseEffect, harmful.len());
            if let Some(&kind) = harmful.get(pick) {
                status::cleanse(target, kind, source, ctx.log);
            }
        }
        SkillBehavior::Heal | SkillBehavior::MultiHit | SkillBehavior::DualHit => {}
    }
}

/// Effect granted by a successful generic roll, by skill family.
fn family_effect<R: RngOracle + ?Sized>(
    skill: &Skill,
    target_max_hp: u32,
    source: UnitId,
    ctx: &ActionContext<'_, R>,
) -> StatusEffect {
    let dot = dot_damage(target_max_hp, ctx.config.dot_pct_of_max_hp);
    match skill.family {
        EffectFamily::Fire => {
            let turns = skill
                .status_duration
                .unwrap_or(BURN_DEFAULT_TURNS)
                .clamp(BURN_MIN_TURNS, BURN_MAX_TURNS);
            StatusEffect::burn(dot, turns, source)
        }
        EffectFamily::Poison => StatusEffect::poison(dot, POISON_TURNS, source),
        EffectFamily::Generic => {
            if ctx.rolls.pick(RollContext::StatusChoice, 2) == 0 {
                StatusEffect::weaken(GENERIC_WEAKEN_PCT, GENERIC_TURNS, source)
            } else {
                StatusEffect::slow(GENERIC_SLOW_PCT, GENERIC_TURNS, source)
            }
        }
    }
}
