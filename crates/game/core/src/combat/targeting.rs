//! Target selection.
//!
//! Candidate pools are always built in roster order before the uniform pick,
//! so a given roll maps to the same unit on every replay.

use crate::env::{ActionRolls, RngOracle, RollContext};
use crate::state::{Roster, Side, SkillBehavior};

/// Living opposing units, minus `exclude`.
fn opposing_pool(roster: &Roster, actor_side: Side, exclude: &[usize]) -> Vec<usize> {
    roster
        .living(actor_side.opposite())
        .into_iter()
        .filter(|i| !exclude.contains(i))
        .collect()
}

/// Living same-side units carrying at least one harmful effect.
fn cleanse_pool(roster: &Roster, actor_side: Side) -> Vec<usize> {
    roster
        .living(actor_side)
        .into_iter()
        .filter(|&i| roster.get(i).is_some_and(|u| u.effects.has_harmful()))
        .collect()
}

/// Chooses the primary target for `actor`.
///
/// Cleanse skills prefer a debuffed ally and fall back to the opposing side
/// when none qualifies. Returns `None` if the pool is empty.
pub fn select_primary<R: RngOracle + ?Sized>(
    roster: &Roster,
    actor: usize,
    behavior: SkillBehavior,
    rolls: &ActionRolls<'_, R>,
) -> Option<usize> {
    let side = roster.get(actor)?.side;

    let mut pool = Vec::new();
    if behavior == SkillBehavior::Cleanse {
        pool = cleanse_pool(roster, side);
    }
    if pool.is_empty() {
        pool = opposing_pool(roster, side, &[]);
    }

    let pick = rolls.pick(RollContext::PrimaryTarget, pool.len());
    pool.get(pick).copied()
}

/// Draws one more opposing target, excluding those already chosen.
///
/// `draw` separates successive extra hits of the same action.
pub fn select_additional<R: RngOracle + ?Sized>(
    roster: &Roster,
    actor_side: Side,
    chosen: &[usize],
    draw: u8,
    rolls: &ActionRolls<'_, R>,
) -> Option<usize> {
    let pool = opposing_pool(roster, actor_side, chosen);
    let pick = rolls.pick(RollContext::ExtraTarget(draw), pool.len());
    pool.get(pick).copied()
}

/// True if another opposing target is still available after `chosen`.
pub fn has_additional(roster: &Roster, actor_side: Side, chosen: &[usize]) -> bool {
    !opposing_pool(roster, actor_side, chosen).is_empty()
}

/// Living unit on `side` with the lowest HP percentage; roster order breaks ties.
pub fn lowest_hp_ally(roster: &Roster, side: Side) -> Option<usize> {
    roster
        .living(side)
        .into_iter()
        .filter_map(|i| roster.get(i).map(|u| (i, u)))
        .min_by(|(_, a), (_, b)| a.hp_fraction_cmp(b))
        .map(|(i, _)| i)
}
