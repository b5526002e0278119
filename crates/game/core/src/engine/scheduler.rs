//! Action gauge scheduling.
//!
//! Every tick each living unit gains `effective_speed / gauge_divisor ×
//! speed_multiplier` gauge points. A unit whose gauge reaches the threshold is
//! ready: its gauge resets to 0 (overflow is discarded) and it acts this tick.
//!
//! Gains are computed from a snapshot of the roster before any gauge moves,
//! so the result does not depend on iteration order. Ready units are returned
//! in roster order, which is the tie-break for simultaneous readiness.

use crate::config::BattleConfig;
use crate::state::{Roster, Unit};
use crate::stats;

/// Gauge points `unit` gains in one tick.
///
/// Active meter-drain effects reduce the gain by their magnitude percent.
/// Non-finite or negative multipliers are treated as 0.
pub fn gauge_gain(unit: &Unit, config: &BattleConfig, speed_multiplier: f64) -> f64 {
    if !unit.is_alive() || !speed_multiplier.is_finite() || speed_multiplier <= 0.0 {
        return 0.0;
    }

    let divisor = config.gauge_divisor.max(1) as f64;
    let base = stats::effective_speed(unit) as f64 / divisor * speed_multiplier;

    unit.effects
        .modifiers()
        .gauge_gain_less
        .iter()
        .fold(base, |gain, pct| gain * (100 - (*pct).min(100)) as f64 / 100.0)
}

/// Advances every living unit's gauge and returns the roster indices of
/// units that became ready, in roster order.
pub fn advance(roster: &mut Roster, config: &BattleConfig, speed_multiplier: f64) -> Vec<usize> {
    let gains: Vec<f64> = roster
        .units()
        .iter()
        .map(|u| gauge_gain(u, config, speed_multiplier))
        .collect();

    let mut ready = Vec::new();
    for (index, gain) in gains.into_iter().enumerate() {
        let Some(unit) = roster.get_mut(index) else {
            continue;
        };
        if !unit.is_alive() {
            continue;
        }

        unit.gauge += gain;
        if unit.gauge >= BattleConfig::GAUGE_THRESHOLD {
            unit.gauge = 0.0;
            ready.push(index);
        }
    }
    ready
}
