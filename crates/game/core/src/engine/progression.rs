//! Stage progression across a dungeon run.
//!
//! Enemies of stage `N` are rebuilt from the stage-0 templates with
//! `round(base × (1 + N × stat%))` for attack, vitality and max HP and
//! `round(base × (1 + N × speed%))` for speed. Allies carry their HP over
//! unchanged, lose harmful effects and keep at most 95 gauge.

use crate::config::BattleConfig;
use crate::event::{BattleEvent, BattleLog, StageChange};
use crate::state::{DungeonRun, Roster, Unit};
use crate::stats::scale_rounded;

/// What clearing the current enemy side leads to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// The final stage was cleared.
    Final,
    /// The run moved from `cleared` to `cleared + 1`.
    NextStage { cleared: u32 },
}

/// Builds a fresh enemy for `stage` from its stage-0 template.
pub fn scale_enemy(template: &Unit, stage: u32, config: &BattleConfig) -> Unit {
    let stat_pct = config.stat_scaling_pct.saturating_mul(stage);
    let speed_pct = config.speed_scaling_pct.saturating_mul(stage);

    let mut unit = template.clone();
    unit.base.attack = scale_rounded(template.base.attack, stat_pct);
    unit.base.vitality = scale_rounded(template.base.vitality, stat_pct);
    unit.base.speed = scale_rounded(template.base.speed, speed_pct);
    unit.max_hp = scale_rounded(template.max_hp, stat_pct).max(1);
    unit.hp = unit.max_hp;
    unit.gauge = 0.0;
    unit.action_counter = 0;
    unit.effects.clear();
    unit.statistics.reset();
    unit
}

/// Resets an ally between stages. HP is never restored.
pub fn carry_over_ally(ally: &mut Unit, config: &BattleConfig) {
    ally.effects.strip_harmful();
    ally.gauge = ally.gauge.min(config.carryover_gauge_cap);
}

/// Handles an enemy-side clear.
///
/// On the final stage nothing changes and [`Advance::Final`] is returned.
/// Otherwise logs the cleared stage, rebuilds the enemies for the next stage,
/// carries the allies over and logs the new stage.
pub fn advance(
    run: &mut DungeonRun,
    roster: &mut Roster,
    config: &BattleConfig,
    log: &mut BattleLog,
) -> Advance {
    if run.is_last_stage() {
        return Advance::Final;
    }

    let cleared = run.stage;
    log.push(BattleEvent::Stage {
        stage: cleared,
        change: StageChange::Cleared,
    });

    run.stage += 1;
    let enemies = run
        .enemy_templates
        .iter()
        .map(|t| scale_enemy(t, run.stage, config))
        .collect();
    roster.replace_enemies(enemies);
    for ally in roster.allies_mut() {
        carry_over_ally(ally, config);
    }

    tracing::debug!(cleared, next = run.stage, "stage advanced");
    log.push(BattleEvent::Stage {
        stage: run.stage,
        change: StageChange::Began,
    });

    Advance::NextStage { cleared }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BaseStats, Side, Skill, SkillSet, StatusEffect, UnitId, UnitStatistics};

    fn unit(id: u32, side: Side, base: BaseStats) -> Unit {
        Unit::new(
            UnitId(id),
            format!("u{id}"),
            side,
            base,
            None,
            SkillSet::new(Skill::new("Strike", 1.0)),
            &BattleConfig::default(),
        )
    }

    #[test]
    fn enemy_stats_scale_from_stage_zero() {
        let config = BattleConfig::default();
        let template = unit(1, Side::Enemy, BaseStats::new(50, 25, 40));

        let stage1 = scale_enemy(&template, 1, &config);
        assert_eq!(stage1.base.attack, 56);
        assert_eq!(stage1.base.vitality, 28);
        assert_eq!(stage1.base.speed, 42);
        assert_eq!(stage1.max_hp, 280);

        // always from the template, never compounded
        let stage3 = scale_enemy(&template, 3, &config);
        assert_eq!(stage3.base.attack, 68);
        assert_eq!(stage3.base.speed, 46);
        assert_eq!(stage3.max_hp, 340);
    }

    #[test]
    fn scaled_enemies_start_fresh() {
        let config = BattleConfig::default();
        let mut template = unit(1, Side::Enemy, BaseStats::default());
        template.hp = 3;
        template.gauge = 80.0;
        template.statistics.damage_dealt = 99;
        template.effects.apply(StatusEffect::slow(15, 2, UnitId(0)));

        let fresh = scale_enemy(&template, 2, &config);
        assert_eq!(fresh.hp, fresh.max_hp);
        assert_eq!(fresh.gauge, 0.0);
        assert_eq!(fresh.statistics, UnitStatistics::default());
        assert!(fresh.effects.is_empty());
    }

    #[test]
    fn advance_carries_allies_without_healing() {
        let config = BattleConfig::with_total_stages(3);
        let mut ally = unit(0, Side::Ally, BaseStats::default());
        ally.hp = 12;
        ally.gauge = 99.5;
        ally.effects.apply(StatusEffect::poison(5, 3, UnitId(1)));
        ally.effects.apply(StatusEffect::cleanse_marker(UnitId(0)));

        let template = unit(1, Side::Enemy, BaseStats::new(50, 10, 10));
        let mut run = DungeonRun::new(config.total_stages, vec![template.clone()]);
        let mut roster = Roster::new(vec![ally], vec![template]).unwrap();
        roster.get_mut(1).unwrap().hp = 0;
        let mut log = BattleLog::new();

        assert_eq!(
            advance(&mut run, &mut roster, &config, &mut log),
            Advance::NextStage { cleared: 0 }
        );
        assert_eq!(run.stage, 1);

        let ally = roster.get(0).unwrap();
        assert_eq!(ally.hp, 12);
        assert_eq!(ally.gauge, 95.0);
        assert!(!ally.effects.has_harmful());
        assert_eq!(ally.effects.len(), 1);

        let enemy = roster.get(1).unwrap();
        assert_eq!(enemy.base.attack, 56);
        assert!(enemy.is_alive());

        assert_eq!(
            log.events(),
            &[
                BattleEvent::Stage {
                    stage: 0,
                    change: StageChange::Cleared
                },
                BattleEvent::Stage {
                    stage: 1,
                    change: StageChange::Began
                },
            ]
        );
    }

    #[test]
    fn final_stage_does_not_advance() {
        let config = BattleConfig::with_total_stages(1);
        let template = unit(1, Side::Enemy, BaseStats::default());
        let mut run = DungeonRun::new(1, vec![template.clone()]);
        let mut roster =
            Roster::new(vec![unit(0, Side::Ally, BaseStats::default())], vec![template]).unwrap();
        let mut log = BattleLog::new();

        assert_eq!(advance(&mut run, &mut roster, &config, &mut log), Advance::Final);
        assert_eq!(run.stage, 0);
        assert!(log.is_empty());
    }
}
