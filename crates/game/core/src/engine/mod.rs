//! Battle simulation.
//!
//! [`BattleSimulator`] is the authoritative owner of a dungeon run: the roster,
//! the stage state and the event log. An external driver calls
//! [`BattleSimulator::tick`] at a fixed period; each tick runs as one logical
//! step:
//!
//! 1. advance gauges and collect ready units ([`scheduler`])
//! 2. for each ready unit in roster order: status step ([`status`]), then
//!    skill resolution ([`resolver`])
//! 3. evaluate the roster once every action has landed ([`evaluator`])
//! 4. finish the run or roll forward to the next stage ([`progression`])

mod errors;
pub mod evaluator;
pub mod progression;
pub mod resolver;
pub mod scheduler;
pub mod status;

pub use errors::EngineError;
pub use evaluator::Verdict;
pub use progression::Advance;
pub use resolver::ActionContext;

use crate::config::BattleConfig;
use crate::env::{ActionRolls, PcgRng, RngOracle};
use crate::error::RosterError;
use crate::event::{BattleEvent, BattleLog, UnitTag};
use crate::report::{BattleReport, Outcome};
use crate::snapshot::{BattleSnapshot, UnitSnapshot};
use crate::state::{DungeonRun, Roster, RunStatus, Side, Unit, UnitId, UnitTemplate};

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TickOutcome {
    Continue,
    /// Stage `stage` was cleared and the next stage has begun.
    StageCleared { stage: u32 },
    Victory,
    Defeat,
}

impl TickOutcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// Deterministic battle engine for one dungeon run.
pub struct BattleSimulator<R: RngOracle = PcgRng> {
    config: BattleConfig,
    rng: R,
    seed: u64,
    /// Resolved actions so far; feeds roll seeds.
    nonce: u64,
    tick: u64,
    round: u64,
    roster: Roster,
    run: DungeonRun,
    log: BattleLog,
}

impl BattleSimulator<PcgRng> {
    /// Builds a run from unit templates using the default PCG oracle.
    ///
    /// Allies get ids `0..allies.len()`, enemies the ids after them.
    pub fn new(
        config: BattleConfig,
        allies: &[UnitTemplate],
        enemies: &[UnitTemplate],
        seed: u64,
    ) -> Result<Self, RosterError> {
        Self::with_rng(config, allies, enemies, seed, PcgRng)
    }
}

impl<R: RngOracle> BattleSimulator<R> {
    pub fn with_rng(
        config: BattleConfig,
        allies: &[UnitTemplate],
        enemies: &[UnitTemplate],
        seed: u64,
        rng: R,
    ) -> Result<Self, RosterError> {
        let build = |offset: usize, side: Side, templates: &[UnitTemplate]| {
            templates
                .iter()
                .enumerate()
                .map(|(i, t)| Unit::from_template(UnitId((offset + i) as u32), side, t, &config))
                .collect::<Result<Vec<_>, _>>()
        };
        let allies = build(0, Side::Ally, allies)?;
        let enemies = build(allies.len(), Side::Enemy, enemies)?;
        Self::from_units(config, allies, enemies, seed, rng)
    }

    /// Builds a run from already constructed units.
    ///
    /// `enemies` are the stage-0 enemies and the templates for later stages.
    pub fn from_units(
        config: BattleConfig,
        allies: Vec<Unit>,
        enemies: Vec<Unit>,
        seed: u64,
        rng: R,
    ) -> Result<Self, RosterError> {
        let run = DungeonRun::new(config.total_stages, enemies.clone());
        let roster = Roster::new(allies, enemies)?;

        let mut log = BattleLog::new();
        log.push(BattleEvent::Init {
            total_stages: run.total_stages,
            allies: roster.allies().iter().map(UnitTag::from).collect(),
            enemies: roster.enemies().iter().map(UnitTag::from).collect(),
        });
        log.push(BattleEvent::Stage {
            stage: 0,
            change: crate::event::StageChange::Began,
        });

        tracing::info!(
            seed,
            allies = roster.allies().len(),
            enemies = roster.enemies().len(),
            stages = run.total_stages,
            "dungeon run created"
        );

        Ok(Self {
            config,
            rng,
            seed,
            nonce: 0,
            tick: 0,
            round: 0,
            roster,
            run,
            log,
        })
    }

    /// Runs one discrete tick.
    ///
    /// `speed_multiplier` scales gauge gain for this tick only.
    pub fn tick(&mut self, speed_multiplier: f64) -> Result<TickOutcome, EngineError> {
        if let Some(outcome) = self.outcome() {
            return Err(EngineError::RunFinished { outcome });
        }

        self.tick += 1;
        let ready = scheduler::advance(&mut self.roster, &self.config, speed_multiplier);
        if !ready.is_empty() {
            self.round += 1;
            self.log.push(BattleEvent::Round {
                round: self.round,
                tick: self.tick,
            });
        }

        for index in ready {
            self.take_turn(index);
        }

        Ok(self.end_of_tick())
    }

    /// Ticks at 1× speed until the run finishes.
    pub fn run_to_completion(&mut self) -> Result<BattleReport, EngineError> {
        loop {
            if let Some(report) = self.report() {
                return Ok(report);
            }
            if self.tick >= self.config.max_ticks {
                tracing::warn!(max_ticks = self.config.max_ticks, "tick limit reached");
                return Err(EngineError::TickLimitExceeded {
                    max_ticks: self.config.max_ticks,
                });
            }
            self.tick(1.0)?;
        }
    }

    fn take_turn(&mut self, index: usize) {
        let Some(unit) = self.roster.get_mut(index) else {
            return;
        };
        if !unit.is_alive() {
            tracing::warn!(unit = %unit.id, "defeated before acting; turn skipped");
            return;
        }

        status::tick(unit, true, &mut self.log);
        if !unit.is_alive() {
            tracing::warn!(unit = %unit.id, "defeated by status damage; turn skipped");
            return;
        }

        self.nonce += 1;
        let actor = unit.id;
        let mut ctx = ActionContext {
            config: &self.config,
            rolls: ActionRolls::new(&self.rng, self.seed, self.nonce, actor),
            log: &mut self.log,
        };
        resolver::resolve_action(&mut self.roster, index, &mut ctx);
    }

    fn end_of_tick(&mut self) -> TickOutcome {
        match evaluator::evaluate(&self.roster) {
            Verdict::Ongoing => TickOutcome::Continue,
            Verdict::AlliesDefeated => {
                self.finish(Outcome::Defeat);
                TickOutcome::Defeat
            }
            Verdict::EnemiesDefeated => {
                match progression::advance(&mut self.run, &mut self.roster, &self.config, &mut self.log) {
                    Advance::Final => {
                        self.finish(Outcome::Victory);
                        TickOutcome::Victory
                    }
                    Advance::NextStage { cleared } => TickOutcome::StageCleared { stage: cleared },
                }
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.run.status = match outcome {
            Outcome::Victory => RunStatus::Victory,
            Outcome::Defeat => RunStatus::Defeat,
        };
        let stages_cleared = self.run.stages_cleared();
        tracing::info!(%outcome, stages_cleared, ticks = self.tick, "dungeon run finished");
        self.log.push(BattleEvent::BattleEnd {
            outcome,
            stages_cleared,
        });
    }

    /// Terminal outcome, once the run has finished.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.run.status {
            RunStatus::InProgress => None,
            RunStatus::Victory => Some(Outcome::Victory),
            RunStatus::Defeat => Some(Outcome::Defeat),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.run.status.is_terminal()
    }

    /// Final report, once the run has finished.
    pub fn report(&self) -> Option<BattleReport> {
        let outcome = self.outcome()?;
        Some(BattleReport::new(
            outcome,
            self.run.stages_cleared(),
            self.run.total_stages,
            self.tick,
            self.round,
            &self.roster,
        ))
    }

    pub fn snapshot(&self) -> BattleSnapshot {
        BattleSnapshot {
            stage: self.run.stage,
            total_stages: self.run.total_stages,
            tick: self.tick,
            round: self.round,
            status: self.run.status,
            log_len: self.log.len(),
            units: self.roster.units().iter().map(UnitSnapshot::from).collect(),
        }
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn run(&self) -> &DungeonRun {
        &self.run
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn rounds(&self) -> u64 {
        self.round
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Skill, SkillTemplate};

    fn template(name: &str, attack: u32, vitality: u32, speed: u32) -> UnitTemplate {
        UnitTemplate {
            name: name.into(),
            attack: Some(attack),
            vitality: Some(vitality),
            speed: Some(speed),
            aura: None,
            skills: SkillTemplate {
                basic: Some(Skill::new("Strike", 1.0)),
                ..SkillTemplate::default()
            },
        }
    }

    #[test]
    fn construction_assigns_sequential_ids_and_logs_init() {
        let sim = BattleSimulator::new(
            BattleConfig::default(),
            &[template("A", 10, 10, 10), template("B", 10, 10, 10)],
            &[template("E", 10, 10, 10)],
            1,
        )
        .unwrap();

        let ids: Vec<u32> = sim.roster().units().iter().map(|u| u.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert!(matches!(sim.log().events()[0], BattleEvent::Init { .. }));
        assert_eq!(sim.snapshot().status, RunStatus::InProgress);
    }

    #[test]
    fn missing_basic_skill_is_rejected() {
        let mut broken = template("Broken", 10, 10, 10);
        broken.skills.basic = None;
        let result = BattleSimulator::new(BattleConfig::default(), &[broken], &[template("E", 1, 1, 1)], 1);
        assert!(matches!(result, Err(RosterError::MissingBasicSkill { .. })));
    }

    #[test]
    fn ticking_a_finished_run_is_an_error() {
        let mut sim = BattleSimulator::new(
            BattleConfig::with_total_stages(1),
            &[template("Hero", 1_000, 100, 40)],
            &[template("Rat", 1, 1, 1)],
            5,
        )
        .unwrap();

        let report = sim.run_to_completion().unwrap();
        assert_eq!(report.outcome, Outcome::Victory);
        assert_eq!(report.stages_cleared, 1);
        assert_eq!(
            sim.tick(1.0),
            Err(EngineError::RunFinished {
                outcome: Outcome::Victory
            })
        );
    }

    #[test]
    fn stalemate_hits_tick_limit() {
        let config = BattleConfig {
            max_ticks: 500,
            ..BattleConfig::default()
        };
        let mut sim = BattleSimulator::new(
            config,
            &[template("Statue", 10, 10, 0)],
            &[template("Statue", 10, 10, 0)],
            5,
        )
        .unwrap();

        assert_eq!(
            sim.run_to_completion(),
            Err(EngineError::TickLimitExceeded { max_ticks: 500 })
        );
    }
}
