//! Playback worker that owns the authoritative [`BattleSimulator`].
//!
//! Delivers ticks on a fixed interval, applies playback commands from
//! [`DriverHandle`](crate::DriverHandle) between ticks, and broadcasts every
//! event the simulator appends to its log.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use battle_core::{
    BattleEvent, BattleReport, BattleSimulator, BattleSnapshot, EngineError, RngOracle,
};

use crate::api::{Result, RuntimeError};

/// Commands that can be sent to the playback worker.
pub enum Command {
    Pause,
    Resume,
    SetSpeed(f64),
    Snapshot {
        reply: oneshot::Sender<BattleSnapshot>,
    },
}

/// Background task driving one dungeon run.
pub struct PlaybackWorker<R: RngOracle> {
    sim: BattleSimulator<R>,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<BattleEvent>,
    tick_period: Duration,
    speed: f64,
    paused: bool,
    /// Log entries already broadcast.
    published: usize,
    commands_open: bool,
}

impl<R: RngOracle> PlaybackWorker<R> {
    pub fn new(
        sim: BattleSimulator<R>,
        command_rx: mpsc::Receiver<Command>,
        event_tx: broadcast::Sender<BattleEvent>,
        tick_period: Duration,
        speed: f64,
        paused: bool,
    ) -> Self {
        Self {
            sim,
            command_rx,
            event_tx,
            tick_period,
            speed,
            paused,
            published: 0,
            commands_open: true,
        }
    }

    /// Main worker loop. Returns once the run reaches a terminal state.
    pub async fn run(mut self) -> Result<BattleReport> {
        info!(
            seed = self.sim.seed(),
            period_ms = self.tick_period.as_millis() as u64,
            speed = self.speed,
            paused = self.paused,
            "playback started"
        );

        if let Some(report) = self.sim.report() {
            self.publish();
            return Ok(report);
        }

        let mut interval = time::interval(self.tick_period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv(), if self.commands_open => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => {
                        debug!("all driver handles dropped; playback continues unattended");
                        self.commands_open = false;
                    }
                },
                _ = interval.tick(), if !self.paused => {
                    if let Some(report) = self.step()? {
                        info!(
                            outcome = %report.outcome,
                            stages_cleared = report.stages_cleared,
                            ticks = report.ticks,
                            "playback finished"
                        );
                        return Ok(report);
                    }
                }
                else => return Err(RuntimeError::Abandoned),
            }
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Pause => {
                debug!(tick = self.sim.ticks(), "playback paused");
                self.paused = true;
            }
            Command::Resume => {
                debug!(tick = self.sim.ticks(), "playback resumed");
                self.paused = false;
            }
            Command::SetSpeed(speed) => {
                debug!(from = self.speed, to = speed, "playback speed changed");
                self.speed = speed;
            }
            Command::Snapshot { reply } => {
                if reply.send(self.sim.snapshot()).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn step(&mut self) -> Result<Option<BattleReport>> {
        let max_ticks = self.sim.config().max_ticks;
        if self.sim.ticks() >= max_ticks {
            return Err(EngineError::TickLimitExceeded { max_ticks }.into());
        }

        let outcome = self.sim.tick(self.speed)?;
        self.publish();

        Ok(if outcome.is_terminal() {
            self.sim.report()
        } else {
            None
        })
    }

    fn publish(&mut self) {
        for event in self.sim.log().since(self.published) {
            // no subscribers is not an error
            let _ = self.event_tx.send(event.clone());
        }
        self.published = self.sim.log().len();
    }
}
