//! Entry point for real-time playback.

use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use battle_core::{BattleEvent, BattleReport, BattleSimulator, RngOracle};

use crate::api::{DriverHandle, Result, RuntimeError};
use crate::workers::PlaybackWorker;

/// Playback settings.
#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    /// Wall-clock time between ticks. Clamped to at least one millisecond.
    pub tick_period: Duration,
    /// Initial gauge-gain multiplier.
    pub speed: f64,
    /// Start without delivering ticks until `resume` is called, so that
    /// subscribers can attach before the first event.
    pub start_paused: bool,
    /// Events a slow subscriber may fall behind before it lags.
    pub event_capacity: usize,
    pub command_capacity: usize,
}

impl PlaybackConfig {
    pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(100);
    pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);
    pub const DEFAULT_EVENT_CAPACITY: usize = 1024;
    pub const DEFAULT_COMMAND_CAPACITY: usize = 32;
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            tick_period: Self::DEFAULT_TICK_PERIOD,
            speed: 1.0,
            start_paused: false,
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
            command_capacity: Self::DEFAULT_COMMAND_CAPACITY,
        }
    }
}

/// A dungeon run playing on a background tokio task.
pub struct BattleDriver {
    handle: DriverHandle,
    worker: JoinHandle<Result<BattleReport>>,
}

impl BattleDriver {
    /// Moves `sim` onto a new task and starts ticking it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<R>(sim: BattleSimulator<R>, config: PlaybackConfig) -> Result<Self>
    where
        R: RngOracle + Send + 'static,
    {
        if !config.speed.is_finite() || config.speed <= 0.0 {
            return Err(RuntimeError::InvalidSpeed {
                speed: config.speed,
            });
        }

        let (command_tx, command_rx) = mpsc::channel(config.command_capacity.max(1));
        let (event_tx, _) = broadcast::channel(config.event_capacity.max(1));

        let worker = PlaybackWorker::new(
            sim,
            command_rx,
            event_tx.clone(),
            config.tick_period.max(PlaybackConfig::MIN_TICK_PERIOD),
            config.speed,
            config.start_paused,
        );
        let worker = tokio::spawn(worker.run());

        Ok(Self {
            handle: DriverHandle::new(command_tx, event_tx),
            worker,
        })
    }

    /// Cloneable handle for controlling the playback from other tasks.
    pub fn handle(&self) -> DriverHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BattleEvent> {
        self.handle.subscribe()
    }

    /// Waits for the run to finish and returns its report.
    ///
    /// Dropping the driver's own handle here means a playback left paused with
    /// no other handle alive fails with [`RuntimeError::Abandoned`] instead of
    /// hanging.
    pub async fn wait(self) -> Result<BattleReport> {
        let Self { handle, worker } = self;
        drop(handle);
        worker.await.map_err(RuntimeError::WorkerJoin)?
    }
}
