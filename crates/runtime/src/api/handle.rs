//! Cloneable façade for steering a running playback.
//!
//! [`DriverHandle`] hides channel plumbing and offers async helpers for
//! playback control, snapshots and event streaming.
use tokio::sync::{broadcast, mpsc, oneshot};

use battle_core::{BattleEvent, BattleSnapshot};

use super::errors::{Result, RuntimeError};
use crate::workers::Command;

/// Client-facing handle to a running playback.
#[derive(Clone)]
pub struct DriverHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<BattleEvent>,
}

impl DriverHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<BattleEvent>,
    ) -> Self {
        Self {
            command_tx,
            event_tx,
        }
    }

    /// Stops delivering ticks. Battle state is left untouched.
    pub async fn pause(&self) -> Result<()> {
        self.send(Command::Pause).await
    }

    pub async fn resume(&self) -> Result<()> {
        self.send(Command::Resume).await
    }

    /// Changes the gauge-gain multiplier applied to every following tick.
    pub async fn set_speed(&self, speed: f64) -> Result<()> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(RuntimeError::InvalidSpeed { speed });
        }
        self.send(Command::SetSpeed(speed)).await
    }

    /// Read-only view of the battle between two ticks.
    pub async fn snapshot(&self) -> Result<BattleSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Snapshot { reply: reply_tx }).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Subscribe to battle events published after this call.
    ///
    /// Events are delivered in log order. A receiver that falls more than the
    /// configured capacity behind gets `RecvError::Lagged`; `BattleSnapshot::log_len`
    /// tells a consumer how far the authoritative log has grown.
    pub fn subscribe(&self) -> broadcast::Receiver<BattleEvent> {
        self.event_tx.subscribe()
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
