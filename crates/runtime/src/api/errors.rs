//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and the engine so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use battle_core::{BattleError, EngineError, ErrorSeverity};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("playback worker command channel closed")]
    CommandChannelClosed,

    #[error("playback worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("playback worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("playback paused with no handle left to resume it")]
    Abandoned,

    #[error("playback speed must be a positive finite number, got {speed}")]
    InvalidSpeed { speed: f64 },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl BattleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) => ErrorSeverity::Recoverable,
            Self::InvalidSpeed { .. } => ErrorSeverity::Validation,
            Self::Abandoned => ErrorSeverity::Internal,
            Self::WorkerJoin(_) => ErrorSeverity::Fatal,
            Self::Engine(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::Abandoned => "RUNTIME_ABANDONED",
            Self::InvalidSpeed { .. } => "RUNTIME_INVALID_SPEED",
            Self::Engine(e) => e.error_code(),
        }
    }
}
