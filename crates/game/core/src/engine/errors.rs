//! Error types for battle simulation.

use crate::error::{BattleError, ErrorSeverity};
use crate::report::Outcome;

/// Errors surfaced while driving a battle.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    #[error("battle did not finish within {max_ticks} ticks")]
    TickLimitExceeded { max_ticks: u64 },

    #[error("battle already finished with {outcome}")]
    RunFinished { outcome: Outcome },
}

impl BattleError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TickLimitExceeded { .. } => ErrorSeverity::Internal,
            Self::RunFinished { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::TickLimitExceeded { .. } => "ENGINE_TICK_LIMIT_EXCEEDED",
            Self::RunFinished { .. } => "ENGINE_RUN_FINISHED",
        }
    }
}
