//! Common error infrastructure for battle-core.
//!
//! Domain-specific errors are defined next to the code that produces them:
//! [`RosterError`] for input validation when building units and rosters, and
//! [`EngineError`](crate::engine::EngineError) for the simulator itself.
//!
//! Everything that can go wrong *inside* a tick (an empty target pool, an actor
//! that died before its turn resolved) is not an error at all: the action is
//! skipped and logged, and the tick continues.

use crate::state::UnitId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Temporary conditions; the caller may retry later
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted battle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all battle-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait BattleError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Input validation failures raised while building units and rosters.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("unit '{name}' has no basic skill")]
    MissingBasicSkill { name: String },

    #[error("{side} roster is empty")]
    EmptySide { side: crate::state::Side },

    #[error("duplicate unit id {id}")]
    DuplicateId { id: UnitId },

    #[error("skill '{skill}' on unit '{name}' has an invalid damage multiplier")]
    InvalidMultiplier { name: String, skill: String },
}

impl BattleError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingBasicSkill { .. } => "ROSTER_MISSING_BASIC_SKILL",
            Self::EmptySide { .. } => "ROSTER_EMPTY_SIDE",
            Self::DuplicateId { .. } => "ROSTER_DUPLICATE_ID",
            Self::InvalidMultiplier { .. } => "ROSTER_INVALID_MULTIPLIER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Side;

    #[test]
    fn roster_errors_are_validation_failures() {
        let err = RosterError::EmptySide { side: Side::Enemy };
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert!(!err.severity().is_recoverable());
        assert_eq!(err.error_code(), "ROSTER_EMPTY_SIDE");
        assert_eq!(err.to_string(), "enemy roster is empty");
    }
}
