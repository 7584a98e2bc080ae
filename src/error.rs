//! Error types for the puzzle engine, the solver and configuration loading.

use derive_more::{Display, Error};
use tracing::instrument;

/// Errors surfaced by [`PuzzleEngine`](crate::PuzzleEngine) operations.
///
/// Illegal moves are not errors; they come back as
/// [`MoveOutcome::Rejected`](crate::MoveOutcome::Rejected).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PuzzleError {
    /// Grid size, mode parameters or a supplied arrangement are unusable.
    #[display("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What was wrong.
        reason: String,
    },
    /// A slot index outside the board was passed in.
    #[display("slot {slot} out of range for a board of {len} slots")]
    InvalidArgument {
        /// The offending slot.
        slot: usize,
        /// Number of slots on the board.
        len: usize,
    },
    /// The engine has no board yet; call `initialize` first.
    #[display("puzzle has not been initialized")]
    NotInitialized,
    /// The operation only exists for another mode.
    #[display("operation not available in {mode} mode")]
    WrongMode {
        /// The engine's current mode.
        mode: crate::Mode,
    },
    /// The hint solver gave up.
    #[display("solver failed: {_0}")]
    Solver(SolveError),
}

impl PuzzleError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl From<SolveError> for PuzzleError {
    fn from(err: SolveError) -> Self {
        Self::Solver(err)
    }
}

/// Reasons the IDA* solver can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SolveError {
    /// The arrangement cannot be reached from the solved state.
    #[display("puzzle is not solvable")]
    Unsolvable,
    /// The node budget ran out before a solution was found.
    #[display("search exceeded {limit} expanded nodes")]
    LimitExceeded {
        /// The budget that was exhausted.
        limit: usize,
    },
    /// Only boards with a blank can be solved by sliding.
    #[display("board has no blank")]
    NoBlank,
}

/// Configuration error with caller location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<PuzzleError> for ConfigError {
    #[track_caller]
    fn from(err: PuzzleError) -> Self {
        Self::new(err.to_string())
    }
}
