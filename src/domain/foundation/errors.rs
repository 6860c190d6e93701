//! Error types for the domain layer.
//!
//! A `DomainError` signals a violated controller invariant (a programming
//! error), never a user-input problem: all user text is accepted as-is and
//! either classified or stored.

use thiserror::Error;

/// Errors raised when a session invariant would be violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A stage transition outside the fixed forward chain was attempted.
    #[error("invalid stage transition from {from} to {to}")]
    InvalidStageTransition { from: String, to: String },

    /// A confirmation was resolved but no candidate value was held.
    #[error("no candidate value is awaiting confirmation")]
    CandidateMissing,

    /// The draft cursor moved outside the subtitle range.
    #[error("draft cursor {cursor} out of bounds for {count} subtitles")]
    DraftCursorOutOfBounds { cursor: usize, count: usize },
}

impl DomainError {
    /// Creates an invalid stage transition error from any debuggable states.
    pub fn invalid_transition(from: impl std::fmt::Debug, to: impl std::fmt::Debug) -> Self {
        DomainError::InvalidStageTransition {
            from: format!("{:?}", from),
            to: format!("{:?}", to),
        }
    }
}
