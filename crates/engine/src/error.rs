//! The module contains the errors the engine can surface to the agent.
//!
//! Silent rejections (full buffer, misplaced delimiter) are deliberately
//! **not** errors: the keypad stays forgiving and those calls simply no-op.
//! Everything here is user-visible and non-fatal: the draft and separated
//! plays survive every variant so the agent can correct and retry.
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The AL range shortcut needs exactly one entered number as anchor.
    #[error("Range mode needs exactly one number, found {0}")]
    InvalidRangeInput(usize),
    /// No expansion pattern matched the two endpoints.
    #[error("Cannot expand range {0}-{1}")]
    RangeExpansionFailed(String, String),
    /// Repeated numbers in one wager are only allowed for Parlet.
    #[error("Number {0} is repeated; only Parlet allows repeated numbers")]
    DuplicateNumberNotAllowed(String),
    /// Submission attempted without an active draw selected.
    #[error("No throw selected")]
    NoThrowSelected,
    /// Submission attempted with nothing priced to send.
    #[error("No plays to submit")]
    NoPlaysToSubmit,
    /// A selected play type is missing from the backend catalog.
    #[error("Play type \"{0}\" not found in catalog")]
    UnknownPlayType(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}
