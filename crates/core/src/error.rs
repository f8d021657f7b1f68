//! Recoverable validation errors raised by the lineup model and input parsing.

use std::fmt;

use thiserror::Error;

use crate::models::Position;

/// Reason a pair of at-bats/hits values was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsViolation {
    /// At-bats or hits was below zero.
    Negative,
    /// More hits than at-bats.
    HitsExceedAtBats,
}

impl fmt::Display for StatsViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => f.write_str("At-bats and hits cannot be negative."),
            Self::HitsExceedAtBats => f.write_str("Hits cannot be greater than at-bats."),
        }
    }
}

/// Validation failures surfaced to the user as a single line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// A 1-based player number outside `1..=len`.
    #[error("Invalid player number {number}. Choose a number from 1 to {len}.")]
    OutOfRange {
        /// Number supplied by the caller.
        number: usize,
        /// Lineup length at the time of the call.
        len: usize,
    },
    /// Position code not in the fixed set.
    #[error("Invalid position '{0}'. Choose from: {codes}", codes = Position::codes())]
    InvalidPosition(String),
    /// Negative stats or more hits than at-bats.
    #[error("{0}")]
    InvalidStats(StatsViolation),
    /// A required text field was blank.
    #[error("{field} cannot be empty.")]
    EmptyInput {
        /// Label of the field that was blank.
        field: &'static str,
    },
    /// A whole number was expected.
    #[error("{field} must be a whole number, got '{value}'.")]
    ParseError {
        /// Label of the field being parsed.
        field: &'static str,
        /// Raw text that failed to parse.
        value: String,
    },
}

/// Convenience alias for lineup operations.
pub type RosterResult<T> = Result<T, RosterError>;

/// Parse a whole number typed by the user.
pub fn parse_whole(field: &'static str, raw: &str) -> RosterResult<i64> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().map_err(|_| RosterError::ParseError {
        field,
        value: trimmed.to_string(),
    })
}

/// Reject blank text, returning the trimmed value.
pub fn require_text<'a>(field: &'static str, raw: &'a str) -> RosterResult<&'a str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RosterError::EmptyInput { field });
    }
    Ok(trimmed)
}
