use std::{fmt, str::FromStr};

use crate::error::RosterError;

/// Fielding position, restricted to the nine standard codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    /// Catcher.
    Catcher,
    /// First base.
    FirstBase,
    /// Second base.
    SecondBase,
    /// Third base.
    ThirdBase,
    /// Shortstop.
    Shortstop,
    /// Left field.
    LeftField,
    /// Center field.
    CenterField,
    /// Right field.
    RightField,
    /// Pitcher.
    Pitcher,
}

impl Position {
    /// Every position, in display order.
    pub const ALL: [Position; 9] = [
        Position::Catcher,
        Position::FirstBase,
        Position::SecondBase,
        Position::ThirdBase,
        Position::Shortstop,
        Position::LeftField,
        Position::CenterField,
        Position::RightField,
        Position::Pitcher,
    ];

    /// Uppercase code stored on disk and shown to the user.
    pub fn code(self) -> &'static str {
        match self {
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
            Position::Pitcher => "P",
        }
    }

    /// Comma separated list of all codes, e.g. for prompts and error messages.
    pub fn codes() -> String {
        Self::ALL
            .iter()
            .map(|position| position.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Position {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|position| position.code() == normalized)
            .ok_or(RosterError::InvalidPosition(normalized))
    }
}
