//! Line-oriented prompting over any reader/writer pair.

use std::io::{self, BufRead, Write};

use lineup_core::{
    error::{parse_whole, require_text},
    RosterError, StatsViolation,
};
use thiserror::Error;

/// Why a prompt did not produce a value.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The user typed something the operation rejects.
    #[error(transparent)]
    Rejected(#[from] RosterError),
    /// Input reached end of file.
    #[error("input closed")]
    Closed,
    /// Reading or writing the terminal failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type PromptResult<T> = Result<T, PromptError>;

/// Terminal wrapper used by the interactive loop.
pub struct Console<R, W> {
    pub(crate) input: R,
    pub(crate) output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print `prompt` and return the trimmed reply, or `Closed` at end of input.
    pub fn ask(&mut self, prompt: &str) -> PromptResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_string())
    }

    /// Non-blank text.
    pub fn ask_text(&mut self, prompt: &str, field: &'static str) -> PromptResult<String> {
        let reply = self.ask(prompt)?;
        Ok(require_text(field, &reply)?.to_string())
    }

    /// Any whole number, including negatives; range rules belong to the caller.
    pub fn ask_whole(&mut self, prompt: &str, field: &'static str) -> PromptResult<i64> {
        let reply = self.ask(prompt)?;
        Ok(parse_whole(field, &reply)?)
    }

    /// A stat total; negatives are rejected as soon as they are typed.
    pub fn ask_count(&mut self, prompt: &str, field: &'static str) -> PromptResult<i64> {
        let value = self.ask_whole(prompt, field)?;
        if value < 0 {
            return Err(RosterError::InvalidStats(StatsViolation::Negative).into());
        }
        Ok(value)
    }

    /// A 1-based player number. Values below one map to zero so the lineup
    /// reports them as out of range.
    pub fn ask_number(&mut self, prompt: &str) -> PromptResult<usize> {
        let value = self.ask_whole(prompt, "Player number")?;
        Ok(usize::try_from(value).unwrap_or(0))
    }

    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "Error: {message}")
    }
}
