use crate::{
    error::{require_text, RosterError, RosterResult, StatsViolation},
    models::Position,
};

/// Batting totals for a player. Hits never exceed at-bats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    at_bats: u64,
    hits: u64,
}

impl Stats {
    /// Validate raw values, rejecting negatives before the hits/at-bats relation.
    pub fn new(at_bats: i64, hits: i64) -> RosterResult<Self> {
        let (Ok(at_bats), Ok(hits)) = (u64::try_from(at_bats), u64::try_from(hits)) else {
            return Err(RosterError::InvalidStats(StatsViolation::Negative));
        };
        if hits > at_bats {
            return Err(RosterError::InvalidStats(StatsViolation::HitsExceedAtBats));
        }
        Ok(Self { at_bats, hits })
    }

    /// Number of official at-bats.
    pub fn at_bats(&self) -> u64 {
        self.at_bats
    }

    /// Number of hits.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Hits divided by at-bats, or exactly `0.0` with no at-bats.
    pub fn average(&self) -> f64 {
        if self.at_bats == 0 {
            return 0.0;
        }
        self.hits as f64 / self.at_bats as f64
    }
}

/// A single lineup entry. Fields are only changed through validated setters.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    name: String,
    position: Position,
    stats: Stats,
}

impl Player {
    /// Create a player, trimming the name and rejecting a blank one.
    pub fn new(name: &str, position: Position, stats: Stats) -> RosterResult<Self> {
        let name = require_text("Name", name)?;
        Ok(Self {
            name: name.to_string(),
            position,
            stats,
        })
    }

    /// Player name as entered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current fielding position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Official at-bats.
    pub fn at_bats(&self) -> u64 {
        self.stats.at_bats()
    }

    /// Hits.
    pub fn hits(&self) -> u64 {
        self.stats.hits()
    }

    /// Batting average derived from the current stats.
    pub fn average(&self) -> f64 {
        self.stats.average()
    }

    /// Replace the position from a user supplied code.
    pub fn set_position(&mut self, code: &str) -> RosterResult<()> {
        self.position = code.parse()?;
        Ok(())
    }

    /// Replace both stats at once; nothing changes if either value is rejected.
    pub fn set_stats(&mut self, at_bats: i64, hits: i64) -> RosterResult<()> {
        self.stats = Stats::new(at_bats, hits)?;
        Ok(())
    }
}
