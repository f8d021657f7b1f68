//! Ordered batting lineup addressed by 1-based player numbers.

use tracing::debug;

use crate::{
    error::{RosterError, RosterResult},
    models::Player,
};

/// The batting order. Every public operation takes 1-based numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lineup {
    players: Vec<Player>,
}

impl Lineup {
    /// Build a lineup from players already in batting order.
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the lineup has no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Iterate players in batting order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Detached copy of the lineup, used for persistence.
    pub fn snapshot(&self) -> Vec<Player> {
        self.players.clone()
    }

    /// Borrow the player at `number`.
    pub fn player(&self, number: usize) -> RosterResult<&Player> {
        let index = self.to_index(number)?;
        Ok(&self.players[index])
    }

    /// Append a player to the end of the order.
    pub fn push(&mut self, player: Player) {
        debug!(name = player.name(), "adding player");
        self.players.push(player);
    }

    /// Remove and return the player at `number`.
    pub fn remove(&mut self, number: usize) -> RosterResult<Player> {
        let index = self.to_index(number)?;
        let player = self.players.remove(index);
        debug!(name = player.name(), number, "removed player");
        Ok(player)
    }

    /// Take the player at `from` out of the order and reinsert it at `to`.
    ///
    /// `to` addresses the lineup *after* the removal, so moving `1 -> 3` in
    /// `[A, B, C, D]` yields `[B, C, A, D]`.
    pub fn move_player(&mut self, from: usize, to: usize) -> RosterResult<()> {
        let from_index = self.to_index(from)?;
        let to_index = self.to_index(to)?;
        let player = self.players.remove(from_index);
        debug!(name = player.name(), from, to, "moving player");
        self.players.insert(to_index, player);
        Ok(())
    }

    /// Change the position of the player at `number`.
    pub fn edit_position(&mut self, number: usize, code: &str) -> RosterResult<()> {
        let index = self.to_index(number)?;
        self.players[index].set_position(code)?;
        debug!(number, position = %self.players[index].position(), "updated position");
        Ok(())
    }

    /// Replace the stats of the player at `number`.
    pub fn edit_stats(&mut self, number: usize, at_bats: i64, hits: i64) -> RosterResult<()> {
        let index = self.to_index(number)?;
        self.players[index].set_stats(at_bats, hits)?;
        debug!(number, at_bats, hits, "updated stats");
        Ok(())
    }

    fn to_index(&self, number: usize) -> RosterResult<usize> {
        if number < 1 || number > self.players.len() {
            return Err(RosterError::OutOfRange {
                number,
                len: self.players.len(),
            });
        }
        Ok(number - 1)
    }
}

impl<'a> IntoIterator for &'a Lineup {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}
