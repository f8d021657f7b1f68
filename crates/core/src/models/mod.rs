//! Shared domain models.

mod player;
mod position;

pub use player::{Player, Stats};
pub use position::Position;
