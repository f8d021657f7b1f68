#![warn(clippy::all, missing_docs)]

//! Core domain logic for the lineup manager.
//!
//! This crate hosts the player models, the ordered lineup with its
//! validation rules, CSV persistence and configuration handling used
//! by the interactive command-line frontend.

pub mod config;
pub mod error;
pub mod lineup;
pub mod models;
pub mod storage;

pub use config::AppConfig;
pub use error::{RosterError, RosterResult, StatsViolation};
pub use lineup::Lineup;
pub use models::{Player, Position, Stats};
pub use storage::{CsvStore, LineupStore};
