//! CSV persistence for the lineup.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::{info, warn};

use crate::models::{Player, Position, Stats};

/// File name used when no location is configured.
pub const DEFAULT_LINEUP_FILE: &str = "lineup.csv";

/// Column names written as the first row of every lineup file.
pub const HEADER: [&str; 4] = ["name", "position", "at_bats", "hits"];

/// Backend the interactive loop persists the lineup through.
pub trait LineupStore {
    /// Read the stored lineup, returning an empty list when nothing is stored yet.
    fn load(&self) -> Result<Vec<Player>>;
    /// Replace the stored lineup with `players`.
    fn save(&self, players: &[Player]) -> Result<()>;
}

/// Store backed by a single CSV file.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Create a store reading and writing `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineupStore for CsvStore {
    fn load(&self) -> Result<Vec<Player>> {
        load_players(&self.path)
    }

    fn save(&self, players: &[Player]) -> Result<()> {
        save_players(players, &self.path)
    }
}

/// Load players from `path`. A missing file yields an empty lineup and
/// malformed rows are skipped.
pub fn load_players(path: impl AsRef<Path>) -> Result<Vec<Player>> {
    let path = path.as_ref();
    if !path.exists() {
        info!("no lineup at {}, starting empty", path.display());
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let columns = Columns::locate(
        reader
            .headers()
            .with_context(|| format!("failed to read header of {}", path.display()))?,
    );

    let mut players = Vec::new();
    let mut skipped = 0usize;
    for (line, record) in reader.records().enumerate() {
        let row = line + 2;
        match record {
            Ok(record) => match parse_row(&record, &columns) {
                Some(player) => players.push(player),
                None => {
                    skipped += 1;
                    warn!("Skipping row {row} of {}: {:?}", path.display(), record);
                }
            },
            Err(err) => {
                skipped += 1;
                warn!("Skipping row {row} of {}: {err}", path.display());
            }
        }
    }

    info!(
        "loaded {} players from {} ({skipped} rows dropped)",
        players.len(),
        path.display()
    );
    Ok(players)
}

/// Overwrite `path` with a header row and one row per player.
pub fn save_players(players: &[Player], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writer.write_record(HEADER)?;
    for player in players {
        writer.write_record([
            player.name().to_string(),
            player.position().code().to_string(),
            player.at_bats().to_string(),
            player.hits().to_string(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!("saved {} players to {}", players.len(), path.display());
    Ok(())
}

/// Positions of the known columns within the header row.
#[derive(Debug)]
struct Columns {
    name: Option<usize>,
    position: Option<usize>,
    at_bats: Option<usize>,
    hits: Option<usize>,
}

impl Columns {
    fn locate(header: &StringRecord) -> Self {
        let find = |column: &str| header.iter().position(|field| field.trim() == column);
        Self {
            name: find(HEADER[0]),
            position: find(HEADER[1]),
            at_bats: find(HEADER[2]),
            hits: find(HEADER[3]),
        }
    }
}

/// Turn one record into a player, or `None` when any field is unusable.
///
/// Columns absent from the header default to empty text or zero; a column
/// that exists but holds a non-integer rejects the row.
fn parse_row(record: &StringRecord, columns: &Columns) -> Option<Player> {
    let text = |column: Option<usize>| {
        match column {
            Some(index) => record.get(index).map(str::trim),
            None => Some(""),
        }
    };
    let count = |column: Option<usize>| {
        match column {
            Some(index) => record.get(index)?.trim().parse::<i64>().ok(),
            None => Some(0),
        }
    };

    let name = text(columns.name)?;
    let position: Position = text(columns.position)?.parse().ok()?;
    let stats = Stats::new(count(columns.at_bats)?, count(columns.hits)?).ok()?;
    Player::new(name, position, stats).ok()
}
