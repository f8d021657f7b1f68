mod app;
mod console;
mod view;

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io,
    sync::Mutex,
};

use lineup_core::{
    config::{self, AppConfig},
    CsvStore,
};
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() -> Result<()> {
    init_logging()?;

    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    tracing::info!("using lineup file {}", config.lineup_file.display());

    let store = CsvStore::new(config.lineup_file);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut app = app::LineupApp::new(store, stdin.lock(), stdout.lock())?;
    app.run()
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("lineup.log"))?;

    let env_filter = EnvFilter::from_default_env();

    // stdout belongs to the menu
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
