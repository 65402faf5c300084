//! Binary entry point: resolve configuration, route logs to a file, bring up
//! the database and drive the Ratatui event loop until the user exits.
use std::fs::{self, OpenOptions};

use anyhow::{Context, Result};
use car_service_manager::config::{DEFAULT_LOG_FILTER, LOG_FILTER_ENV};
use car_service_manager::{db, run_app, App, AppConfig};
use env_logger::{Env, Target};

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config)?;

    let mut conn = db::connect(&config.db_path).context("failed to connect to database")?;
    db::create_tables(&conn).context("failed to create tables")?;
    db::insert_sample_data(&mut conn).context("failed to insert sample data")?;

    let mut app = App::new(conn);
    let result = run_app(&mut app);
    app.shutdown(result)
}

/// The TUI owns stdout, so log records are appended to a file instead.
fn init_logging(config: &AppConfig) -> Result<()> {
    fs::create_dir_all(&config.data_dir).context("failed to create data directory")?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("failed to open log file {}", config.log_path.display()))?;

    env_logger::Builder::from_env(
        Env::default().filter_or(LOG_FILTER_ENV, DEFAULT_LOG_FILTER),
    )
    .target(Target::Pipe(Box::new(file)))
    .init();
    Ok(())
}
