//! Where the application keeps its files. Defaults live under the user's home
//! directory; environment variables override them for tests and portable
//! installs.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".car-service-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "car_service.db";
/// Log file written next to the database; the terminal belongs to the TUI.
const LOG_FILE_NAME: &str = "car-service.log";

/// Overrides the data directory.
pub const DATA_DIR_ENV: &str = "CAR_SERVICE_HOME";
/// Overrides the database file independently of the data directory.
pub const DB_PATH_ENV: &str = "CAR_SERVICE_DB";
/// Standard `env_logger` filter variable.
pub const LOG_FILTER_ENV: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_path: PathBuf,
}

impl AppConfig {
    /// Resolve paths from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            env::var_os(DATA_DIR_ENV).map(PathBuf::from),
            env::var_os(DB_PATH_ENV).map(PathBuf::from),
        )
    }

    /// Build the configuration from explicit overrides, falling back to the
    /// home directory for anything left unset.
    pub fn resolve(data_dir: Option<PathBuf>, db_path: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        let db_path = db_path.unwrap_or_else(|| data_dir.join(DB_FILE_NAME));
        let log_path = data_dir.join(LOG_FILE_NAME);

        Ok(Self {
            data_dir,
            db_path,
            log_path,
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
