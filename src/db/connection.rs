use std::fs;
use std::path::Path;

use rusqlite::Connection;

use super::log_failure;
use crate::error::DbError;

/// Open (creating if needed) the SQLite file at `path` and return a live
/// connection. Foreign keys are switched on for every connection so the
/// cascading deletes in the schema actually run.
pub fn connect(path: &Path) -> Result<Connection, DbError> {
    open_file(path).inspect_err(|err| log_failure("database connection error", err))
}

fn open_file(path: &Path) -> Result<Connection, DbError> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DbError::DataDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let conn = Connection::open(path)?;
    enable_foreign_keys(&conn)?;
    log::info!("connected to {}", path.display());
    Ok(conn)
}

/// Private in-memory database with the same pragmas as [`connect`].
pub fn connect_in_memory() -> Result<Connection, DbError> {
    let conn = Connection::open_in_memory()?;
    enable_foreign_keys(&conn)?;
    Ok(conn)
}

/// Release the connection, reporting anything SQLite could not flush.
pub fn close(conn: Connection) -> Result<(), DbError> {
    conn.close()
        .map_err(|(_, err)| DbError::from(err))
        .inspect_err(|err| log_failure("failed to close database", err))
}

fn enable_foreign_keys(conn: &Connection) -> Result<(), DbError> {
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    Ok(())
}
