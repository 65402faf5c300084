//! Error type returned by the persistence layer.

use std::path::PathBuf;

use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("failed to create data directory {}", .path.display())]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create table {table}")]
    Schema {
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("A record with this {column} already exists.")]
    Duplicate { column: String },

    #[error("{entity} {id} does not exist.")]
    NotFound { entity: &'static str, id: i64 },

    #[error("A referenced record does not exist.")]
    MissingReference,

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl DbError {
    /// Classify a failed statement, turning constraint violations into the
    /// variants the UI can explain to the user.
    pub(crate) fn from_statement(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, message) = &err {
            match code.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return DbError::Duplicate {
                        column: constraint_column(message.as_deref()),
                    };
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return DbError::MissingReference,
                _ => {}
            }
        }
        DbError::Sqlite(err)
    }

    /// Replace a dangling foreign key with the entity the caller was pointing at.
    pub(crate) fn or_not_found(self, entity: &'static str, id: i64) -> Self {
        match self {
            DbError::MissingReference => DbError::NotFound { entity, id },
            other => other,
        }
    }
}

/// SQLite reports unique violations as `UNIQUE constraint failed: Table.column`.
/// Pull out the column so messages read "email" instead of the raw text.
fn constraint_column(message: Option<&str>) -> String {
    message
        .and_then(|text| text.split_once("failed: "))
        .map(|(_, columns)| columns.split(", ").next().unwrap_or(columns))
        .map(|column| {
            column
                .rsplit_once('.')
                .map_or(column, |(_, name)| name)
                .replace('_', " ")
        })
        .unwrap_or_else(|| "value".to_string())
}
