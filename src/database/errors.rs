//! Database session errors

use std::io;

use thiserror::Error;

/// Result type for session operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Database session errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("database '{0}' does not exist")]
    NotFound(String),

    #[error("'{0}' is a directory not a file")]
    IsDirectory(String),

    #[error("not currently connected to an open database")]
    NotOpen,

    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{0}")]
    Io(#[from] io::Error),
}
