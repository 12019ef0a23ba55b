//! Database session seam
//!
//! The shell drives the engine only through [`Session`]: lifecycle
//! operations on named database files and execution of opaque query
//! text. Statement text is never inspected beyond counting `;` to decide
//! between single-statement and batch execution.

mod errors;
mod row;
mod sqlite;

pub use errors::{DatabaseError, DatabaseResult};
pub use row::{Cell, Row};
pub use sqlite::SqliteSession;

/// What executing query text produced
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// Rows returned by a single statement (possibly none)
    Rows(Vec<Row>),
    /// Several statements ran as a batch; batches return no rows
    Batch,
}

/// A connection lifecycle plus query execution
pub trait Session {
    /// Create a database and make it the current one
    fn create(&mut self, name: &str) -> DatabaseResult<()>;

    /// Open an existing database and make it the current one
    fn open(&mut self, name: &str) -> DatabaseResult<()>;

    /// Close the current database
    fn close(&mut self) -> DatabaseResult<()>;

    /// Remove a database file
    fn delete(&mut self, name: &str) -> DatabaseResult<()>;

    /// Execute query text against the current database
    fn execute(&mut self, sql: &str) -> DatabaseResult<QueryOutcome>;

    /// Returns true if a database is currently open
    fn is_open(&self) -> bool;
}
