//! SQLite-backed session

use std::fs;
use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use super::errors::{DatabaseError, DatabaseResult};
use super::row::{Cell, Row};
use super::{QueryOutcome, Session};

/// A session holding at most one SQLite connection
#[derive(Debug, Default)]
pub struct SqliteSession {
    conn: Option<Connection>,
}

impl SqliteSession {
    pub fn new() -> Self {
        Self { conn: None }
    }

    /// Open an existing database file read-write and confirm it is a database
    fn connect_existing(name: &str) -> DatabaseResult<Connection> {
        let path = Path::new(name);
        if !path.exists() {
            return Err(DatabaseError::NotFound(name.to_string()));
        }
        if path.is_dir() {
            return Err(DatabaseError::IsDirectory(name.to_string()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        // Fails with "file is not a database" for anything else
        conn.query_row("PRAGMA schema_version;", [], |row| row.get::<_, i64>(0))?;
        Ok(conn)
    }
}

impl Session for SqliteSession {
    fn create(&mut self, name: &str) -> DatabaseResult<()> {
        if Path::new(name).is_dir() {
            return Err(DatabaseError::IsDirectory(name.to_string()));
        }
        let conn = Connection::open(name)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn = Some(conn);
        Ok(())
    }

    fn open(&mut self, name: &str) -> DatabaseResult<()> {
        let conn = Self::connect_existing(name)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn = Some(conn);
        Ok(())
    }

    fn close(&mut self) -> DatabaseResult<()> {
        match self.conn.take() {
            Some(conn) => conn.close().map_err(|(_, e)| DatabaseError::from(e)),
            None => Err(DatabaseError::NotOpen),
        }
    }

    fn delete(&mut self, name: &str) -> DatabaseResult<()> {
        let conn = Self::connect_existing(name)?;
        conn.close().map_err(|(_, e)| DatabaseError::from(e))?;
        fs::remove_file(name)?;
        Ok(())
    }

    fn execute(&mut self, sql: &str) -> DatabaseResult<QueryOutcome> {
        let conn = self.conn.as_ref().ok_or(DatabaseError::NotOpen)?;

        if sql.matches(';').count() > 1 {
            conn.execute_batch(sql)?;
            return Ok(QueryOutcome::Batch);
        }

        let mut stmt = conn.prepare(sql)?;
        let columns = stmt.column_count();
        let mut rows = stmt.query([])?;

        let mut results = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(columns);
            for i in 0..columns {
                cells.push(Cell::from(row.get_ref(i)?));
            }
            results.push(Row(cells));
        }

        Ok(QueryOutcome::Rows(results))
    }

    fn is_open(&self) -> bool {
        self.conn.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn db_path(temp_dir: &TempDir, name: &str) -> String {
        temp_dir.path().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn test_create_then_query() {
        let temp_dir = TempDir::new().unwrap();
        let path = db_path(&temp_dir, "test.db");

        let mut session = SqliteSession::new();
        session.create(&path).unwrap();
        assert!(session.is_open());

        session
            .execute("CREATE TABLE t (id INTEGER, name TEXT); INSERT INTO t VALUES (1, 'a');")
            .unwrap();
        let outcome = session.execute("SELECT id, name FROM t;").unwrap();
        assert_eq!(
            outcome,
            QueryOutcome::Rows(vec![Row(vec![Cell::Integer(1), Cell::Text("a".into())])])
        );
    }

    #[test]
    fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = SqliteSession::new();
        let result = session.open(&db_path(&temp_dir, "missing.db"));
        assert!(matches!(result, Err(DatabaseError::NotFound(_))));
        assert!(!session.is_open());
    }

    #[test]
    fn test_open_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = SqliteSession::new();
        let result = session.open(&temp_dir.path().to_string_lossy());
        assert!(matches!(result, Err(DatabaseError::IsDirectory(_))));
    }

    #[test]
    fn test_open_non_database_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = db_path(&temp_dir, "notes.txt");
        fs::write(&path, "this is definitely not an sqlite database file").unwrap();

        let mut session = SqliteSession::new();
        assert!(matches!(session.open(&path), Err(DatabaseError::Sqlite(_))));
    }

    #[test]
    fn test_close_without_open() {
        let mut session = SqliteSession::new();
        assert!(matches!(session.close(), Err(DatabaseError::NotOpen)));
    }

    #[test]
    fn test_execute_without_open() {
        let mut session = SqliteSession::new();
        assert!(matches!(
            session.execute("SELECT 1;"),
            Err(DatabaseError::NotOpen)
        ));
    }

    #[test]
    fn test_delete_removes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = db_path(&temp_dir, "gone.db");

        let mut session = SqliteSession::new();
        session.create(&path).unwrap();
        session.execute("CREATE TABLE t (id INTEGER);").unwrap();
        session.close().unwrap();

        session.delete(&path).unwrap();
        assert!(!Path::new(&path).exists());
    }

    #[test]
    fn test_engine_error_surfaces() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = SqliteSession::new();
        session.create(&db_path(&temp_dir, "e.db")).unwrap();
        assert!(matches!(
            session.execute("SELECT * FROM nowhere;"),
            Err(DatabaseError::Sqlite(_))
        ));
    }
}
