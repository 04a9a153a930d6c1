//! Database connection management
//!
//! This module provides the connection wrapper shared by the schema manager
//! and the monster repository.

use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use crate::database::error::{StoreError, StoreResult};

/// How long a statement waits on a lock held by another connection
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Core database connection wrapper
///
/// `DatabaseConn` owns a single long-lived SQLite connection. File-backed and
/// in-memory databases get the same configuration, apart from the journal
/// mode which SQLite ignores for in-memory databases.
pub struct DatabaseConn {
    pub conn: Connection,
}

impl DatabaseConn {
    /// Open a database at the specified path
    ///
    /// If the path is `None`, an in-memory database is created.
    pub fn open(path: Option<&str>) -> StoreResult<Self> {
        let conn = match path {
            Some(p) => Connection::open(p).map_err(|source| StoreError::Open {
                path: p.to_string(),
                source,
            })?,
            None => Connection::open_in_memory().map_err(|source| StoreError::Open {
                path: ":memory:".to_string(),
                source,
            })?,
        };

        let db = DatabaseConn { conn };
        db.configure()?;
        Ok(db)
    }

    /// Open a database at the specified path (convenience method)
    pub fn open_path(path: &str) -> StoreResult<Self> {
        Self::open(Some(path))
    }

    /// Create an in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open(None)
    }

    /// Open an existing database file without write access
    ///
    /// No pragmas are applied, so the file's journal mode is left as it is
    /// and no `-wal`/`-shm` files are created for a rollback-journal database.
    pub fn open_read_only(path: &str) -> StoreResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| StoreError::Open {
            path: path.to_string(),
            source,
        })?;

        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|source| StoreError::Configure {
                pragma: "busy_timeout",
                source,
            })?;

        Ok(DatabaseConn { conn })
    }

    fn configure(&self) -> StoreResult<()> {
        // WAL lets readers in other processes proceed while a write is in flight
        let _: String = self
            .conn
            .query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))
            .map_err(|source| StoreError::Configure {
                pragma: "journal_mode",
                source,
            })?;

        self.conn
            .execute("PRAGMA synchronous=NORMAL", [])
            .map_err(|source| StoreError::Configure {
                pragma: "synchronous",
                source,
            })?;

        self.conn
            .execute("PRAGMA foreign_keys=ON", [])
            .map_err(|source| StoreError::Configure {
                pragma: "foreign_keys",
                source,
            })?;

        self.conn
            .busy_timeout(BUSY_TIMEOUT)
            .map_err(|source| StoreError::Configure {
                pragma: "busy_timeout",
                source,
            })?;

        Ok(())
    }

    /// Check if a table exists in the database
    pub fn table_exists(&self, table_name: &str) -> StoreResult<bool> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table_name],
                |row| row.get(0),
            )
            .map_err(|source| StoreError::ReadFailed {
                op: "check table existence",
                source,
            })?;
        Ok(count > 0)
    }

    /// Get the row count for a table
    pub fn table_count(&self, table_name: &str) -> StoreResult<u64> {
        let query = format!("SELECT COUNT(*) FROM {}", table_name);
        let count: u64 = self
            .conn
            .query_row(&query, [], |row| row.get(0))
            .map_err(|source| StoreError::ReadFailed {
                op: "count table rows",
                source,
            })?;
        Ok(count)
    }

    /// Release the connection, reporting any failure to flush or finalize
    pub fn close(self) -> StoreResult<()> {
        self.conn
            .close()
            .map_err(|(_conn, e)| StoreError::Close(e))
    }
}
