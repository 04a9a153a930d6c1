//! Database schema management
//!
//! This module owns the `monster` table definition and the small meta table
//! that records which schema version wrote the file.

use rusqlite::{Connection, OptionalExtension};
use tracing::info;

use crate::database::error::{StoreError, StoreResult};

/// Current schema version
/// Increment this when making breaking schema changes
pub const SCHEMA_VERSION: u32 = 1;

/// Name of the monster table
pub const MONSTER_TABLE_NAME: &str = "monster";

/// Name of the meta table
pub const META_TABLE_NAME: &str = "monster_meta";

const SCHEMA_VERSION_KEY: &str = "schema_version";

/// Schema definitions for all tables in the store
pub struct SchemaDefinitions;

impl SchemaDefinitions {
    /// SQL for creating the meta table (tracks schema version)
    pub const META_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS monster_meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );
    "#;

    /// SQL for creating the monster table
    pub const MONSTER_TABLE: &'static str = r#"
        CREATE TABLE IF NOT EXISTS monster (
            ID INTEGER PRIMARY KEY AUTOINCREMENT,
            NAME TEXT,
            DESCRIPTION TEXT,
            SCARINESS INTEGER,
            IMAGE TEXT,
            VOTES INTEGER DEFAULT 0,
            STARS INTEGER DEFAULT 0
        );
    "#;

    pub const DROP_MONSTER_TABLE: &'static str = "DROP TABLE IF EXISTS monster";

    pub const DROP_META_TABLE: &'static str = "DROP TABLE IF EXISTS monster_meta";
}

/// Schema manager for the monster store
///
/// Handles schema initialization, version checking and the destructive
/// upgrade path. The manager compares the version recorded in the file with
/// a declared target version, which defaults to [`SCHEMA_VERSION`].
pub struct SchemaManager<'a> {
    conn: &'a Connection,
    target_version: u32,
}

impl<'a> SchemaManager<'a> {
    /// Create a new schema manager targeting [`SCHEMA_VERSION`]
    pub fn new(conn: &'a Connection) -> Self {
        Self::with_version(conn, SCHEMA_VERSION)
    }

    /// Create a schema manager targeting an explicit version
    pub fn with_version(conn: &'a Connection, target_version: u32) -> Self {
        Self {
            conn,
            target_version,
        }
    }

    /// The version this manager initializes and upgrades to
    pub fn target_version(&self) -> u32 {
        self.target_version
    }

    /// Initialize the database schema
    ///
    /// Creates the meta and monster tables if they don't exist and records
    /// the target version.
    pub fn initialize(&self) -> StoreResult<()> {
        self.conn
            .execute(SchemaDefinitions::META_TABLE, [])
            .map_err(|source| StoreError::Schema {
                op: "create meta table",
                source,
            })?;

        self.set_meta(SCHEMA_VERSION_KEY, &self.target_version.to_string())?;

        self.conn
            .execute(SchemaDefinitions::MONSTER_TABLE, [])
            .map_err(|source| StoreError::Schema {
                op: "create monster table",
                source,
            })?;

        Ok(())
    }

    /// Check the current schema status
    pub fn check_status(&self) -> StoreResult<SchemaStatus> {
        if !self.table_exists(META_TABLE_NAME)? {
            return Ok(SchemaStatus::NotInitialized);
        }

        let Some(current_version) = self.get_schema_version()? else {
            return Ok(SchemaStatus::NotInitialized);
        };

        if current_version == self.target_version {
            if self.table_exists(MONSTER_TABLE_NAME)? {
                Ok(SchemaStatus::Current)
            } else {
                Ok(SchemaStatus::Corrupted)
            }
        } else if current_version < self.target_version {
            Ok(SchemaStatus::NeedsUpgrade {
                from: current_version,
                to: self.target_version,
            })
        } else {
            Ok(SchemaStatus::Downgrade {
                database_version: current_version,
                required_version: self.target_version,
            })
        }
    }

    /// Get the schema version recorded in the database
    ///
    /// Returns `None` when no version has been recorded yet.
    pub fn get_schema_version(&self) -> StoreResult<Option<u32>> {
        match self.get_meta(SCHEMA_VERSION_KEY)? {
            Some(version) => version
                .parse()
                .map(Some)
                .map_err(|_| StoreError::InvalidVersion(version)),
            None => Ok(None),
        }
    }

    /// Drop the monster table and recreate it empty at the target version
    ///
    /// No data is carried over. Runs in a single transaction so a failure
    /// leaves the old table in place.
    pub fn drop_and_recreate(&self) -> StoreResult<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|source| StoreError::Schema {
                op: "begin upgrade transaction",
                source,
            })?;

        tx.execute(SchemaDefinitions::DROP_MONSTER_TABLE, [])
            .map_err(|source| StoreError::Schema {
                op: "drop monster table",
                source,
            })?;
        self.initialize()?;

        tx.commit().map_err(|source| StoreError::Schema {
            op: "commit upgrade transaction",
            source,
        })?;

        info!(
            "Recreated monster table at schema v{}",
            self.target_version
        );
        Ok(())
    }

    /// Set a metadata value
    pub fn set_meta(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO monster_meta (key, value, updated_at) VALUES (?1, ?2, strftime('%s', 'now'))",
                [key, value],
            )
            .map_err(|source| StoreError::WriteFailed {
                op: "set meta value",
                source,
            })?;
        Ok(())
    }

    /// Get a metadata value
    ///
    /// Returns `None` when the key is absent or the meta table does not exist.
    pub fn get_meta(&self, key: &str) -> StoreResult<Option<String>> {
        if !self.table_exists(META_TABLE_NAME)? {
            return Ok(None);
        }

        self.conn
            .query_row(
                "SELECT value FROM monster_meta WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|source| StoreError::ReadFailed {
                op: "get meta value",
                source,
            })
    }

    /// Reset the database by dropping all tables
    pub fn reset(&self) -> StoreResult<()> {
        for (op, sql) in [
            ("drop monster table", SchemaDefinitions::DROP_MONSTER_TABLE),
            ("drop meta table", SchemaDefinitions::DROP_META_TABLE),
        ] {
            self.conn
                .execute(sql, [])
                .map_err(|source| StoreError::Schema { op, source })?;
        }
        Ok(())
    }

    /// Drop all tables and initialize them again at the target version
    ///
    /// Runs in a single transaction so a failure leaves both tables in place.
    pub fn reset_and_initialize(&self) -> StoreResult<()> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(|source| StoreError::Schema {
                op: "begin reset transaction",
                source,
            })?;

        self.reset()?;
        self.initialize()?;

        tx.commit().map_err(|source| StoreError::Schema {
            op: "commit reset transaction",
            source,
        })?;

        info!("Reset monster database at schema v{}", self.target_version);
        Ok(())
    }

    fn table_exists(&self, table: &str) -> StoreResult<bool> {
        let exists: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table],
                |row| row.get(0),
            )
            .map_err(|source| StoreError::Schema {
                op: "inspect sqlite_master",
                source,
            })?;
        Ok(exists > 0)
    }
}

/// Status of the database schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStatus {
    /// Database is not initialized (fresh database)
    NotInitialized,

    /// Schema is current and valid
    Current,

    /// Schema was written by an older version and must be upgraded
    NeedsUpgrade { from: u32, to: u32 },

    /// Database is from a newer version than the one declared
    Downgrade {
        database_version: u32,
        required_version: u32,
    },

    /// Version is recorded but the monster table is missing
    Corrupted,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn create_test_db() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    fn monster_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM monster", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_schema_not_initialized() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);

        assert_eq!(
            manager.check_status().unwrap(),
            SchemaStatus::NotInitialized
        );
        assert_eq!(manager.get_schema_version().unwrap(), None);
    }

    #[test]
    fn test_schema_initialize() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);

        manager.initialize().unwrap();

        assert_eq!(manager.check_status().unwrap(), SchemaStatus::Current);
        assert_eq!(manager.get_schema_version().unwrap(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_monster_table_columns() {
        let conn = create_test_db();
        SchemaManager::new(&conn).initialize().unwrap();

        conn.execute(
            "INSERT INTO monster (NAME, DESCRIPTION, SCARINESS, IMAGE) VALUES ('a', 'b', 1, 'monster_1')",
            [],
        )
        .unwrap();

        let (votes, stars): (i64, i64) = conn
            .query_row("SELECT VOTES, STARS FROM monster", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!((votes, stars), (0, 0));
    }

    #[test]
    fn test_needs_upgrade() {
        let conn = create_test_db();
        SchemaManager::new(&conn).initialize().unwrap();

        let manager = SchemaManager::with_version(&conn, SCHEMA_VERSION + 1);
        assert_eq!(
            manager.check_status().unwrap(),
            SchemaStatus::NeedsUpgrade {
                from: SCHEMA_VERSION,
                to: SCHEMA_VERSION + 1
            }
        );
    }

    #[test]
    fn test_downgrade_detected() {
        let conn = create_test_db();
        SchemaManager::with_version(&conn, 5).initialize().unwrap();

        let manager = SchemaManager::with_version(&conn, 2);
        assert_eq!(
            manager.check_status().unwrap(),
            SchemaStatus::Downgrade {
                database_version: 5,
                required_version: 2
            }
        );
    }

    #[test]
    fn test_corrupted_when_table_missing() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);
        manager.initialize().unwrap();

        conn.execute(SchemaDefinitions::DROP_MONSTER_TABLE, [])
            .unwrap();
        assert_eq!(manager.check_status().unwrap(), SchemaStatus::Corrupted);
    }

    #[test]
    fn test_drop_and_recreate_discards_rows() {
        let conn = create_test_db();
        SchemaManager::new(&conn).initialize().unwrap();
        conn.execute(
            "INSERT INTO monster (NAME, DESCRIPTION, SCARINESS, IMAGE) VALUES ('a', 'b', 1, 'monster_1')",
            [],
        )
        .unwrap();
        assert_eq!(monster_count(&conn), 1);

        let manager = SchemaManager::with_version(&conn, 2);
        manager.drop_and_recreate().unwrap();

        assert_eq!(monster_count(&conn), 0);
        assert_eq!(manager.get_schema_version().unwrap(), Some(2));
        assert_eq!(manager.check_status().unwrap(), SchemaStatus::Current);
    }

    #[test]
    fn test_invalid_version() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);
        manager.initialize().unwrap();
        manager.set_meta("schema_version", "one").unwrap();

        assert!(matches!(
            manager.get_schema_version(),
            Err(StoreError::InvalidVersion(v)) if v == "one"
        ));
    }

    #[test]
    fn test_meta_operations() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);

        manager.initialize().unwrap();

        manager.set_meta("test_key", "test_value").unwrap();
        let value = manager.get_meta("test_key").unwrap();
        assert_eq!(value, Some("test_value".to_string()));

        let missing = manager.get_meta("nonexistent").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn test_meta_without_meta_table() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);

        assert_eq!(manager.get_meta("schema_version").unwrap(), None);
        assert_eq!(manager.get_schema_version().unwrap(), None);

        manager.initialize().unwrap();
        manager.reset().unwrap();
        assert_eq!(manager.get_schema_version().unwrap(), None);
    }

    #[test]
    fn test_schema_reset() {
        let conn = create_test_db();
        let manager = SchemaManager::new(&conn);

        manager.initialize().unwrap();
        assert_eq!(manager.check_status().unwrap(), SchemaStatus::Current);

        manager.reset().unwrap();
        assert_eq!(
            manager.check_status().unwrap(),
            SchemaStatus::NotInitialized
        );
    }

    #[test]
    fn test_reset_and_initialize() {
        let conn = create_test_db();
        SchemaManager::new(&conn).initialize().unwrap();
        conn.execute(
            "INSERT INTO monster (NAME, DESCRIPTION, SCARINESS, IMAGE) VALUES ('a', 'b', 1, 'monster_1')",
            [],
        )
        .unwrap();

        let manager = SchemaManager::with_version(&conn, 2);
        manager.reset_and_initialize().unwrap();

        assert_eq!(monster_count(&conn), 0);
        assert_eq!(manager.get_schema_version().unwrap(), Some(2));
        assert_eq!(manager.check_status().unwrap(), SchemaStatus::Current);
    }
}
