//! Monster store
//!
//! This module provides the persistent store for monster records:
//! - `Monster`: a snapshot of one row
//! - `MonsterDatabase`: the store itself, owning one SQLite connection
//! - `MonsterRepository`: CRUD access borrowed from the store

mod engagement;
mod image;
mod repository;

pub use engagement::MAX_STARS;
pub use image::{image_index, random_image_name, IMAGE_COUNT, IMAGE_PREFIX};
pub use repository::MonsterRepository;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::database::core::{DatabaseConn, SchemaManager, SchemaStatus, SCHEMA_VERSION};
use crate::database::error::{StoreError, StoreResult};

/// Default database file name inside the data directory
pub const DATABASE_FILE_NAME: &str = "monster.db";

/// A monster record
///
/// Values returned by the store are independent copies; changing them does
/// not write anything back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub scariness: i64,
    pub image_name: String,
    pub votes: i64,
    pub stars: i64,
}

/// Persistent monster store (SQLite backend)
///
/// `MonsterDatabase` is constructed explicitly by its owner and handed to
/// whoever needs it by reference. Opening it brings the schema to the
/// declared version:
/// - a fresh file gets the `monster` table created
/// - an older schema is dropped and recreated empty
/// - a newer schema is refused, leaving the file untouched
pub struct MonsterDatabase {
    db: DatabaseConn,
}

impl MonsterDatabase {
    /// Open the monster database at the specified path
    ///
    /// If the database doesn't exist, it will be created and initialized.
    pub fn open(path: &str) -> StoreResult<Self> {
        Self::open_with_version(path, SCHEMA_VERSION)
    }

    /// Open the monster database, declaring the schema version to bring it to
    pub fn open_with_version(path: &str, version: u32) -> StoreResult<Self> {
        if Path::new(path).exists() {
            refuse_downgrade(path, version)?;
        }
        let db = DatabaseConn::open_path(path)?;
        Self::prepare(db, version)
    }

    /// Open the monster database from a data directory
    ///
    /// Uses the standard database file path: `{data_dir}/monster.db`
    pub fn open_in_dir(data_dir: &str) -> StoreResult<Self> {
        let path = format!("{}/{}", data_dir.trim_end_matches('/'), DATABASE_FILE_NAME);
        Self::open(&path)
    }

    /// Create an in-memory monster database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = DatabaseConn::open_in_memory()?;
        Self::prepare(db, SCHEMA_VERSION)
    }

    fn prepare(db: DatabaseConn, version: u32) -> StoreResult<Self> {
        let schema = SchemaManager::with_version(&db.conn, version);

        match schema.check_status()? {
            SchemaStatus::Current => {
                info!("Monster database schema is current (v{})", version);
            }
            SchemaStatus::NotInitialized => {
                info!("Initializing monster database schema v{}", version);
                schema.initialize()?;
            }
            SchemaStatus::NeedsUpgrade { from, to } => {
                warn!(
                    "Monster database schema upgrade v{} -> v{}: dropping all monsters",
                    from, to
                );
                schema.drop_and_recreate()?;
            }
            SchemaStatus::Corrupted => {
                warn!("Monster table missing, recreating");
                schema.drop_and_recreate()?;
            }
            SchemaStatus::Downgrade {
                database_version,
                required_version,
            } => {
                return Err(StoreError::Downgrade {
                    database_version,
                    required_version,
                });
            }
        }

        Ok(Self { db })
    }

    /// Get the monster repository
    pub fn monsters(&self) -> MonsterRepository<'_> {
        MonsterRepository::new(&self.db.conn)
    }

    /// Get the schema version recorded in the database file
    pub fn schema_version(&self) -> StoreResult<Option<u32>> {
        SchemaManager::new(&self.db.conn).get_schema_version()
    }

    /// Drop every table and recreate the schema at [`SCHEMA_VERSION`]
    pub fn reset(&self) -> StoreResult<()> {
        SchemaManager::new(&self.db.conn).reset_and_initialize()
    }

    /// Get the underlying database connection (for advanced queries)
    pub fn connection(&self) -> &rusqlite::Connection {
        &self.db.conn
    }

    /// Close the database, releasing the connection
    pub fn close(self) -> StoreResult<()> {
        self.db.close()
    }
}

/// Check an existing file through a read-only connection so a file written
/// by a newer schema is rejected before any pragma touches it.
fn refuse_downgrade(path: &str, version: u32) -> StoreResult<()> {
    let db = DatabaseConn::open_read_only(path)?;
    if let SchemaStatus::Downgrade {
        database_version,
        required_version,
    } = SchemaManager::with_version(&db.conn, version).check_status()?
    {
        return Err(StoreError::Downgrade {
            database_version,
            required_version,
        });
    }
    db.close()
}
