//! Database module
//!
//! This module provides all persistence for monsterdb, organized into:
//!
//! - **core**: SQLite connection wrapper and schema management
//! - **monster**: the monster store and its repository
//! - **error**: the store's error type
//!
//! # Architecture
//!
//! ```text
//! database/
//! ├── core/             # Foundation
//! │   ├── connection    # SQLite DatabaseConn wrapper
//! │   └── schema        # Table definitions, versioning, drop-and-recreate upgrade
//! │
//! ├── monster/          # Persistent storage
//! │   ├── repository    # create / update / delete / list / get_by_id
//! │   ├── engagement    # votes and stars
//! │   └── image         # image asset name assignment
//! │
//! └── error             # StoreError
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use monsterdb::database::MonsterDatabase;
//!
//! let db = MonsterDatabase::open_in_dir("~/.monsterdb")?;
//!
//! let id = db.monsters().create("Grok", "A rock monster", 7)?;
//! db.monsters().update(id, "Grak", "A bigger rock monster", 9)?;
//!
//! for monster in db.monsters().list()? {
//!     println!("{} {}", monster.id, monster.name);
//! }
//!
//! db.close()?;
//! ```

pub mod core;
pub mod error;
pub mod monster;

pub use core::{DatabaseConn, SchemaDefinitions, SchemaManager, SchemaStatus, SCHEMA_VERSION};
pub use error::{StoreError, StoreResult};
pub use monster::{
    image_index, random_image_name, Monster, MonsterDatabase, MonsterRepository,
    DATABASE_FILE_NAME, IMAGE_COUNT, IMAGE_PREFIX, MAX_STARS,
};

/// Ensure the data directory exists
pub fn ensure_data_dir(data_dir: &str) -> anyhow::Result<()> {
    std::fs::create_dir_all(data_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create data directory '{}': {}", data_dir, e))
}
