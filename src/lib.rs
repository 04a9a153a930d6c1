#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! monsterdb - an embedded store for monster records
//!
//! monsterdb keeps monsters (name, description, scariness, image, votes,
//! stars) in a single SQLite table. It can be used as a library or through
//! the `monsterdb` command-line tool.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | `database` | SQLite store and configuration | `rusqlite`, `config` |
//! | `lens` | Store plus output formatting | `tabled`, `serde_json` |
//! | `display` | Table formatting with `tabled` | `tabled` |
//! | `cli` | Command-line binary | All above + `clap`, `dotenvy`, `tracing-subscriber` |
//!
//! ```toml
//! # Store and configuration, without output formatting or the CLI
//! monsterdb = { version = "0.1", default-features = false, features = ["database"] }
//!
//! # Default (CLI binary)
//! monsterdb = "0.1"
//! ```
//!
//! # Architecture
//!
//! - **[`database`]**: the store (always available)
//!   - `core`: SQLite connection management and schema versioning
//!   - `monster`: `MonsterDatabase` and its `MonsterRepository`
//! - **`lens`**: operations plus output formatting (requires `lens`)
//! - **[`config`]**: configuration management
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use monsterdb::database::MonsterDatabase;
//!
//! let db = MonsterDatabase::open_in_dir("/var/lib/monsterdb")?;
//! let id = db.monsters().create("Grok", "A rock monster", 7)?;
//!
//! let grok = db.monsters().get_by_id(id)?.expect("just inserted");
//! assert_eq!(grok.votes, 0);
//! assert!(grok.image_name.starts_with("monster_"));
//!
//! db.monsters().delete(id)?;
//! db.close()?;
//! ```

pub mod config;
pub mod database;

#[cfg(feature = "lens")]
pub mod lens;

pub use config::MonsterConfig;
pub use config::{format_size, get_sqlite_info, SqliteDatabaseInfo};

pub use database::{
    Monster, MonsterDatabase, MonsterRepository, SchemaManager, SchemaStatus, StoreError,
    StoreResult, SCHEMA_VERSION,
};

#[cfg(feature = "lens")]
pub use lens::utils::OutputFormat;
