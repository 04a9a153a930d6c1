use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use config::Config;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

use crate::database::core::MONSTER_TABLE_NAME;
use crate::database::{DatabaseConn, SchemaManager, SchemaStatus, DATABASE_FILE_NAME};

pub struct MonsterConfig {
    /// Path to the directory holding the monster database
    pub data_dir: String,
}

const EMPTY_CONFIG: &str = r#"### monsterdb configuration file

### directory holding the monster database (monster.db)
# data_dir = "~/.monsterdb"
"#;

impl Default for MonsterConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());

        Self {
            data_dir: format!("{}/.monsterdb", home_dir),
        }
    }
}

impl MonsterConfig {
    /// Function to create and initialize a new configuration
    pub fn new(path: &Option<String>) -> Result<MonsterConfig> {
        let mut builder = Config::builder();

        // By default use $HOME/.monsterdb/monsterdb.toml as the configuration file path
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
            .to_owned();

        let monsterdb_dir = format!("{}/.monsterdb", home_dir.as_str());

        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                std::fs::create_dir_all(monsterdb_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create monsterdb directory: {}", e))?;
                let p = format!("{}/monsterdb.toml", monsterdb_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
            }
        }

        // E.g., `MONSTERDB_DATA_DIR=/tmp/monsters monsterdb list` overrides the data directory
        builder = builder.add_source(config::Environment::with_prefix("MONSTERDB"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        let data_dir = match config.get("data_dir") {
            Some(p) => expand_home(p, &home_dir),
            None => format!("{}/", monsterdb_dir),
        };

        Ok(MonsterConfig { data_dir })
    }

    /// Get the path to the SQLite database file
    pub fn sqlite_path(&self) -> String {
        let data_dir = self.data_dir.trim_end_matches('/');
        format!("{}/{}", data_dir, DATABASE_FILE_NAME)
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        [
            format!("Data Directory:     {}", self.data_dir),
            format!("SQLite Path:        {}", self.sqlite_path()),
        ]
        .join("\n")
    }

    /// Get the config file path
    pub fn config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{}/.monsterdb/monsterdb.toml", home_dir)
    }
}

fn expand_home(path: &str, home_dir: &str) -> String {
    match path.strip_prefix("~/") {
        Some(rest) => format!("{}/{}", home_dir.trim_end_matches('/'), rest),
        None if path == "~" => home_dir.to_string(),
        None => path.to_string(),
    }
}

/// Information about the SQLite database file
#[derive(Debug, Serialize, Clone)]
pub struct SqliteDatabaseInfo {
    pub path: String,
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    pub schema_initialized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monster_count: Option<u64>,
}

/// Inspect the database file without opening it as a store
///
/// Opening a [`MonsterDatabase`](crate::database::MonsterDatabase) may
/// upgrade the schema or switch the journal mode, so this goes through a
/// read-only connection instead.
pub fn get_sqlite_info(config: &MonsterConfig) -> SqliteDatabaseInfo {
    let sqlite_path = config.sqlite_path();
    let metadata = std::fs::metadata(&sqlite_path).ok();
    let sqlite_exists = metadata.is_some();
    let size_bytes = metadata.as_ref().map(|m| m.len());
    let modified = metadata.and_then(|m| m.modified().ok()).map(|t| {
        DateTime::<Utc>::from(t)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
    });

    let mut info = SqliteDatabaseInfo {
        path: sqlite_path.clone(),
        exists: sqlite_exists,
        size_bytes,
        modified,
        schema_initialized: false,
        schema_version: None,
        monster_count: None,
    };

    if !sqlite_exists {
        return info;
    }

    let Ok(db) = DatabaseConn::open_read_only(&sqlite_path) else {
        return info;
    };
    let manager = SchemaManager::new(&db.conn);

    info.schema_initialized = !matches!(
        manager.check_status(),
        Ok(SchemaStatus::NotInitialized) | Err(_)
    );
    info.schema_version = manager.get_schema_version().ok().flatten();
    if db.table_exists(MONSTER_TABLE_NAME).unwrap_or(false) {
        info.monster_count = db.table_count(MONSTER_TABLE_NAME).ok();
    }

    info
}

/// Format a byte size into a human-readable string
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
