pub mod config;
pub mod database;
pub mod monster;

use anyhow::Result;
use monsterdb::database::{ensure_data_dir, MonsterDatabase};
use monsterdb::MonsterConfig;

/// Open the store in the configured data directory, creating it if needed
pub(crate) fn open_database(config: &MonsterConfig) -> Result<MonsterDatabase> {
    ensure_data_dir(&config.data_dir)?;
    Ok(MonsterDatabase::open_in_dir(&config.data_dir)?)
}
