use anyhow::Result;
use clap::Args;
use monsterdb::lens::utils::OutputFormat;
use monsterdb::{format_size, get_sqlite_info, MonsterConfig, SqliteDatabaseInfo};
use serde::Serialize;

/// Arguments for the Config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Also show database file details
    #[clap(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Serialize)]
struct ConfigInfo {
    config_file: String,
    data_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<SqliteDatabaseInfo>,
}

pub fn run(config: &MonsterConfig, args: ConfigArgs, output_format: OutputFormat) -> Result<()> {
    let ConfigArgs { verbose } = args;

    let info = ConfigInfo {
        config_file: MonsterConfig::config_file_path(),
        data_dir: config.data_dir.clone(),
        database: verbose.then(|| get_sqlite_info(config)),
    };

    match output_format {
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(&info)?),
        f if f.is_json() => println!("{}", serde_json::to_string(&info)?),
        _ => {
            println!("Config File:        {}", info.config_file);
            println!("{}", config.summary());
            if let Some(db) = &info.database {
                println!(
                    "Database Exists:    {}",
                    if db.exists { "yes" } else { "no" }
                );
                if let Some(size) = db.size_bytes {
                    println!("Database Size:      {}", format_size(size));
                }
                if let Some(modified) = &db.modified {
                    println!("Last Modified:      {}", modified);
                }
            }
        }
    }
    Ok(())
}
