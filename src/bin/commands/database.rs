use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use monsterdb::lens::utils::OutputFormat;
use monsterdb::{format_size, get_sqlite_info, MonsterConfig, SqliteDatabaseInfo, SCHEMA_VERSION};
use serde_json::json;
use tracing::info;

use super::open_database;

/// Arguments for the Database command
#[derive(Args)]
pub struct DatabaseArgs {
    #[clap(subcommand)]
    pub command: Option<DatabaseCommands>,
}

/// Database subcommands
#[derive(Subcommand)]
pub enum DatabaseCommands {
    /// Show database status (default when no subcommand)
    Status,

    /// Drop all monsters and recreate the schema
    Reset {
        /// Confirm deleting every monster
        #[clap(long, short = 'y')]
        yes: bool,
    },
}

pub fn run(config: &MonsterConfig, args: DatabaseArgs, output_format: OutputFormat) -> Result<()> {
    match args.command {
        None | Some(DatabaseCommands::Status) => run_status(config, output_format),
        Some(DatabaseCommands::Reset { yes }) => run_reset(config, yes, output_format),
    }
}

fn run_status(config: &MonsterConfig, output_format: OutputFormat) -> Result<()> {
    let sqlite = get_sqlite_info(config);

    match output_format {
        OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(&sqlite)?),
        f if f.is_json() => println!("{}", serde_json::to_string(&sqlite)?),
        _ => print_status_table(&sqlite),
    }
    Ok(())
}

fn print_status_table(sqlite: &SqliteDatabaseInfo) {
    println!("Monster Database Status");
    println!("=======================\n");

    println!("  Path:           {}", sqlite.path);
    println!(
        "  Status:         {}",
        if sqlite.exists {
            "exists"
        } else {
            "not created"
        }
    );
    if let Some(size) = sqlite.size_bytes {
        println!("  Size:           {}", format_size(size));
    }
    match sqlite.schema_version {
        Some(v) if v == SCHEMA_VERSION => println!("  Schema:         v{} (current)", v),
        Some(v) => println!("  Schema:         v{} (this build uses v{})", v, SCHEMA_VERSION),
        None => println!("  Schema:         not initialized"),
    }
    if let Some(count) = sqlite.monster_count {
        println!("  Monsters:       {}", count);
    }
}

fn run_reset(config: &MonsterConfig, yes: bool, output_format: OutputFormat) -> Result<()> {
    if !yes {
        return Err(anyhow!(
            "refusing to delete all monsters without --yes"
        ));
    }

    let db = open_database(config)?;
    let removed = db.monsters().count()?;
    db.reset()?;
    db.close()?;
    info!("reset monster database, {} monsters removed", removed);

    if output_format.is_json() {
        println!("{}", json!({ "reset": true, "removed": removed }));
    } else {
        println!("Database reset, {} monsters removed", removed);
    }
    Ok(())
}
