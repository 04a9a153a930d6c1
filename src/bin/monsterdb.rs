use clap::{Parser, Subcommand};
use monsterdb::lens::monster::{
    MonsterCreateArgs, MonsterDeleteArgs, MonsterListArgs, MonsterUpdateArgs,
};
use monsterdb::lens::utils::OutputFormat;
use monsterdb::MonsterConfig;
use tracing::Level;

mod commands;

use commands::config::ConfigArgs;
use commands::database::DatabaseArgs;
use commands::monster::StarArgs;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.monsterdb/monsterdb.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long, global = true)]
    debug: bool,

    /// Output format: table, markdown, json, json-pretty, json-line, psv
    #[clap(short, long, global = true, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new monster
    Add(MonsterCreateArgs),

    /// Show a single monster by id
    Get {
        /// Monster id
        id: i64,
    },

    /// List all monsters
    List(MonsterListArgs),

    /// Update name, description and scariness of a monster
    Update(MonsterUpdateArgs),

    /// Delete a monster
    Delete(MonsterDeleteArgs),

    /// Add a vote to a monster
    Vote {
        /// Monster id
        id: i64,
    },

    /// Set the star rating of a monster
    Star(StarArgs),

    /// Show configuration and database file information
    Config(ConfigArgs),

    /// Database status and maintenance
    Database(DatabaseArgs),
}

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = match MonsterConfig::new(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    let format = cli.format;
    let result = match cli.command {
        Commands::Add(args) => commands::monster::run_add(&config, args, format),
        Commands::Get { id } => commands::monster::run_get(&config, id, format),
        Commands::List(args) => commands::monster::run_list(&config, args, format),
        Commands::Update(args) => commands::monster::run_update(&config, args, format),
        Commands::Delete(args) => commands::monster::run_delete(&config, args, format),
        Commands::Vote { id } => commands::monster::run_vote(&config, id, format),
        Commands::Star(args) => commands::monster::run_star(&config, args, format),
        Commands::Config(args) => commands::config::run(&config, args, format),
        Commands::Database(args) => commands::database::run(&config, args, format),
    };

    if let Err(e) = result {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}
