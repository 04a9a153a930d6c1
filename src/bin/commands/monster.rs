use anyhow::Result;
use clap::Args;
use monsterdb::lens::monster::{
    MonsterCreateArgs, MonsterDeleteArgs, MonsterLens, MonsterListArgs, MonsterUpdateArgs,
};
use monsterdb::lens::utils::OutputFormat;
use monsterdb::{Monster, MonsterConfig};
use serde_json::json;

use super::open_database;

/// Arguments for the Star command
#[derive(Args)]
pub struct StarArgs {
    /// Monster id
    pub id: i64,

    /// Star rating, 0 to 5
    pub stars: i64,
}

pub fn run_add(config: &MonsterConfig, args: MonsterCreateArgs, format: OutputFormat) -> Result<()> {
    let db = open_database(config)?;
    let monster = MonsterLens::new(&db).add(&args)?;
    print_monsters(&db, &[monster], format, true)?;
    db.close()?;
    Ok(())
}

pub fn run_get(config: &MonsterConfig, id: i64, format: OutputFormat) -> Result<()> {
    let db = open_database(config)?;
    let monster = MonsterLens::new(&db).get(id)?;
    print_monsters(&db, &[monster], format, false)?;
    db.close()?;
    Ok(())
}

pub fn run_list(config: &MonsterConfig, args: MonsterListArgs, format: OutputFormat) -> Result<()> {
    let db = open_database(config)?;
    let monsters = MonsterLens::new(&db).list(&args)?;
    if monsters.is_empty() && format.is_table() {
        println!("No monsters yet. Add one with `monsterdb add <NAME> <DESCRIPTION> <SCARINESS>`.");
    } else {
        print_monsters(&db, &monsters, format, !args.full)?;
    }
    db.close()?;
    Ok(())
}

pub fn run_update(
    config: &MonsterConfig,
    args: MonsterUpdateArgs,
    format: OutputFormat,
) -> Result<()> {
    let db = open_database(config)?;
    let monster = MonsterLens::new(&db).update(&args)?;
    print_monsters(&db, &[monster], format, true)?;
    db.close()?;
    Ok(())
}

pub fn run_delete(
    config: &MonsterConfig,
    args: MonsterDeleteArgs,
    format: OutputFormat,
) -> Result<()> {
    let db = open_database(config)?;
    let deleted = MonsterLens::new(&db).delete(&args)?;

    if format.is_json() {
        println!("{}", json!({ "id": args.id, "deleted": deleted }));
    } else if deleted {
        println!("Deleted monster {}", args.id);
    } else {
        println!("No monster with id {}, nothing deleted", args.id);
    }
    db.close()?;
    Ok(())
}

pub fn run_vote(config: &MonsterConfig, id: i64, format: OutputFormat) -> Result<()> {
    let db = open_database(config)?;
    let monster = MonsterLens::new(&db).vote(id)?;
    print_monsters(&db, &[monster], format, true)?;
    db.close()?;
    Ok(())
}

pub fn run_star(config: &MonsterConfig, args: StarArgs, format: OutputFormat) -> Result<()> {
    let db = open_database(config)?;
    let monster = MonsterLens::new(&db).star(args.id, args.stars)?;
    print_monsters(&db, &[monster], format, true)?;
    db.close()?;
    Ok(())
}

fn print_monsters(
    db: &monsterdb::MonsterDatabase,
    monsters: &[Monster],
    format: OutputFormat,
    truncate: bool,
) -> Result<()> {
    let output = MonsterLens::new(db).format_monsters(monsters, format, truncate)?;
    println!("{}", output);
    Ok(())
}
