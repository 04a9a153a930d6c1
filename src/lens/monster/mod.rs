//! Monster lens
//!
//! This module provides the monster lens: the operations a front-end needs,
//! built on the monster repository, plus output formatting.

pub mod args;
pub mod types;

pub use args::{MonsterCreateArgs, MonsterDeleteArgs, MonsterListArgs, MonsterUpdateArgs};
pub use types::{MonsterRow, MonsterSortOrder};

use crate::database::{Monster, MonsterDatabase, StoreError};
use crate::lens::utils::{psv_escape, OutputFormat};
use anyhow::{anyhow, Result};
use tabled::settings::Style;
use tabled::Table;

/// Monster lens
///
/// Thin layer over [`MonsterDatabase`] that returns full records after
/// every mutation and renders them in any [`OutputFormat`].
pub struct MonsterLens<'a> {
    db: &'a MonsterDatabase,
}

impl<'a> MonsterLens<'a> {
    /// Create a new monster lens
    pub fn new(db: &'a MonsterDatabase) -> Self {
        Self { db }
    }

    /// Add a monster and return the stored record
    pub fn add(&self, args: &MonsterCreateArgs) -> Result<Monster> {
        let id = self
            .db
            .monsters()
            .create(&args.name, &args.description, args.scariness)?;
        self.get(id)
    }

    /// Get a monster by id, failing if it does not exist
    pub fn get(&self, id: i64) -> Result<Monster> {
        self.db
            .monsters()
            .get_by_id(id)?
            .ok_or_else(|| anyhow!(StoreError::NotFound(id)))
    }

    /// List monsters in the requested order
    pub fn list(&self, args: &MonsterListArgs) -> Result<Vec<Monster>> {
        let mut monsters = self.db.monsters().list()?;
        sort_monsters(&mut monsters, args.sort);
        Ok(monsters)
    }

    /// Update a monster and return the stored record
    pub fn update(&self, args: &MonsterUpdateArgs) -> Result<Monster> {
        self.db
            .monsters()
            .update(args.id, &args.name, &args.description, args.scariness)?;
        self.get(args.id)
    }

    /// Delete a monster
    ///
    /// Returns whether a row was removed. Without `if_exists`, a missing id
    /// is an error.
    pub fn delete(&self, args: &MonsterDeleteArgs) -> Result<bool> {
        let repo = self.db.monsters();
        if args.if_exists {
            Ok(repo.delete_if_exists(args.id)?)
        } else {
            repo.delete(args.id)?;
            Ok(true)
        }
    }

    /// Record a vote and return the updated monster
    pub fn vote(&self, id: i64) -> Result<Monster> {
        self.db.monsters().record_vote(id)?;
        self.get(id)
    }

    /// Set the star rating and return the updated monster
    pub fn star(&self, id: i64, stars: i64) -> Result<Monster> {
        self.db.monsters().set_stars(id, stars)?;
        self.get(id)
    }

    /// Format monsters for output
    pub fn format_monsters(
        &self,
        monsters: &[Monster],
        format: OutputFormat,
        truncate: bool,
    ) -> Result<String> {
        let output = match format {
            OutputFormat::Table | OutputFormat::Markdown => {
                let rows: Vec<MonsterRow> = monsters
                    .iter()
                    .map(|m| MonsterRow::from_monster(m, truncate))
                    .collect();
                let mut table = Table::new(rows);
                if format == OutputFormat::Table {
                    table.with(Style::rounded());
                } else {
                    table.with(Style::markdown());
                }
                table.to_string()
            }
            OutputFormat::Json => serde_json::to_string(monsters)?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(monsters)?,
            OutputFormat::JsonLine => monsters
                .iter()
                .map(serde_json::to_string)
                .collect::<Result<Vec<_>, _>>()?
                .join("\n"),
            OutputFormat::Psv => {
                let mut lines = vec!["id|name|description|scariness|image|votes|stars".to_string()];
                lines.extend(monsters.iter().map(|m| {
                    format!(
                        "{}|{}|{}|{}|{}|{}|{}",
                        m.id,
                        psv_escape(&m.name),
                        psv_escape(&m.description),
                        m.scariness,
                        m.image_name,
                        m.votes,
                        m.stars
                    )
                }));
                lines.join("\n")
            }
        };
        Ok(output)
    }
}

fn sort_monsters(monsters: &mut [Monster], order: MonsterSortOrder) {
    match order {
        MonsterSortOrder::Id => monsters.sort_by_key(|m| m.id),
        MonsterSortOrder::Name => monsters.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))),
        MonsterSortOrder::Scariness => {
            monsters.sort_by(|a, b| b.scariness.cmp(&a.scariness).then(a.id.cmp(&b.id)))
        }
        MonsterSortOrder::Votes => {
            monsters.sort_by(|a, b| b.votes.cmp(&a.votes).then(a.id.cmp(&b.id)))
        }
        MonsterSortOrder::Stars => {
            monsters.sort_by(|a, b| b.stars.cmp(&a.stars).then(a.id.cmp(&b.id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_db() -> MonsterDatabase {
        let db = MonsterDatabase::open_in_memory().unwrap();
        let repo = db.monsters();
        repo.create("Grok", "A rock monster", 7).unwrap();
        repo.create("Blob", "A gelatinous | cube", 2).unwrap();
        repo.create("Ash", "Smoke and embers", 9).unwrap();
        db
    }

    #[test]
    fn test_add_returns_record() {
        let db = MonsterDatabase::open_in_memory().unwrap();
        let lens = MonsterLens::new(&db);

        let monster = lens
            .add(&MonsterCreateArgs::new("Grok", "A rock monster", 7))
            .unwrap();
        assert_eq!(monster.id, 1);
        assert_eq!(monster.votes, 0);
    }

    #[test]
    fn test_get_missing() {
        let db = MonsterDatabase::open_in_memory().unwrap();
        let lens = MonsterLens::new(&db);

        let err = lens.get(5).unwrap_err();
        assert!(err
            .downcast_ref::<StoreError>()
            .is_some_and(|e| e.is_not_found()));
    }

    #[test]
    fn test_list_sorted() {
        let db = seeded_db();
        let lens = MonsterLens::new(&db);

        let by_scariness = lens
            .list(&MonsterListArgs {
                sort: MonsterSortOrder::Scariness,
                full: false,
            })
            .unwrap();
        let names: Vec<_> = by_scariness.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Ash", "Grok", "Blob"]);

        let by_name = lens
            .list(&MonsterListArgs {
                sort: MonsterSortOrder::Name,
                full: false,
            })
            .unwrap();
        assert_eq!(by_name[0].name, "Ash");
    }

    #[test]
    fn test_update_and_delete() {
        let db = seeded_db();
        let lens = MonsterLens::new(&db);

        let updated = lens
            .update(&MonsterUpdateArgs {
                id: 1,
                name: "Grak".to_string(),
                description: "A bigger rock monster".to_string(),
                scariness: 9,
            })
            .unwrap();
        assert_eq!(updated.name, "Grak");

        assert!(lens
            .delete(&MonsterDeleteArgs {
                id: 1,
                if_exists: false
            })
            .unwrap());
        assert!(!lens
            .delete(&MonsterDeleteArgs {
                id: 1,
                if_exists: true
            })
            .unwrap());
        assert!(lens
            .delete(&MonsterDeleteArgs {
                id: 1,
                if_exists: false
            })
            .is_err());
    }

    #[test]
    fn test_vote_and_star() {
        let db = seeded_db();
        let lens = MonsterLens::new(&db);

        assert_eq!(lens.vote(2).unwrap().votes, 1);
        assert_eq!(lens.star(2, 5).unwrap().stars, 5);
        assert!(lens.star(2, 9).is_err());
    }

    #[test]
    fn test_format_outputs() {
        let db = seeded_db();
        let lens = MonsterLens::new(&db);
        let monsters = lens.list(&MonsterListArgs::default()).unwrap();

        let table = lens
            .format_monsters(&monsters, OutputFormat::Markdown, true)
            .unwrap();
        assert!(table.contains("Grok"));
        assert!(table.contains("scariness"));

        let json = lens
            .format_monsters(&monsters, OutputFormat::Json, true)
            .unwrap();
        let parsed: Vec<Monster> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, monsters);

        let lines = lens
            .format_monsters(&monsters, OutputFormat::JsonLine, true)
            .unwrap();
        assert_eq!(lines.lines().count(), 3);

        let psv = lens
            .format_monsters(&monsters, OutputFormat::Psv, true)
            .unwrap();
        assert!(psv.starts_with("id|name|"));
        assert!(psv.contains("A gelatinous \\| cube"));
    }
}
