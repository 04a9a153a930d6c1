//! Monster repository
//!
//! This module provides the CRUD operations over the `monster` table.

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::image::random_image_name;
use super::Monster;
use crate::database::error::{StoreError, StoreResult};

const SELECT_MONSTER: &str =
    "SELECT ID, NAME, DESCRIPTION, SCARINESS, IMAGE, VOTES, STARS FROM monster";

/// Repository for monster records
///
/// A repository borrows the store's connection; create one per batch of
/// operations through [`MonsterDatabase::monsters`](super::MonsterDatabase::monsters).
pub struct MonsterRepository<'a> {
    pub(super) conn: &'a Connection,
}

impl<'a> MonsterRepository<'a> {
    /// Create a new monster repository
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new monster and return its id
    ///
    /// The image name is picked here and never changes afterwards. Votes and
    /// stars start at zero.
    pub fn create(&self, name: &str, description: &str, scariness: i64) -> StoreResult<i64> {
        let image = random_image_name();
        self.conn
            .execute(
                "INSERT INTO monster (NAME, DESCRIPTION, SCARINESS, IMAGE) VALUES (?1, ?2, ?3, ?4)",
                params![name, description, scariness, image],
            )
            .map_err(|source| StoreError::WriteFailed {
                op: "insert monster",
                source,
            })?;

        let id = self.conn.last_insert_rowid();
        debug!(id, image = %image, "inserted monster");
        Ok(id)
    }

    /// Replace name, description and scariness of an existing monster
    ///
    /// Image, votes and stars are left as they are. Returns
    /// [`StoreError::NotFound`] if no row has the given id.
    pub fn update(
        &self,
        id: i64,
        name: &str,
        description: &str,
        scariness: i64,
    ) -> StoreResult<()> {
        let updated = self
            .conn
            .execute(
                "UPDATE monster SET NAME = ?1, DESCRIPTION = ?2, SCARINESS = ?3 WHERE ID = ?4",
                params![name, description, scariness, id],
            )
            .map_err(|source| StoreError::WriteFailed {
                op: "update monster",
                source,
            })?;

        if updated == 0 {
            return Err(StoreError::NotFound(id));
        }
        debug!(id, "updated monster");
        Ok(())
    }

    /// Delete a monster, failing with [`StoreError::NotFound`] if it doesn't exist
    pub fn delete(&self, id: i64) -> StoreResult<()> {
        if self.delete_if_exists(id)? {
            Ok(())
        } else {
            Err(StoreError::NotFound(id))
        }
    }

    /// Delete a monster if present
    ///
    /// Deleting a missing id is not an error; the return value tells whether
    /// a row was removed.
    pub fn delete_if_exists(&self, id: i64) -> StoreResult<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM monster WHERE ID = ?1", [id])
            .map_err(|source| StoreError::WriteFailed {
                op: "delete monster",
                source,
            })?;

        debug!(id, deleted, "deleted monster");
        Ok(deleted > 0)
    }

    /// Get a single monster by id
    pub fn get_by_id(&self, id: i64) -> StoreResult<Option<Monster>> {
        self.conn
            .query_row(&format!("{} WHERE ID = ?1", SELECT_MONSTER), [id], row_to_monster)
            .optional()
            .map_err(|source| StoreError::ReadFailed {
                op: "get monster",
                source,
            })
    }

    /// List every monster, ordered by id
    pub fn list(&self) -> StoreResult<Vec<Monster>> {
        let read_failed = |source: rusqlite::Error| StoreError::ReadFailed {
            op: "list monsters",
            source,
        };

        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY ID", SELECT_MONSTER))
            .map_err(read_failed)?;

        let rows = stmt.query_map([], row_to_monster).map_err(read_failed)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(read_failed)
    }

    /// Get the number of stored monsters
    pub fn count(&self) -> StoreResult<u64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM monster", [], |row| row.get(0))
            .map_err(|source| StoreError::ReadFailed {
                op: "count monsters",
                source,
            })
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.count()? == 0)
    }

    /// Delete all monsters, keeping the table
    ///
    /// Returns the number of rows removed.
    pub fn clear(&self) -> StoreResult<usize> {
        self.conn
            .execute("DELETE FROM monster", [])
            .map_err(|source| StoreError::WriteFailed {
                op: "clear monsters",
                source,
            })
    }
}

fn row_to_monster(row: &Row<'_>) -> rusqlite::Result<Monster> {
    Ok(Monster {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        scariness: row.get(3)?,
        image_name: row.get(4)?,
        votes: row.get(5)?,
        stars: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::core::{DatabaseConn, SchemaManager};
    use crate::database::monster::image::image_index;

    fn setup_test_db() -> DatabaseConn {
        let db = DatabaseConn::open_in_memory().unwrap();
        SchemaManager::new(&db.conn).initialize().unwrap();
        db
    }

    #[test]
    fn test_is_empty() {
        let db = setup_test_db();
        let repo = MonsterRepository::new(&db.conn);
        assert!(repo.is_empty().unwrap());
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_and_list() {
        let db = setup_test_db();
        let repo = MonsterRepository::new(&db.conn);

        let id = repo.create("Grok", "A rock monster", 7).unwrap();
        assert_eq!(id, 1);

        let monsters = repo.list().unwrap();
        assert_eq!(monsters.len(), 1);

        let grok = &monsters[0];
        assert_eq!(grok.id, 1);
        assert_eq!(grok.name, "Grok");
        assert_eq!(grok.description, "A rock monster");
        assert_eq!(grok.scariness, 7);
        assert!(image_index(&grok.image_name).is_some());
        assert_eq!(grok.votes, 0);
        assert_eq!(grok.stars, 0);
    }

    #[test]
    fn test_create_assigns_fresh_ids() {
        let db = setup_test_db();
        let repo = MonsterRepository::new(&db.conn);

        let a = repo.create("A", "first", 1).unwrap();
        let b = repo.create("B", "second", 2).unwrap();
        repo.delete(b).unwrap();
        let c = repo.create("C", "third", 3).unwrap();

        // AUTOINCREMENT never hands out a deleted id again
        assert!(a < b && b < c);
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_create_accepts_any_scariness() {
        let db = setup_test_db();
        let repo = MonsterRepository::new(&db.conn);

        let low = repo.create("Meek", "", i64::MIN).unwrap();
        let high = repo.create("Dread", "", i64::MAX).unwrap();

        assert_eq!(repo.get_by_id(low).unwrap().unwrap().scariness, i64::MIN);
        assert_eq!(repo.get_by_id(high).unwrap().unwrap().scariness, i64::MAX);
    }

    #[test]
    fn test_get_by_id() {
        let db = setup_test_db();
        let repo = MonsterRepository::new(&db.conn);

        let id = repo.create("Grok", "A rock monster", 7).unwrap();
        let found = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(found.name, "Grok");

        assert_eq!(repo.get_by_id(id + 100).unwrap(), None);
    }

    #[test]
    fn test_update_keeps_image_votes_stars() {
        let db = setup_test_db();
        let repo = MonsterRepository::new(&db.conn);

        let id = repo.create("Grok", "A rock monster", 7).unwrap();
        db.conn
            .execute("UPDATE monster SET VOTES = 4, STARS = 2 WHERE ID = ?1", [id])
            .unwrap();
        let before = repo.get_by_id(id).unwrap().unwrap();

        repo.update(id, "Grak", "A bigger rock monster", 9).unwrap();

        let after = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(after.id, id);
        assert_eq!(after.name, "Grak");
        assert_eq!(after.description, "A bigger rock monster");
        assert_eq!(after.scariness, 9);
        assert_eq!(after.image_name, before.image_name);
        assert_eq!(after.votes, 4);
        assert_eq!(after.stars, 2);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let db = setup_test_db();
        let repo = MonsterRepository::new(&db.conn);

        let err = repo.update(99, "Ghost", "Not here", 1).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(99)));
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn test_delete() {
        let db = setup_test_db();
        let repo = MonsterRepository::new(&db.conn);

        let id = repo.create("Grok", "A rock monster", 7).unwrap();
        repo.delete(id).unwrap();
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_strict() {
        let db = setup_test_db();
        let repo = MonsterRepository::new(&db.conn);

        let err = repo.delete(1).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_missing_lenient() {
        let db = setup_test_db();
        let repo = MonsterRepository::new(&db.conn);

        let id = repo.create("Grok", "A rock monster", 7).unwrap();
        assert!(repo.delete_if_exists(id).unwrap());
        assert!(!repo.delete_if_exists(id).unwrap());
    }

    #[test]
    fn test_list_is_stable() {
        let db = setup_test_db();
        let repo = MonsterRepository::new(&db.conn);

        repo.create("A", "a", 1).unwrap();
        repo.create("B", "b", 2).unwrap();
        repo.create("C", "c", 3).unwrap();

        let first = repo.list().unwrap();
        let second = repo.list().unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_list_rejects_null_name() {
        let db = setup_test_db();
        db.conn
            .execute(
                "INSERT INTO monster (NAME, DESCRIPTION, SCARINESS, IMAGE) VALUES (NULL, 'x', 1, 'monster_1')",
                [],
            )
            .unwrap();

        let repo = MonsterRepository::new(&db.conn);
        assert!(matches!(
            repo.list(),
            Err(StoreError::ReadFailed { .. })
        ));
    }

    #[test]
    fn test_clear() {
        let db = setup_test_db();
        let repo = MonsterRepository::new(&db.conn);

        repo.create("A", "a", 1).unwrap();
        repo.create("B", "b", 2).unwrap();
        assert_eq!(repo.clear().unwrap(), 2);
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn test_write_without_table_fails() {
        let db = DatabaseConn::open_in_memory().unwrap();
        let repo = MonsterRepository::new(&db.conn);

        assert!(matches!(
            repo.create("Grok", "A rock monster", 7),
            Err(StoreError::WriteFailed { .. })
        ));
    }
}
