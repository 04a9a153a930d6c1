//! Vote and star mutations
//!
//! These sit outside the CRUD contract: `create` and `update` never touch
//! `VOTES` or `STARS`, only the operations here do.

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::MonsterRepository;
use crate::database::error::{StoreError, StoreResult};

/// Highest accepted star rating
pub const MAX_STARS: i64 = 5;

impl MonsterRepository<'_> {
    /// Add one vote to a monster and return its new vote total
    pub fn record_vote(&self, id: i64) -> StoreResult<i64> {
        let votes: Option<i64> = self
            .conn
            .query_row(
                "UPDATE monster SET VOTES = VOTES + 1 WHERE ID = ?1 RETURNING VOTES",
                [id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|source| StoreError::WriteFailed {
                op: "record vote",
                source,
            })?;

        let votes = votes.ok_or(StoreError::NotFound(id))?;
        debug!(id, votes, "recorded vote");
        Ok(votes)
    }

    /// Set the star rating of a monster, `0..=MAX_STARS`
    pub fn set_stars(&self, id: i64, stars: i64) -> StoreResult<()> {
        if !(0..=MAX_STARS).contains(&stars) {
            return Err(StoreError::InvalidStars {
                value: stars,
                max: MAX_STARS,
            });
        }

        let updated = self
            .conn
            .execute(
                "UPDATE monster SET STARS = ?1 WHERE ID = ?2",
                params![stars, id],
            )
            .map_err(|source| StoreError::WriteFailed {
                op: "set stars",
                source,
            })?;

        if updated == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MonsterDatabase;

    #[test]
    fn test_record_vote() {
        let db = MonsterDatabase::open_in_memory().unwrap();
        let repo = db.monsters();
        let id = repo.create("Grok", "A rock monster", 7).unwrap();

        assert_eq!(repo.record_vote(id).unwrap(), 1);
        assert_eq!(repo.record_vote(id).unwrap(), 2);
        assert_eq!(repo.get_by_id(id).unwrap().unwrap().votes, 2);
    }

    #[test]
    fn test_record_vote_missing() {
        let db = MonsterDatabase::open_in_memory().unwrap();
        assert!(db.monsters().record_vote(3).unwrap_err().is_not_found());
    }

    #[test]
    fn test_set_stars() {
        let db = MonsterDatabase::open_in_memory().unwrap();
        let repo = db.monsters();
        let id = repo.create("Grok", "A rock monster", 7).unwrap();

        repo.set_stars(id, 4).unwrap();
        let grok = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(grok.stars, 4);
        assert_eq!(grok.votes, 0);
        assert_eq!(grok.scariness, 7);
    }

    #[test]
    fn test_set_stars_out_of_range() {
        let db = MonsterDatabase::open_in_memory().unwrap();
        let repo = db.monsters();
        let id = repo.create("Grok", "A rock monster", 7).unwrap();

        assert!(matches!(
            repo.set_stars(id, 6),
            Err(StoreError::InvalidStars { value: 6, .. })
        ));
        assert!(matches!(
            repo.set_stars(id, -1),
            Err(StoreError::InvalidStars { value: -1, .. })
        ));
        assert!(repo.set_stars(id + 1, 3).unwrap_err().is_not_found());
    }
}
