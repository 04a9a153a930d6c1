//! Monster lens types

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::database::Monster;
use crate::lens::utils::{truncate_text, DEFAULT_DESCRIPTION_MAX_LEN};

/// Sort order for monster listings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum MonsterSortOrder {
    /// Insertion order (default)
    #[default]
    Id,
    /// Alphabetical by name
    Name,
    /// Scariest first
    Scariness,
    /// Most votes first
    Votes,
    /// Most stars first
    Stars,
}

/// A monster as shown in table output
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct MonsterRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub scariness: i64,
    pub image: String,
    pub votes: i64,
    pub stars: i64,
}

impl MonsterRow {
    /// Build a display row, optionally shortening the description
    pub fn from_monster(monster: &Monster, truncate: bool) -> Self {
        let description = if truncate {
            truncate_text(&monster.description, DEFAULT_DESCRIPTION_MAX_LEN)
        } else {
            monster.description.clone()
        };
        Self {
            id: monster.id,
            name: monster.name.clone(),
            description,
            scariness: monster.scariness,
            image: monster.image_name.clone(),
            votes: monster.votes,
            stars: monster.stars,
        }
    }
}
