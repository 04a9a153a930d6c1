//! Monster lens arguments
//!
//! These argument structures double as clap argument groups when the `cli`
//! feature is enabled, and as serde payloads otherwise.

use serde::{Deserialize, Serialize};

use super::types::MonsterSortOrder;

/// Arguments for adding a monster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct MonsterCreateArgs {
    /// Monster name
    pub name: String,

    /// Monster description
    pub description: String,

    /// Scariness level, any integer
    #[cfg_attr(feature = "cli", clap(allow_negative_numbers = true))]
    pub scariness: i64,
}

impl MonsterCreateArgs {
    pub fn new(name: impl Into<String>, description: impl Into<String>, scariness: i64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            scariness,
        }
    }
}

/// Arguments for updating a monster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct MonsterUpdateArgs {
    /// Id of the monster to update
    pub id: i64,

    /// New name
    pub name: String,

    /// New description
    pub description: String,

    /// New scariness level
    #[cfg_attr(feature = "cli", clap(allow_negative_numbers = true))]
    pub scariness: i64,
}

/// Arguments for deleting a monster
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct MonsterDeleteArgs {
    /// Id of the monster to delete
    pub id: i64,

    /// Succeed even if no monster has this id
    #[cfg_attr(feature = "cli", clap(long))]
    #[serde(default)]
    pub if_exists: bool,
}

/// Arguments for listing monsters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct MonsterListArgs {
    /// Sort order
    #[cfg_attr(feature = "cli", clap(long, value_enum, default_value_t = MonsterSortOrder::Id))]
    #[serde(default)]
    pub sort: MonsterSortOrder,

    /// Show full descriptions instead of truncating them in tables
    #[cfg_attr(feature = "cli", clap(long))]
    #[serde(default)]
    pub full: bool,
}
