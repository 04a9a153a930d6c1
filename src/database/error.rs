//! Error types for the monster store

use thiserror::Error;

/// Result alias used throughout the database layer
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by the monster store
///
/// Every failure keeps the underlying SQLite error as its source so callers
/// can tell a missing row apart from a failed write.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing database file could not be opened or created
    #[error("failed to open database at '{path}': {source}")]
    Open {
        path: String,
        source: rusqlite::Error,
    },

    /// A connection pragma could not be applied
    #[error("failed to configure database ({pragma}): {source}")]
    Configure {
        pragma: &'static str,
        source: rusqlite::Error,
    },

    /// Creating, inspecting or dropping schema objects failed
    #[error("schema operation '{op}' failed: {source}")]
    Schema {
        op: &'static str,
        source: rusqlite::Error,
    },

    /// An insert, update or delete did not execute
    #[error("{op} failed: {source}")]
    WriteFailed {
        op: &'static str,
        source: rusqlite::Error,
    },

    /// A read did not execute or a row could not be mapped
    #[error("{op} failed: {source}")]
    ReadFailed {
        op: &'static str,
        source: rusqlite::Error,
    },

    /// No monster exists with the given id
    #[error("no monster with id {0}")]
    NotFound(i64),

    /// The database was written by a newer schema than this build declares
    #[error(
        "cannot downgrade database schema from v{database_version} to v{required_version}"
    )]
    Downgrade {
        database_version: u32,
        required_version: u32,
    },

    /// The recorded schema version is not a number
    #[error("invalid schema version recorded in database: '{0}'")]
    InvalidVersion(String),

    /// A star rating outside the accepted range
    #[error("stars must be between 0 and {max}, got {value}")]
    InvalidStars { value: i64, max: i64 },

    /// Releasing the connection failed
    #[error("failed to close database: {0}")]
    Close(#[source] rusqlite::Error),
}

impl StoreError {
    /// Whether this error means the requested row does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
