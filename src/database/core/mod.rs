//! Core database infrastructure
//!
//! This module provides the foundational database components used by the store:
//! - `DatabaseConn`: SQLite connection wrapper with configuration
//! - `SchemaManager`: Schema initialization, versioning and upgrade
//! - `SchemaStatus`: Schema state enumeration

mod connection;
mod schema;

pub use connection::DatabaseConn;
pub use schema::{
    SchemaDefinitions, SchemaManager, SchemaStatus, META_TABLE_NAME, MONSTER_TABLE_NAME,
    SCHEMA_VERSION,
};
