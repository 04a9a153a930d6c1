//! Lens module
//!
//! Lenses combine store operations with output formatting so that every
//! front-end (the CLI today) renders monsters the same way.
//!
//! Each lens module exports:
//! - A **Lens struct** (`MonsterLens`) - the entry point for all operations
//! - **Args structs** - input arguments for lens methods
//! - **Output types** - display rows and sort orders
//!
//! ```rust,ignore
//! use monsterdb::database::MonsterDatabase;
//! use monsterdb::lens::monster::{MonsterCreateArgs, MonsterLens};
//! use monsterdb::lens::utils::OutputFormat;
//!
//! let db = MonsterDatabase::open_in_memory()?;
//! let lens = MonsterLens::new(&db);
//! let grok = lens.add(&MonsterCreateArgs::new("Grok", "A rock monster", 7))?;
//! println!("{}", lens.format_monsters(&[grok], OutputFormat::Table, true)?);
//! ```

pub mod monster;
pub mod utils;
