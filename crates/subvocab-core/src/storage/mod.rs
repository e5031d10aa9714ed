//! Storage Module
//!
//! SQLite-based persistence for:
//! - Imported collections (word list, sentences, frequencies)
//! - Per-word review progress keyed by `(collection_id, word)`

mod migrations;
mod sqlite;

pub use migrations::MIGRATIONS;
pub use sqlite::{Result, Storage, StorageError};
