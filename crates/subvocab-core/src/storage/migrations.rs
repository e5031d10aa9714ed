//! Database Migrations
//!
//! Schema migration definitions for the storage layer.

use rusqlite::Connection;

/// Migration definitions
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Initial schema: collections and word progress",
        up: MIGRATION_V1_UP,
    },
    Migration {
        version: 2,
        description: "Due-date index for review queries",
        up: MIGRATION_V2_UP,
    },
];

/// A database migration
#[derive(Debug, Clone)]
pub struct Migration {
    /// Version number
    pub version: u32,
    /// Description
    pub description: &'static str,
    /// SQL to apply
    pub up: &'static str,
}

/// V1: Initial schema
const MIGRATION_V1_UP: &str = r#"
CREATE TABLE IF NOT EXISTS collections (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    created_at TEXT NOT NULL,

    -- JSON payloads
    words TEXT NOT NULL DEFAULT '[]',
    sentences TEXT NOT NULL DEFAULT '[]',
    frequency TEXT NOT NULL DEFAULT '{}'
);

CREATE INDEX IF NOT EXISTS idx_collections_created ON collections(created_at);

-- Progress rows may exist for collections this store never imported
CREATE TABLE IF NOT EXISTS word_progress (
    collection_id TEXT NOT NULL,
    word TEXT NOT NULL,
    review_count INTEGER NOT NULL DEFAULT 0,
    ease_factor REAL NOT NULL DEFAULT 2.5,
    interval_days INTEGER NOT NULL DEFAULT 0,
    next_review_date TEXT NOT NULL,
    proficiency TEXT,
    updated_at TEXT NOT NULL,

    PRIMARY KEY (collection_id, word)
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);

INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (1, datetime('now'));
"#;

/// V2: Index progress by due date
const MIGRATION_V2_UP: &str = r#"
CREATE INDEX IF NOT EXISTS idx_progress_next_review
    ON word_progress(collection_id, next_review_date);

UPDATE schema_version SET version = 2, applied_at = datetime('now');
"#;

/// Highest applied schema version; 0 before the first migration
pub fn get_current_version(conn: &Connection) -> rusqlite::Result<u32> {
    let tracked: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !tracked {
        return Ok(0);
    }

    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
}

/// Bring the schema to the latest version and return how many steps ran
///
/// Each step commits on its own; a failing step leaves earlier ones applied.
pub fn apply_migrations(conn: &Connection) -> rusqlite::Result<u32> {
    let from = get_current_version(conn)?;
    let pending: Vec<&Migration> = MIGRATIONS.iter().filter(|m| m.version > from).collect();

    for migration in &pending {
        tracing::info!(version = migration.version, "Migrating schema: {}", migration.description);
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.up)?;
        tx.commit()?;
    }

    Ok(pending.len() as u32)
}
