//! SQLite Storage Implementation
//!
//! Collections and review progress. Timestamps are stored as RFC 3339 text,
//! word lists and frequency maps as JSON.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};

use crate::collection::{Collection, CollectionSummary};
use crate::srs::{Proficiency, ProgressMap, StudyStats, WordReviewState};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Storage error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Collection not found
    #[error("Collection not found: {0}")]
    NotFound(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid timestamp
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
    /// JSON column could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

// ============================================================================
// STORAGE
// ============================================================================

/// Progress and collection store
///
/// Uses separate reader/writer connections behind mutexes, so every method
/// takes `&self` and `Storage` is `Send + Sync`.
pub struct Storage {
    writer: Mutex<Connection>,
    reader: Mutex<Connection>,
}

impl Storage {
    /// Apply PRAGMAs to a connection
    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;
             PRAGMA busy_timeout = 5000;",
        )?;

        Ok(())
    }

    /// Open (or create) the database
    ///
    /// `None` uses `subvocab.db` in the platform data directory.
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = match db_path {
            Some(p) => p,
            None => {
                let proj_dirs = ProjectDirs::from("com", "subvocab", "core").ok_or_else(|| {
                    StorageError::Init("Could not determine project directories".to_string())
                })?;

                let data_dir = proj_dirs.data_dir();
                std::fs::create_dir_all(data_dir)?;
                data_dir.join("subvocab.db")
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let writer_conn = Connection::open(&path)?;
        Self::configure_connection(&writer_conn)?;

        // Migrations run on the writer only
        super::migrations::apply_migrations(&writer_conn)?;

        let reader_conn = Connection::open(&path)?;
        Self::configure_connection(&reader_conn)?;

        tracing::debug!(path = %path.display(), "Opened progress store");

        Ok(Self {
            writer: Mutex::new(writer_conn),
            reader: Mutex::new(reader_conn),
        })
    }

    // ========================================================================
    // COLLECTIONS
    // ========================================================================

    /// Insert or replace a collection; its progress is untouched
    pub fn save_collection(&self, collection: &Collection) -> Result<()> {
        let words = serde_json::to_string(&collection.words)?;
        let sentences = serde_json::to_string(&collection.sentences)?;
        let frequency = serde_json::to_string(&collection.frequency)?;

        let writer = self.writer.lock()
            .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
        writer.execute(
            "INSERT INTO collections (id, title, created_at, words, sentences, frequency)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                words = excluded.words,
                sentences = excluded.sentences,
                frequency = excluded.frequency",
            params![
                collection.id,
                collection.title,
                collection.created_at.to_rfc3339(),
                words,
                sentences,
                frequency,
            ],
        )?;

        tracing::debug!(id = %collection.id, words = collection.words.len(), "Saved collection");
        Ok(())
    }

    /// Get a collection by ID
    pub fn get_collection(&self, id: &str) -> Result<Option<Collection>> {
        let reader = self.reader.lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare(
            "SELECT id, title, created_at, words, sentences, frequency
             FROM collections WHERE id = ?1",
        )?;

        let row = stmt
            .query_row(params![id], |row| {
                Ok((
                    row.get::<_, String>("id")?,
                    row.get::<_, String>("title")?,
                    row.get::<_, String>("created_at")?,
                    row.get::<_, String>("words")?,
                    row.get::<_, String>("sentences")?,
                    row.get::<_, String>("frequency")?,
                ))
            })
            .optional()?;

        let Some((id, title, created_at, words, sentences, frequency)) = row else {
            return Ok(None);
        };

        let created_at = DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| StorageError::InvalidTimestamp(format!("created_at '{}': {}", created_at, e)))?;
        let words: Vec<String> = serde_json::from_str(&words)?;
        let sentences: Vec<String> = serde_json::from_str(&sentences)?;
        let frequency: HashMap<String, usize> = serde_json::from_str(&frequency)?;

        Ok(Some(Collection {
            id,
            title,
            created_at,
            words,
            sentences,
            frequency,
        }))
    }

    /// All collections, newest first
    pub fn list_collections(&self) -> Result<Vec<CollectionSummary>> {
        let reader = self.reader.lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare(
            "SELECT id, title, created_at, json_array_length(words) AS word_count
             FROM collections
             ORDER BY created_at DESC",
        )?;

        let rows = stmt.query_map([], |row| {
            let created_at: String = row.get("created_at")?;
            let word_count: i64 = row.get("word_count")?;
            Ok(CollectionSummary {
                id: row.get("id")?,
                title: row.get("title")?,
                created_at: Self::parse_timestamp(&created_at, "created_at")?,
                word_count: word_count.max(0) as usize,
            })
        })?;

        let mut result = Vec::new();
        for summary in rows {
            result.push(summary?);
        }
        Ok(result)
    }

    /// Delete a collection and all of its progress
    pub fn delete_collection(&self, id: &str) -> Result<bool> {
        let mut writer = self.writer.lock()
            .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
        let tx = writer.transaction()?;

        let progress_rows = tx.execute(
            "DELETE FROM word_progress WHERE collection_id = ?1",
            params![id],
        )?;
        let rows = tx.execute("DELETE FROM collections WHERE id = ?1", params![id])?;
        tx.commit()?;

        if rows > 0 {
            tracing::info!(id = %id, progress_rows, "Deleted collection");
        }
        Ok(rows > 0)
    }

    // ========================================================================
    // PROGRESS
    // ========================================================================

    /// Review state of every studied word in a collection
    ///
    /// Unknown collections yield an empty map.
    pub fn load_progress(&self, collection_id: &str) -> Result<ProgressMap> {
        let reader = self.reader.lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare(
            "SELECT word, review_count, ease_factor, interval_days, next_review_date, proficiency
             FROM word_progress WHERE collection_id = ?1",
        )?;

        let rows = stmt.query_map(params![collection_id], |row| {
            Ok((row.get::<_, String>("word")?, Self::row_to_state(row)?))
        })?;

        let mut progress = ProgressMap::new();
        for row in rows {
            let (word, state) = row?;
            progress.insert(word, state);
        }
        Ok(progress)
    }

    /// Review state of a single word
    pub fn get_progress(&self, collection_id: &str, word: &str) -> Result<Option<WordReviewState>> {
        let reader = self.reader.lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))?;
        let mut stmt = reader.prepare(
            "SELECT review_count, ease_factor, interval_days, next_review_date, proficiency
             FROM word_progress WHERE collection_id = ?1 AND word = ?2",
        )?;

        let state = stmt
            .query_row(params![collection_id, word], |row| Self::row_to_state(row))
            .optional()?;
        Ok(state)
    }

    /// Upsert one word's review state
    pub fn save_progress(
        &self,
        collection_id: &str,
        word: &str,
        state: &WordReviewState,
    ) -> Result<()> {
        let writer = self.writer.lock()
            .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
        Self::upsert_progress(&writer, collection_id, word, state)?;
        Ok(())
    }

    /// Upsert many words in one transaction
    pub fn save_all_progress(&self, collection_id: &str, progress: &ProgressMap) -> Result<usize> {
        let mut writer = self.writer.lock()
            .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
        let tx = writer.transaction()?;
        for (word, state) in progress {
            Self::upsert_progress(&tx, collection_id, word, state)?;
        }
        tx.commit()?;
        Ok(progress.len())
    }

    /// Forget one word's progress, making it new again
    pub fn delete_progress(&self, collection_id: &str, word: &str) -> Result<bool> {
        let writer = self.writer.lock()
            .map_err(|_| StorageError::Init("Writer lock poisoned".into()))?;
        let rows = writer.execute(
            "DELETE FROM word_progress WHERE collection_id = ?1 AND word = ?2",
            params![collection_id, word],
        )?;
        Ok(rows > 0)
    }

    /// Statistics for a stored collection as of now
    pub fn collection_stats(&self, collection_id: &str) -> Result<StudyStats> {
        let collection = self
            .get_collection(collection_id)?
            .ok_or_else(|| StorageError::NotFound(collection_id.to_string()))?;
        let progress = self.load_progress(collection_id)?;

        Ok(StudyStats::collect(&collection.words, &progress, Utc::now()))
    }

    fn upsert_progress(
        conn: &Connection,
        collection_id: &str,
        word: &str,
        state: &WordReviewState,
    ) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO word_progress (
                collection_id, word, review_count, ease_factor, interval_days,
                next_review_date, proficiency, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(collection_id, word) DO UPDATE SET
                review_count = excluded.review_count,
                ease_factor = excluded.ease_factor,
                interval_days = excluded.interval_days,
                next_review_date = excluded.next_review_date,
                proficiency = excluded.proficiency,
                updated_at = excluded.updated_at",
            params![
                collection_id,
                word,
                state.review_count,
                state.ease_factor,
                state.interval,
                state.next_review_date.to_rfc3339(),
                state.proficiency.map(|p| p.as_str()),
                Utc::now().to_rfc3339(),
            ],
        )
    }

    /// Parse RFC3339 timestamp
    fn parse_timestamp(value: &str, field_name: &str) -> rusqlite::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    0,
                    rusqlite::types::Type::Text,
                    Box::new(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("Invalid {} timestamp '{}': {}", field_name, value, e),
                    )),
                )
            })
    }

    /// Convert a progress row to WordReviewState
    fn row_to_state(row: &rusqlite::Row) -> rusqlite::Result<WordReviewState> {
        let next_review_date: String = row.get("next_review_date")?;
        let proficiency: Option<String> = row.get("proficiency")?;

        Ok(WordReviewState {
            review_count: row.get("review_count")?,
            ease_factor: row.get("ease_factor")?,
            interval: row.get("interval_days")?,
            next_review_date: Self::parse_timestamp(&next_review_date, "next_review_date")?,
            proficiency: proficiency.as_deref().and_then(Proficiency::parse_name),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
