//! Test Database Manager
//!
//! Provides isolated database instances for testing:
//! - Temporary databases that are automatically cleaned up
//! - Pre-seeded collections and progress
//! - Reopening the same file to check persistence

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use subvocab_core::{Collection, Feedback, ReviewScheduler, Storage, WordReviewState};
use tempfile::TempDir;

/// Manager for test databases
///
/// Creates isolated database instances for each test to prevent interference.
/// Automatically cleans up temporary databases when dropped.
///
/// # Example
///
/// ```rust,ignore
/// let db = TestDatabaseManager::new_temp();
/// let collection = db.seed_collection("Pilot", TestDataFactory::HARBOR_SRT);
///
/// // Database is automatically deleted when `db` goes out of scope
/// ```
pub struct TestDatabaseManager {
    /// The storage instance
    pub storage: Storage,
    /// Temporary directory (kept alive to prevent premature deletion)
    _temp_dir: Option<TempDir>,
    /// Path to the database file
    db_path: PathBuf,
}

impl TestDatabaseManager {
    /// Create a new test database in a temporary directory
    pub fn new_temp() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test_subvocab.db");

        let storage = Storage::new(Some(db_path.clone())).expect("Failed to create test storage");

        Self {
            storage,
            _temp_dir: Some(temp_dir),
            db_path,
        }
    }

    /// Create a test database at a specific path
    ///
    /// The database is NOT automatically deleted.
    pub fn new_at_path(path: PathBuf) -> Self {
        let storage = Storage::new(Some(path.clone())).expect("Failed to create test storage");

        Self {
            storage,
            _temp_dir: None,
            db_path: path,
        }
    }

    /// Get the database path
    pub fn path(&self) -> &PathBuf {
        &self.db_path
    }

    /// A second, independent connection to the same file
    pub fn reopen(&self) -> Storage {
        Storage::new(Some(self.db_path.clone())).expect("Failed to reopen test storage")
    }

    /// Check if the database has no collections
    pub fn is_empty(&self) -> bool {
        self.collection_count() == 0
    }

    pub fn collection_count(&self) -> usize {
        self.storage
            .list_collections()
            .map(|c| c.len())
            .unwrap_or(0)
    }

    // ========================================================================
    // SEEDING METHODS
    // ========================================================================

    /// Import and store an SRT document
    pub fn seed_collection(&self, title: &str, srt: &str) -> Collection {
        let collection = Collection::from_srt(title, srt);
        self.storage
            .save_collection(&collection)
            .expect("Failed to seed collection");
        collection
    }

    /// Record one round of `feedback` for each word at `reviewed_at`
    pub fn seed_reviews(
        &self,
        collection_id: &str,
        words: &[&str],
        feedback: Feedback,
        reviewed_at: DateTime<Utc>,
    ) -> Vec<WordReviewState> {
        let scheduler = ReviewScheduler::new();
        words
            .iter()
            .map(|word| {
                let previous = self
                    .storage
                    .get_progress(collection_id, word)
                    .expect("Failed to read progress");
                let state = scheduler.record_feedback_at(previous.as_ref(), feedback, reviewed_at);
                self.storage
                    .save_progress(collection_id, word, &state)
                    .expect("Failed to seed progress");
                state
            })
            .collect()
    }
}
