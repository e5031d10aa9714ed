//! Study Session
//!
//! One learner working through one collection. The session owns everything
//! the study loop touches (word list, progress, details cache, lookup
//! capability) so no state lives outside it.
//!
//! Typical loop:
//! 1. `next_word()` picks the word to show
//! 2. `details()` answers from the cache or looks the word up
//! 3. `record_feedback()` updates progress for the shown word
//! 4. `prefetch()` warms the cache for what comes next

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cache::{CachedDetails, DetailsCache};
use crate::collection::Collection;
use crate::config::StudyConfig;
use crate::lookup::{WordDetails, WordLookup};
use crate::prefetch::{prefetch_upcoming, timed_lookup, PrefetchReport};
use crate::srs::{Feedback, ProgressMap, ReviewScheduler, StudyStats, WordReviewState};

/// Outcome of asking for the next word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "word", rename_all = "lowercase")]
pub enum NextWord {
    Word(String),
    /// The collection has no words
    Finished,
}

/// What the learner sees for a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "details", rename_all = "lowercase")]
pub enum DetailsView {
    Ready(WordDetails),
    /// The dictionary has no entry
    NotFound,
    /// Lookup failed; study can continue without details
    Unavailable,
}

impl From<CachedDetails> for DetailsView {
    fn from(cached: CachedDetails) -> Self {
        match cached {
            CachedDetails::Found(details) => DetailsView::Ready(details),
            CachedDetails::Absent => DetailsView::NotFound,
        }
    }
}

/// Study context for a single collection
pub struct StudySession<L> {
    collection_id: String,
    words: Vec<String>,
    progress: ProgressMap,
    cache: DetailsCache,
    lookup: L,
    scheduler: ReviewScheduler,
    config: StudyConfig,
    current: Option<String>,
}

impl<L: WordLookup> StudySession<L> {
    pub fn new(
        collection_id: impl Into<String>,
        words: Vec<String>,
        progress: ProgressMap,
        lookup: L,
        config: StudyConfig,
    ) -> Self {
        Self {
            collection_id: collection_id.into(),
            words,
            progress,
            cache: DetailsCache::new(config.cache_capacity),
            lookup,
            scheduler: ReviewScheduler::new(),
            config,
            current: None,
        }
    }

    /// Session over a stored collection's words
    pub fn from_collection(
        collection: &Collection,
        progress: ProgressMap,
        lookup: L,
        config: StudyConfig,
    ) -> Self {
        Self::new(
            collection.id.clone(),
            collection.words.clone(),
            progress,
            lookup,
            config,
        )
    }

    /// Replace the default update rule
    pub fn with_scheduler(mut self, scheduler: ReviewScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn progress(&self) -> &ProgressMap {
        &self.progress
    }

    pub fn into_progress(self) -> ProgressMap {
        self.progress
    }

    pub fn cache(&self) -> &DetailsCache {
        &self.cache
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Word most recently returned by `next_word`
    pub fn current_word(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Pick the word to present and make it current
    pub fn next_word(&mut self) -> NextWord {
        match self.scheduler.select_next(&self.words, &self.progress) {
            Some(word) => {
                self.current = Some(word.clone());
                NextWord::Word(word)
            }
            None => {
                self.current = None;
                NextWord::Finished
            }
        }
    }

    /// Details for `word`, from cache when possible
    ///
    /// A miss triggers one lookup. Found and not-found results are cached;
    /// errors are not, so the next call retries.
    pub async fn details(&mut self, word: &str) -> DetailsView {
        if let Some(cached) = self.cache.get(word) {
            return cached.clone().into();
        }

        match timed_lookup(&self.lookup, word, self.config.prefetch().lookup_timeout).await {
            Ok(found) => {
                let cached = CachedDetails::from_lookup(found);
                self.cache.set(word, cached.clone());
                cached.into()
            }
            Err(e) => {
                tracing::warn!(word = %word, "Lookup failed: {}", e);
                DetailsView::Unavailable
            }
        }
    }

    /// Apply feedback to the current word
    ///
    /// Returns the word and its new state, or `None` when no word is current.
    pub fn record_feedback(&mut self, feedback: Feedback) -> Option<(String, WordReviewState)> {
        let word = self.current.take()?;
        let state = self.record_feedback_for(&word, feedback);
        Some((word, state))
    }

    /// Apply feedback to any word, current or not
    pub fn record_feedback_for(&mut self, word: &str, feedback: Feedback) -> WordReviewState {
        let state = self
            .scheduler
            .record_feedback(self.progress.get(word), feedback);
        self.progress.insert(word.to_string(), state.clone());
        state
    }

    /// Warm the cache for the upcoming words
    pub async fn prefetch(&mut self) -> PrefetchReport {
        prefetch_upcoming(
            &self.words,
            &self.progress,
            &self.lookup,
            &mut self.cache,
            &self.config.prefetch(),
        )
        .await
    }

    pub fn stats(&self) -> StudyStats {
        StudyStats::collect(&self.words, &self.progress, Utc::now())
    }
}

// ============================================================================
// TESTS
// ============================================================================
