//! # Subvocab Core
//!
//! Vocabulary study engine for words pulled from movie and TV subtitles.
//!
//! - **SM-2 style scheduling**: Hard/Good/Easy feedback moves a word's ease
//!   factor and review interval; selection presents due words first
//! - **Details cache**: fixed-capacity LRU of dictionary lookups
//! - **Prefetch**: projects the next few words the scheduler will pick and
//!   looks them up ahead of time, in small concurrent batches
//! - **Subtitle extraction**: SRT cleanup, stop-word filtering, frequency order
//! - **Persistence**: SQLite store for collections and review progress
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use subvocab_core::prelude::*;
//!
//! let storage = Storage::new(None)?;
//! let collection = Collection::from_srt("Pilot", &std::fs::read_to_string("pilot.srt")?);
//! storage.save_collection(&collection)?;
//!
//! let config = StudyConfig::from_env();
//! let client = DictionaryApiClient::new(config.lookup_timeout())?;
//! let progress = storage.load_progress(&collection.id)?;
//! let mut session = StudySession::from_collection(&collection, progress, client, config);
//!
//! if let NextWord::Word(word) = session.next_word() {
//!     let details = session.details(&word).await;
//!     if let Some((word, state)) = session.record_feedback(Feedback::Good) {
//!         storage.save_progress(&collection.id, &word, &state)?;
//!     }
//!     session.prefetch().await;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `dictionary-api` (default): HTTP dictionary client built on reqwest
//! - `bundled-sqlite` (default): compile SQLite into the binary

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod cache;
pub mod collection;
pub mod config;
pub mod extract;
pub mod lookup;
pub mod prefetch;
pub mod session;
pub mod srs;
pub mod storage;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use cache::{CacheStats, CachedDetails, DetailsCache, DEFAULT_CACHE_CAPACITY};
pub use collection::{Collection, CollectionSummary};
pub use config::StudyConfig;
pub use extract::{
    extract_words, find_example_sentence, parse_srt, sort_by_frequency, word_frequency,
};
pub use lookup::{LookupError, LookupResult, Meaning, WordDetails, WordLookup};
pub use prefetch::{prefetch_upcoming, project_upcoming, PrefetchConfig, PrefetchReport};
pub use session::{DetailsView, NextWord, StudySession};
pub use srs::{
    Feedback, Proficiency, ProgressMap, ReviewScheduler, SchedulerParameters, StudyStats,
    WordReviewState,
};
pub use storage::{Result, Storage, StorageError};

#[cfg(feature = "dictionary-api")]
#[cfg_attr(docsrs, doc(cfg(feature = "dictionary-api")))]
pub use lookup::DictionaryApiClient;

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        CachedDetails, Collection, DetailsCache, DetailsView, Feedback, NextWord, ProgressMap,
        ReviewScheduler, Storage, StorageError, StudyConfig, StudySession, StudyStats,
        WordDetails, WordLookup, WordReviewState,
    };

    #[cfg(feature = "dictionary-api")]
    pub use crate::DictionaryApiClient;
}
