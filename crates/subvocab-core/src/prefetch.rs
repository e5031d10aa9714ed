//! Prefetch Orchestration
//!
//! Warms the details cache with the words the scheduler will present next.
//!
//! 1. **Project**: run selection repeatedly over the words not yet picked,
//!    leaving progress untouched
//! 2. **Filter**: skip words already cached
//! 3. **Fetch**: look the rest up in sequential batches; lookups inside a
//!    batch run concurrently
//!
//! Prefetch is best-effort. Lookup errors are logged and dropped, never
//! cached, and never reach the learner.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

use crate::cache::{CachedDetails, DetailsCache};
use crate::lookup::{LookupError, LookupResult, WordLookup};
use crate::srs::{select_next_at, ProgressMap};

/// Upper bound on concurrent lookups per batch
pub const MAX_BATCH_WIDTH: usize = 10;

// ============================================================================
// CONFIG
// ============================================================================

/// Prefetch tuning
#[derive(Debug, Clone, PartialEq)]
pub struct PrefetchConfig {
    /// How many upcoming words to project
    pub ahead_count: usize,
    /// Concurrent lookups per batch (clamped to 1..=10)
    pub batch_width: usize,
    /// Per-lookup time budget; `None` waits indefinitely
    pub lookup_timeout: Option<Duration>,
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            ahead_count: 5,
            batch_width: 3,
            lookup_timeout: Some(Duration::from_secs(10)),
        }
    }
}

impl PrefetchConfig {
    pub fn effective_batch_width(&self) -> usize {
        self.batch_width.clamp(1, MAX_BATCH_WIDTH)
    }
}

/// What a prefetch run did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefetchReport {
    /// Upcoming words in projected order
    pub projected: Vec<String>,
    /// Projected words that were already cached
    pub already_cached: usize,
    /// Words cached with details
    pub warmed: usize,
    /// Words cached as confirmed absent
    pub absent: usize,
    /// Lookups that failed or timed out
    pub failed: usize,
}

impl PrefetchReport {
    /// Lookups issued during the run
    pub fn lookups(&self) -> usize {
        self.warmed + self.absent + self.failed
    }
}

// ============================================================================
// PROJECTION
// ============================================================================

/// The next `ahead_count` words selection would present, without touching
/// `progress`
///
/// Each round selects among the words not yet picked, so a word is projected
/// at most once and words scheduled days out are still reached once due and
/// new words run out.
pub fn project_upcoming(
    words: &[String],
    progress: &ProgressMap,
    ahead_count: usize,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut remaining: Vec<String> = words.to_vec();
    let mut picked: Vec<String> = Vec::with_capacity(ahead_count.min(words.len()));

    while picked.len() < ahead_count {
        let Some(word) = select_next_at(&remaining, progress, now) else {
            break;
        };

        remaining.retain(|w| *w != word);
        picked.push(word);
    }

    picked
}

// ============================================================================
// PREFETCH
// ============================================================================

/// Warm `cache` with the upcoming words
pub async fn prefetch_upcoming<L: WordLookup>(
    words: &[String],
    progress: &ProgressMap,
    lookup: &L,
    cache: &mut DetailsCache,
    config: &PrefetchConfig,
) -> PrefetchReport {
    let projected = project_upcoming(words, progress, config.ahead_count, Utc::now());
    let to_fetch: Vec<String> = projected
        .iter()
        .filter(|w| !cache.has(w.as_str()))
        .cloned()
        .collect();

    let mut report = PrefetchReport {
        already_cached: projected.len() - to_fetch.len(),
        projected,
        ..Default::default()
    };

    if to_fetch.is_empty() {
        tracing::debug!("All upcoming words already cached");
        return report;
    }

    tracing::debug!(count = to_fetch.len(), "Prefetching upcoming words");

    for batch in to_fetch.chunks(config.effective_batch_width()) {
        let outcomes = join_all(batch.iter().map(|word| async move {
            let outcome = timed_lookup(lookup, word, config.lookup_timeout).await;
            (word, outcome)
        }))
        .await;

        for (word, outcome) in outcomes {
            match outcome {
                Ok(Some(details)) => {
                    cache.set(word.clone(), CachedDetails::Found(details));
                    report.warmed += 1;
                }
                Ok(None) => {
                    cache.set(word.clone(), CachedDetails::Absent);
                    report.absent += 1;
                }
                Err(e) => {
                    tracing::warn!(word = %word, "Prefetch lookup failed: {}", e);
                    report.failed += 1;
                }
            }
        }
    }

    tracing::debug!(
        warmed = report.warmed,
        absent = report.absent,
        failed = report.failed,
        cache_size = cache.size(),
        "Prefetch complete"
    );

    report
}

/// Run a lookup under an optional time budget
pub(crate) async fn timed_lookup<L: WordLookup>(
    lookup: &L,
    word: &str,
    timeout: Option<Duration>,
) -> LookupResult {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, lookup.lookup(word))
            .await
            .unwrap_or_else(|_| Err(LookupError::Timeout(limit.as_secs()))),
        None => lookup.lookup(word).await,
    }
}

// ============================================================================
// TESTS
// ============================================================================
