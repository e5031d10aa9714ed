//! Word Details Cache
//!
//! Fixed-capacity LRU map from word to looked-up details. The cache never
//! performs lookups; callers fill it from a `WordLookup` on miss.
//!
//! Recency rules:
//! - `get` and `set` promote the key to most-recently-used
//! - `has` and `peek` leave the order untouched
//! - inserting a new key into a full cache evicts the least-recently-used

use std::num::NonZeroUsize;

use lru::LruCache;
use serde::{Deserialize, Serialize};

use crate::lookup::WordDetails;

/// Default number of words kept
pub const DEFAULT_CACHE_CAPACITY: usize = 200;

/// A cached lookup outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "details", rename_all = "lowercase")]
pub enum CachedDetails {
    /// Lookup returned details
    Found(WordDetails),
    /// Lookup confirmed the word does not exist; cached to avoid asking again
    Absent,
}

impl CachedDetails {
    /// Map a successful lookup to a cache value
    pub fn from_lookup(details: Option<WordDetails>) -> Self {
        match details {
            Some(d) => CachedDetails::Found(d),
            None => CachedDetails::Absent,
        }
    }

    pub fn details(&self) -> Option<&WordDetails> {
        match self {
            CachedDetails::Found(d) => Some(d),
            CachedDetails::Absent => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CachedDetails::Absent)
    }
}

/// Hit/miss/eviction counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// Hit rate in [0.0, 1.0]; 0.0 before any lookup
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Bounded recency cache of word details
pub struct DetailsCache {
    inner: LruCache<String, CachedDetails>,
    stats: CacheStats,
}

impl Default for DetailsCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for DetailsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailsCache")
            .field("size", &self.size())
            .field("max_size", &self.max_size())
            .field("stats", &self.stats)
            .finish()
    }
}

impl DetailsCache {
    /// Create a cache holding at most `max_size` words
    ///
    /// A capacity of zero is raised to one.
    pub fn new(max_size: usize) -> Self {
        let cap = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Look up a word, promoting it on hit
    pub fn get(&mut self, word: &str) -> Option<&CachedDetails> {
        match self.inner.get(word) {
            Some(value) => {
                self.stats.hits += 1;
                Some(value)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Look up a word without touching recency or stats
    pub fn peek(&self, word: &str) -> Option<&CachedDetails> {
        self.inner.peek(word)
    }

    /// Insert or overwrite, promoting the key
    pub fn set(&mut self, word: impl Into<String>, details: CachedDetails) {
        let word = word.into();
        let is_new = !self.inner.contains(&word);

        // push hands back either the replaced value or the evicted LRU entry
        if let Some((evicted, _)) = self.inner.push(word, details) {
            if is_new {
                self.stats.evictions += 1;
                tracing::trace!(evicted = %evicted, "Evicted least recently used word");
            }
        }
    }

    /// Whether the word is cached; recency is unchanged
    pub fn has(&self, word: &str) -> bool {
        self.inner.contains(word)
    }

    /// Remove a word, reporting whether it was present
    pub fn delete(&mut self, word: &str) -> bool {
        self.inner.pop(word).is_some()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Current entry count
    pub fn size(&self) -> usize {
        self.inner.len()
    }

    /// Capacity fixed at construction
    pub fn max_size(&self) -> usize {
        self.inner.cap().get()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Cached words from most to least recently used
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(|(k, _)| k.as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================
