//! Study configuration
//!
//! Defaults suit the public dictionary API. Every field can be overridden
//! from the environment; unparseable values fall back to the default.

use std::time::Duration;

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::prefetch::PrefetchConfig;

/// Runtime configuration for a study session
#[derive(Debug, Clone, PartialEq)]
pub struct StudyConfig {
    /// Word details kept in memory (`SUBVOCAB_CACHE_CAPACITY`)
    pub cache_capacity: usize,
    /// Upcoming words to prefetch (`SUBVOCAB_PREFETCH_AHEAD`)
    pub prefetch_ahead: usize,
    /// Concurrent prefetch lookups (`SUBVOCAB_PREFETCH_BATCH`)
    pub prefetch_batch: usize,
    /// Per-lookup time budget in seconds (`SUBVOCAB_LOOKUP_TIMEOUT_SECS`)
    pub lookup_timeout_secs: u64,
    /// Dictionary host override (`SUBVOCAB_DICTIONARY_URL`)
    pub dictionary_url: Option<String>,
    /// Translation target language; unset disables translation
    /// (`SUBVOCAB_TRANSLATION_LANG`)
    pub translation_lang: Option<String>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            prefetch_ahead: 5,
            prefetch_batch: 3,
            lookup_timeout_secs: 10,
            dictionary_url: None,
            translation_lang: None,
        }
    }
}

impl StudyConfig {
    /// Defaults overridden by `SUBVOCAB_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key source
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str, default: usize| {
            get(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };
        let non_empty = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Self {
            cache_capacity: parsed("SUBVOCAB_CACHE_CAPACITY", defaults.cache_capacity).max(1),
            prefetch_ahead: parsed("SUBVOCAB_PREFETCH_AHEAD", defaults.prefetch_ahead),
            prefetch_batch: parsed("SUBVOCAB_PREFETCH_BATCH", defaults.prefetch_batch),
            lookup_timeout_secs: get("SUBVOCAB_LOOKUP_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.lookup_timeout_secs),
            dictionary_url: non_empty("SUBVOCAB_DICTIONARY_URL"),
            translation_lang: non_empty("SUBVOCAB_TRANSLATION_LANG"),
        }
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }

    pub fn prefetch(&self) -> PrefetchConfig {
        PrefetchConfig {
            ahead_count: self.prefetch_ahead,
            batch_width: self.prefetch_batch,
            lookup_timeout: (self.lookup_timeout_secs > 0).then(|| self.lookup_timeout()),
        }
    }
}
