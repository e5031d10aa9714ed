//! Word Lookup Module
//!
//! The dictionary collaborator seen from the core:
//! - `WordDetails`: what a successful lookup returns
//! - `WordLookup`: the async capability injected into prefetch and sessions
//! - `DictionaryApiClient`: HTTP implementation (feature `dictionary-api`)

#[cfg(feature = "dictionary-api")]
mod dictionary;

#[cfg(feature = "dictionary-api")]
pub use dictionary::{DictionaryApiClient, DEFAULT_DICTIONARY_URL, DEFAULT_TRANSLATION_URL};

use std::future::Future;

use serde::{Deserialize, Serialize};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Lookup error type
///
/// Not-found is not an error; it is `Ok(None)`.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),
    /// Service answered with a non-success status
    #[error("Unexpected status {status} for '{word}'")]
    Status { word: String, status: u16 },
    /// Response body could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),
    /// Lookup exceeded its time budget
    #[error("Lookup timed out after {0}s")]
    Timeout(u64),
}

/// `Ok(Some)` = found, `Ok(None)` = confirmed not found
pub type LookupResult = std::result::Result<Option<WordDetails>, LookupError>;

// ============================================================================
// DETAILS
// ============================================================================

/// One part-of-speech sense of a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: String,
    pub definitions: Vec<String>,
    /// Translation into the learner's language, when one was fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

/// Dictionary data for a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDetails {
    pub word: String,
    /// IPA transcription, empty when unknown
    #[serde(default)]
    pub phonetic: String,
    /// Pronunciation audio URL, empty when unknown
    #[serde(default)]
    pub audio: String,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

impl WordDetails {
    /// Details with no phonetic, audio or meanings
    pub fn bare(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            phonetic: String::new(),
            audio: String::new(),
            meanings: Vec::new(),
        }
    }

    /// First definition of the first meaning, if any
    pub fn primary_definition(&self) -> Option<&str> {
        self.meanings
            .first()
            .and_then(|m| m.definitions.first())
            .map(String::as_str)
    }
}

// ============================================================================
// LOOKUP CAPABILITY
// ============================================================================

/// Asynchronous word lookup
///
/// Implemented by `DictionaryApiClient` and by any
/// `Fn(String) -> impl Future<Output = LookupResult>` closure, which keeps
/// tests free of network access.
pub trait WordLookup {
    fn lookup(&self, word: &str) -> impl Future<Output = LookupResult>;
}

impl<F, Fut> WordLookup for F
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = LookupResult>,
{
    fn lookup(&self, word: &str) -> impl Future<Output = LookupResult> {
        self(word.to_string())
    }
}
