//! Mock dictionary
//!
//! Answers from an in-memory word set and records every call, so tests can
//! assert exactly which lookups a flow issued.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use subvocab_core::{LookupError, LookupResult, Meaning, WordDetails, WordLookup};

/// In-memory `WordLookup` with call recording
#[derive(Debug, Default)]
pub struct MockLookup {
    calls: Mutex<Vec<String>>,
    missing: HashSet<String>,
    failing: HashSet<String>,
    latency: Option<Duration>,
}

impl MockLookup {
    /// Every word is found
    pub fn new() -> Self {
        Self::default()
    }

    /// These words come back as confirmed not-found
    pub fn with_missing(mut self, words: &[&str]) -> Self {
        self.missing.extend(words.iter().map(|w| w.to_string()));
        self
    }

    /// These words fail with a transport error
    pub fn with_failing(mut self, words: &[&str]) -> Self {
        self.failing.extend(words.iter().map(|w| w.to_string()));
        self
    }

    /// Delay every answer
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Words looked up so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }

    pub fn calls_for(&self, word: &str) -> usize {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .iter()
            .filter(|w| w.as_str() == word)
            .count()
    }

    /// Details the mock returns for a found word
    pub fn details_for(word: &str) -> WordDetails {
        WordDetails {
            word: word.to_string(),
            phonetic: format!("/{word}/"),
            audio: String::new(),
            meanings: vec![Meaning {
                part_of_speech: "noun".to_string(),
                definitions: vec![format!("definition of {word}")],
                translation: None,
            }],
        }
    }
}

impl WordLookup for MockLookup {
    async fn lookup(&self, word: &str) -> LookupResult {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(word.to_string());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if self.failing.contains(word) {
            return Err(LookupError::Transport(format!("mock failure for {word}")));
        }
        if self.missing.contains(word) {
            return Ok(None);
        }
        Ok(Some(Self::details_for(word)))
    }
}
