//! Collections - one imported subtitle file and its study words

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extract::{extract_words, find_example_sentence, parse_srt, sort_by_frequency, word_frequency};

/// A movie or episode's worth of vocabulary
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Unique identifier (UUID v4 for imports)
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// Study words, most frequent first
    pub words: Vec<String>,
    /// Cleaned subtitle lines, used for example sentences
    pub sentences: Vec<String>,
    /// Occurrences of every word in the subtitles
    pub frequency: HashMap<String, usize>,
}

/// Lightweight listing row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSummary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub word_count: usize,
}

impl Collection {
    /// Build a collection from already-cleaned sentences
    pub fn from_sentences(
        id: impl Into<String>,
        title: impl Into<String>,
        sentences: Vec<String>,
    ) -> Self {
        let frequency = word_frequency(&sentences);
        let mut words = extract_words(&sentences);
        sort_by_frequency(&mut words, &frequency);

        Self {
            id: id.into(),
            title: title.into(),
            created_at: Utc::now(),
            words,
            sentences,
            frequency,
        }
    }

    /// Import raw SRT content under a fresh id
    pub fn from_srt(title: impl Into<String>, content: &str) -> Self {
        let collection = Self::from_sentences(Uuid::new_v4().to_string(), title, parse_srt(content));
        tracing::info!(
            id = %collection.id,
            words = collection.words.len(),
            sentences = collection.sentences.len(),
            "Imported subtitles"
        );
        collection
    }

    /// Example sentence for one of this collection's words
    pub fn example_for(&self, word: &str) -> Option<&str> {
        find_example_sentence(word, &self.sentences)
    }

    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
            word_count: self.words.len(),
        }
    }
}
