//! Free-dictionary HTTP client
//!
//! Queries a dictionaryapi.dev compatible endpoint and, optionally, a
//! MyMemory compatible translation endpoint.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use super::{LookupError, LookupResult, Meaning, WordDetails, WordLookup};

/// Public free dictionary API
pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev";

/// Public MyMemory translation API
pub const DEFAULT_TRANSLATION_URL: &str = "https://api.mymemory.translated.net";

/// Definitions kept per part of speech
const MAX_DEFINITIONS: usize = 3;

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Deserialize)]
struct ApiEntry {
    word: String,
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<ApiPhonetic>,
    #[serde(default)]
    meanings: Vec<ApiMeaning>,
}

#[derive(Debug, Deserialize)]
struct ApiPhonetic {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiMeaning {
    #[serde(default)]
    part_of_speech: Option<String>,
    #[serde(default)]
    definitions: Vec<ApiDefinition>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    definition: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationResponse {
    response_data: Option<TranslationData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationData {
    translated_text: Option<String>,
}

// ============================================================================
// CLIENT
// ============================================================================

/// HTTP dictionary lookup with optional translation of the first meaning
#[derive(Debug, Clone)]
pub struct DictionaryApiClient {
    client: Client,
    base_url: String,
    translation_url: String,
    /// Target language for translations; `None` disables them
    translation_lang: Option<String>,
}

impl DictionaryApiClient {
    /// Create a client against the public endpoints
    pub fn new(timeout: Duration) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("subvocab/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LookupError::Transport(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            client,
            base_url: DEFAULT_DICTIONARY_URL.to_string(),
            translation_url: DEFAULT_TRANSLATION_URL.to_string(),
            translation_lang: None,
        })
    }

    /// Point at a different dictionary host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Point at a different translation host
    pub fn with_translation_url(mut self, translation_url: impl Into<String>) -> Self {
        self.translation_url = translation_url.into();
        self
    }

    /// Translate the first meaning into `lang` (e.g. "zh", "de")
    pub fn with_translation(mut self, lang: impl Into<String>) -> Self {
        self.translation_lang = Some(lang.into());
        self
    }

    fn entry_url(&self, word: &str) -> Result<Url, LookupError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| LookupError::Transport(format!("Invalid dictionary URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Transport("Dictionary URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["api", "v2", "entries", "en", word]);
        Ok(url)
    }

    fn translation_request_url(&self, word: &str, lang: &str) -> Result<Url, LookupError> {
        let base = format!("{}/get", self.translation_url.trim_end_matches('/'));
        let langpair = format!("en|{}", lang);
        Url::parse_with_params(&base, &[("q", word), ("langpair", langpair.as_str())])
            .map_err(|e| LookupError::Transport(format!("Invalid translation URL: {}", e)))
    }

    async fn fetch_entry(&self, word: &str) -> LookupResult {
        let url = self.entry_url(word)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                tracing::debug!(word, "Dictionary has no entry");
                return Ok(None);
            }
            status if !status.is_success() => {
                return Err(LookupError::Status {
                    word: word.to_string(),
                    status: status.as_u16(),
                });
            }
            _ => {}
        }

        let entries: Vec<ApiEntry> = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        Ok(details_from_entries(entries))
    }

    async fn fetch_translation(&self, word: &str, lang: &str) -> Result<Option<String>, LookupError> {
        let url = self.translation_request_url(word, lang)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LookupError::Status {
                word: word.to_string(),
                status: response.status().as_u16(),
            });
        }

        let body: TranslationResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        Ok(body
            .response_data
            .and_then(|d| d.translated_text)
            .filter(|t| !t.trim().is_empty()))
    }
}

impl WordLookup for DictionaryApiClient {
    async fn lookup(&self, word: &str) -> LookupResult {
        let Some(mut details) = self.fetch_entry(word).await? else {
            return Ok(None);
        };

        if let Some(lang) = self.translation_lang.as_deref() {
            // Translation is decoration; its failure never fails the lookup
            match self.fetch_translation(word, lang).await {
                Ok(Some(text)) => {
                    if let Some(first) = details.meanings.first_mut() {
                        first.translation = Some(text);
                    }
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(word, "Translation failed: {}", e),
            }
        }

        Ok(Some(details))
    }
}

/// Collapse the API's entry list into `WordDetails`, keeping the first entry
fn details_from_entries(entries: Vec<ApiEntry>) -> Option<WordDetails> {
    let entry = entries.into_iter().next()?;

    let phonetic = entry
        .phonetic
        .filter(|p| !p.is_empty())
        .or_else(|| {
            entry
                .phonetics
                .iter()
                .find_map(|p| p.text.clone().filter(|t| !t.is_empty()))
        })
        .unwrap_or_default();

    let audio = entry
        .phonetics
        .iter()
        .find_map(|p| p.audio.clone().filter(|a| !a.is_empty()))
        .unwrap_or_default();

    let meanings = entry
        .meanings
        .into_iter()
        .map(|m| Meaning {
            part_of_speech: m.part_of_speech.unwrap_or_else(|| "unknown".to_string()),
            definitions: m
                .definitions
                .into_iter()
                .take(MAX_DEFINITIONS)
                .map(|d| d.definition)
                .collect(),
            translation: None,
        })
        .collect();

    Some(WordDetails {
        word: entry.word,
        phonetic,
        audio,
        meanings,
    })
}
