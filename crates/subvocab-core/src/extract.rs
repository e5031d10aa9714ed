//! Subtitle Text Extraction
//!
//! Turns raw SRT subtitles into study material:
//! - `parse_srt`: cue text with markup and sound/music markers removed
//! - `extract_words`: lowercased, deduplicated candidate words
//! - `word_frequency` / `sort_by_frequency`: frequency-biased study order
//! - `find_example_sentence`: context sentence for a word
//!
//! Word identity is case-folded here, once, at ingestion.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;

/// Words shorter than this are never study candidates
pub const MIN_WORD_LEN: usize = 3;

/// Sentences longer than this are preferred as examples
const EXAMPLE_MIN_LEN: usize = 20;

/// Function words and very common verbs that are not worth studying
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is",
    "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "must", "i", "you", "he", "she", "it", "we", "they", "me",
    "him", "her", "us", "them", "my", "your", "his", "its", "our", "their", "myself", "yourself",
    "himself", "herself", "itself", "ourselves", "yourselves", "themselves", "am", "get", "got",
    "let", "go", "went", "come", "came", "see", "saw", "take", "took", "make", "made", "know",
    "knew", "think", "thought", "say", "said", "tell", "told", "ask", "asked", "give", "gave",
    "find", "found", "put", "leave", "left", "feel", "felt", "seem", "seemed", "try", "tried",
    "turn", "turned", "start", "started", "begin", "began", "stop", "stopped", "keep", "kept",
    "hold", "held", "bring", "brought", "happen", "happened", "become", "became", "show",
    "showed", "hear", "heard", "play", "played", "run", "ran", "move", "moved", "live", "lived",
    "believe", "believed", "hurt", "call", "called", "work", "worked",
];

fn block_separator() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n[ \t]*\n").expect("valid block separator regex"))
}

fn markup() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // HTML tags, (sound effects), [music]
    RE.get_or_init(|| Regex::new(r"<[^>]*>|\([^)]*\)|\[[^\]]*\]").expect("valid markup regex"))
}

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

fn latin_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z]+").expect("valid word regex"))
}

fn stop_words() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| STOP_WORDS.iter().copied().collect())
}

/// Extract cue text from SRT content
///
/// Blocks with fewer than three lines (index, timing, text) are skipped, as
/// are cues that are empty once markup is removed.
pub fn parse_srt(content: &str) -> Vec<String> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    let normalized = normalized.trim_start_matches('\u{feff}').trim();

    block_separator()
        .split(normalized)
        .filter_map(|block| {
            let lines: Vec<&str> = block.lines().collect();
            if lines.len() < 3 {
                return None;
            }

            let joined = lines[2..].join(" ");
            let cleaned = markup().replace_all(&joined, "");
            let text = whitespace().replace_all(cleaned.trim(), " ").into_owned();

            (!text.is_empty()).then_some(text)
        })
        .collect()
}

/// Candidate study words in first-appearance order
///
/// Lowercased, deduplicated, stop words and words shorter than
/// `MIN_WORD_LEN` removed.
pub fn extract_words<S: AsRef<str>>(sentences: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();

    for sentence in sentences {
        for m in latin_word().find_iter(sentence.as_ref()) {
            let word = m.as_str().to_lowercase();
            if word.len() < MIN_WORD_LEN || stop_words().contains(word.as_str()) {
                continue;
            }
            if seen.insert(word.clone()) {
                words.push(word);
            }
        }
    }

    words
}

/// Occurrence count of every lowercased word, stop words included
pub fn word_frequency<S: AsRef<str>>(sentences: &[S]) -> HashMap<String, usize> {
    let mut frequency = HashMap::new();
    for sentence in sentences {
        for m in latin_word().find_iter(sentence.as_ref()) {
            *frequency.entry(m.as_str().to_lowercase()).or_insert(0) += 1;
        }
    }
    frequency
}

/// Most frequent first; equal counts keep their current order
pub fn sort_by_frequency(words: &mut [String], frequency: &HashMap<String, usize>) {
    words.sort_by_key(|w| std::cmp::Reverse(frequency.get(w).copied().unwrap_or(0)));
}

/// A sentence containing `word` as a whole word, case-insensitively
///
/// Sentences longer than 20 characters are preferred.
pub fn find_example_sentence<'a, S: AsRef<str>>(word: &str, sentences: &'a [S]) -> Option<&'a str> {
    let pattern = format!(r"(?i)\b{}\b", regex::escape(word));
    let re = Regex::new(&pattern).ok()?;

    let matching = || {
        sentences
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| re.is_match(s))
    };

    matching()
        .find(|s| s.len() > EXAMPLE_MIN_LEN)
        .or_else(|| matching().next())
}

// ============================================================================
// TESTS
// ============================================================================
