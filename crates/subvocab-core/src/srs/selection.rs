//! Next-word selection
//!
//! Pure functions over a word list and a progress map. Nothing here mutates
//! progress; projection calls it repeatedly over a shrinking word list.

use chrono::{DateTime, Utc};

use super::state::ProgressMap;

/// Pick the next word to present at the current time
pub fn select_next(words: &[String], progress: &ProgressMap) -> Option<String> {
    select_next_at(words, progress, Utc::now())
}

/// Pick the next word to present as of `now`
///
/// Due words come first (shortest interval wins, ties keep caller order),
/// then unseen words in caller order, then whichever scheduled word comes
/// back soonest.
pub fn select_next_at(
    words: &[String],
    progress: &ProgressMap,
    now: DateTime<Utc>,
) -> Option<String> {
    // min_by_key keeps the first of equal elements, so caller order breaks ties
    let most_fragile_due = words
        .iter()
        .filter_map(|w| progress.get(w).map(|s| (w, s)))
        .filter(|(_, s)| s.is_due(now))
        .min_by_key(|(_, s)| s.interval)
        .map(|(w, _)| w);

    if let Some(word) = most_fragile_due {
        return Some(word.clone());
    }

    if let Some(word) = words.iter().find(|w| !progress.contains_key(w.as_str())) {
        return Some(word.clone());
    }

    words
        .iter()
        .filter_map(|w| progress.get(w).map(|s| (w, s.next_review_date)))
        .min_by_key(|(_, date)| *date)
        .map(|(w, _)| w.clone())
}

/// All due words at the current time, in presentation order
pub fn due_words(words: &[String], progress: &ProgressMap) -> Vec<String> {
    due_words_at(words, progress, Utc::now())
}

/// All due words as of `now`, shortest interval first
pub fn due_words_at(words: &[String], progress: &ProgressMap, now: DateTime<Utc>) -> Vec<String> {
    let mut due: Vec<(&String, u32)> = words
        .iter()
        .filter_map(|w| progress.get(w).map(|s| (w, s)))
        .filter(|(_, s)| s.is_due(now))
        .map(|(w, s)| (w, s.interval))
        .collect();

    // Stable sort: equal intervals stay in caller order
    due.sort_by_key(|(_, interval)| *interval);
    due.into_iter().map(|(w, _)| w.clone()).collect()
}

/// Words with no review state, in caller order
pub fn new_words(words: &[String], progress: &ProgressMap) -> Vec<String> {
    words
        .iter()
        .filter(|w| !progress.contains_key(w.as_str()))
        .cloned()
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
