//! Journey: prefetch keeps the next cards instant
//!
//! Lookups happen ahead of time, errors stay invisible, and real progress is
//! never touched by the projection.

use std::time::Duration;

use chrono::Utc;
use subvocab_core::{
    prefetch_upcoming, project_upcoming, DetailsCache, DetailsView, NextWord, PrefetchConfig,
    ProgressMap, StudyConfig, StudySession, WordReviewState,
};
use subvocab_e2e_tests::{MockLookup, TestDataFactory};

#[tokio::test]
async fn test_three_new_words_need_at_most_three_lookups() {
    let words = TestDataFactory::word_list(3);
    let progress = ProgressMap::new();
    let before = serde_json::to_value(&progress).unwrap();
    let lookup = MockLookup::new();
    let mut cache = DetailsCache::new(50);
    let config = PrefetchConfig {
        ahead_count: 5,
        ..Default::default()
    };

    let report = prefetch_upcoming(&words, &progress, &lookup, &mut cache, &config).await;

    assert!(lookup.call_count() <= 3);
    assert_eq!(report.projected, words);
    assert_eq!(report.warmed, 3);
    assert_eq!(serde_json::to_value(&progress).unwrap(), before);
}

#[tokio::test]
async fn test_prefetched_cards_are_cache_hits() {
    let words = TestDataFactory::word_list(8);
    let mut session = StudySession::new(
        "deck",
        words.clone(),
        ProgressMap::new(),
        MockLookup::new(),
        StudyConfig::default(),
    );

    session.prefetch().await;
    assert_eq!(session.lookup().call_count(), 5);

    for _ in 0..5 {
        let NextWord::Word(word) = session.next_word() else {
            panic!("expected a word");
        };
        let view = session.details(&word).await;
        assert_eq!(view, DetailsView::Ready(MockLookup::details_for(&word)));
        session.record_feedback(subvocab_core::Feedback::Good);
    }

    assert_eq!(session.lookup().call_count(), 5);
    assert_eq!(session.cache().stats().hits, 5);
}

#[test]
fn test_projection_prefers_due_then_new() {
    let now = Utc::now();
    let words: Vec<String> = ["fresh", "later", "overdue", "novel"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    let progress = TestDataFactory::progress_with(&["overdue"], &["later"], now);

    let upcoming = project_upcoming(&words, &progress, 4, now);
    assert_eq!(upcoming, vec!["overdue", "fresh", "novel", "later"]);
}

#[tokio::test]
async fn test_words_scheduled_days_out_are_warmed_last() {
    let now = Utc::now();
    let words: Vec<String> = ["distant", "fresh", "novel"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    let mut progress = ProgressMap::new();
    let mut distant = WordReviewState::new_at(now);
    distant.review_count = 2;
    distant.interval = 6;
    distant.next_review_date = now + chrono::Duration::days(6);
    progress.insert("distant".to_string(), distant);

    let mut session =
        StudySession::new("deck", words, progress, MockLookup::new(), StudyConfig::default());
    let report = session.prefetch().await;

    assert_eq!(report.projected, vec!["fresh", "novel", "distant"]);
    assert_eq!(session.lookup().calls(), vec!["fresh", "novel", "distant"]);
    assert!(session.cache().has("distant"));
}

#[tokio::test]
async fn test_missing_words_cached_failures_retried() {
    let words: Vec<String> = ["ghostly", "flaky", "solid"].iter().map(|w| w.to_string()).collect();
    let lookup = MockLookup::new().with_missing(&["ghostly"]).with_failing(&["flaky"]);
    let mut session =
        StudySession::new("deck", words, ProgressMap::new(), lookup, StudyConfig::default());

    let report = session.prefetch().await;
    assert_eq!(report.warmed, 1);
    assert_eq!(report.absent, 1);
    assert_eq!(report.failed, 1);

    assert_eq!(session.details("ghostly").await, DetailsView::NotFound);
    assert_eq!(session.lookup().calls_for("ghostly"), 1);

    assert_eq!(session.details("flaky").await, DetailsView::Unavailable);
    assert_eq!(session.lookup().calls_for("flaky"), 2);
}

#[tokio::test]
async fn test_slow_dictionary_times_out_without_blocking() {
    let words = TestDataFactory::word_list(2);
    let lookup = MockLookup::new().with_latency(Duration::from_secs(5));
    let mut cache = DetailsCache::new(10);
    let config = PrefetchConfig {
        ahead_count: 2,
        batch_width: 2,
        lookup_timeout: Some(Duration::from_millis(20)),
    };

    let report = prefetch_upcoming(&words, &ProgressMap::new(), &lookup, &mut cache, &config).await;

    assert_eq!(report.failed, 2);
    assert_eq!(cache.size(), 0);
}

#[tokio::test]
async fn test_small_cache_keeps_most_recent_prefetches() {
    let words = TestDataFactory::word_list(5);
    let config = StudyConfig {
        cache_capacity: 2,
        ..Default::default()
    };
    let mut session = StudySession::new("deck", words.clone(), ProgressMap::new(), MockLookup::new(), config);

    session.prefetch().await;

    assert_eq!(session.cache().size(), 2);
    assert_eq!(session.cache().stats().evictions, 3);
    assert!(session.cache().has(&words[4]));
    assert!(session.cache().has(&words[3]));
}
