//! Journey: import subtitles, study, review, come back later
//!
//! Progress written by one session must drive selection in the next.

use chrono::{Duration, Utc};
use subvocab_core::{
    Feedback, NextWord, Proficiency, StorageError, StudyConfig, StudySession,
};
use subvocab_e2e_tests::{MockLookup, TestDataFactory, TestDatabaseManager};

#[test]
fn test_import_extracts_clean_words() {
    let db = TestDatabaseManager::new_temp();
    let collection = db.seed_collection("Harbor", TestDataFactory::HARBOR_SRT);

    let stored = db.storage.get_collection(&collection.id).unwrap().unwrap();
    assert_eq!(stored.words, collection.words);
    assert_eq!(stored.sentences.len(), 3, "music-only cue is dropped");
    assert!(!stored.words.iter().any(|w| w == "thunder" || w == "sighs"));
    assert!(!stored.words.iter().any(|w| w == "the" || w == "is"));
    assert_eq!(stored.frequency.get("harbor"), Some(&3));
    assert_eq!(
        stored.example_for("captain"),
        Some("A storm is coming into the harbor, captain.")
    );
}

#[test]
fn test_overdue_word_comes_before_new_words() {
    let db = TestDatabaseManager::new_temp();
    let collection = db.seed_collection("Harbor", TestDataFactory::HARBOR_SRT);
    let now = Utc::now();

    // "vessel" is near the end of the frequency order but overdue
    db.seed_reviews(&collection.id, &["vessel"], Feedback::Good, now - Duration::days(3));
    // "harbor" was just reviewed and is not due
    db.seed_reviews(&collection.id, &["harbor"], Feedback::Good, now);

    let progress = db.storage.load_progress(&collection.id).unwrap();
    let mut session =
        StudySession::from_collection(&collection, progress, MockLookup::new(), StudyConfig::default());

    assert_eq!(session.next_word(), NextWord::Word("vessel".into()));
    session.record_feedback(Feedback::Good);
    assert_eq!(session.next_word(), NextWord::Word("storm".into()));
}

#[test]
fn test_easy_three_times_reaches_advanced_across_restarts() {
    let db = TestDatabaseManager::new_temp();
    let collection = db.seed_collection("Harbor", TestDataFactory::HARBOR_SRT);
    let start = Utc::now() - Duration::days(400);

    let mut reviewed_at = start;
    let mut last = None;
    for _ in 0..3 {
        let states = db.seed_reviews(&collection.id, &["anchor"], Feedback::Easy, reviewed_at);
        let state = states.into_iter().next().unwrap();
        reviewed_at = state.next_review_date;
        last = Some(state);
    }

    let stored = db.reopen().get_progress(&collection.id, "anchor").unwrap().unwrap();
    assert_eq!(Some(&stored), last.as_ref());
    assert_eq!(stored.review_count, 3);
    assert_eq!(stored.proficiency, Some(Proficiency::Advanced));
    assert!(stored.ease_factor > 2.9);
    assert!(stored.interval > 1);
}

#[test]
fn test_progress_survives_a_fresh_process_at_the_same_path() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("profiles").join("learner.db");

    let collection_id = {
        let first = TestDatabaseManager::new_at_path(db_path.clone());
        assert_eq!(first.path(), &db_path);
        assert!(first.is_empty());
        let collection = first.seed_collection("Harbor", TestDataFactory::HARBOR_SRT);
        first.seed_reviews(&collection.id, &["harbor", "storm"], Feedback::Good, Utc::now());
        collection.id
    };

    let second = TestDatabaseManager::new_at_path(db_path.clone());
    assert_eq!(second.collection_count(), 1);
    let progress = second.storage.load_progress(&collection_id).unwrap();
    assert_eq!(progress.len(), 2);
    assert_eq!(progress["storm"].review_count, 1);
}

#[test]
fn test_hard_feedback_never_drops_ease_below_floor() {
    let db = TestDatabaseManager::new_temp();
    let collection = db.seed_collection("Harbor", TestDataFactory::HARBOR_SRT);

    for _ in 0..20 {
        db.seed_reviews(&collection.id, &["storm"], Feedback::Hard, Utc::now());
    }

    let stored = db.storage.get_progress(&collection.id, "storm").unwrap().unwrap();
    assert!(stored.ease_factor >= 1.3);
    assert!(stored.interval >= 1);
    assert_eq!(stored.proficiency, Some(Proficiency::Beginner));
}

#[test]
fn test_stats_track_progress() {
    let db = TestDatabaseManager::new_temp();
    let collection = db.seed_collection("Harbor", TestDataFactory::HARBOR_SRT);
    let total = collection.words.len();

    db.seed_reviews(&collection.id, &["harbor", "storm"], Feedback::Good, Utc::now());
    db.seed_reviews(&collection.id, &["captain"], Feedback::Good, Utc::now() - Duration::days(2));

    let stats = db.storage.collection_stats(&collection.id).unwrap();
    assert_eq!(stats.total_words, total);
    assert_eq!(stats.new_words, total - 3);
    assert_eq!(stats.due_words, 1);
    assert_eq!(stats.beginner, 3);
    assert!((stats.completion() - 3.0 / total as f64).abs() < 1e-9);
}

#[test]
fn test_delete_collection_removes_progress() {
    let db = TestDatabaseManager::new_temp();
    let collection = db.seed_collection("Harbor", TestDataFactory::HARBOR_SRT);
    db.seed_reviews(&collection.id, &["harbor"], Feedback::Easy, Utc::now());

    assert!(db.storage.delete_collection(&collection.id).unwrap());
    assert!(db.is_empty());
    assert!(db.storage.load_progress(&collection.id).unwrap().is_empty());
    assert!(matches!(
        db.storage.collection_stats(&collection.id),
        Err(StorageError::NotFound(_))
    ));
}

#[test]
fn test_collections_are_listed_newest_first() {
    let db = TestDatabaseManager::new_temp();
    let first = db.seed_collection("Episode 1", &TestDataFactory::srt_from_lines(&["Lanterns glow"]));
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = db.seed_collection("Episode 2", &TestDataFactory::srt_from_lines(&["Seagulls circle"]));

    let listed = db.storage.list_collections().unwrap();
    assert_eq!(db.collection_count(), 2);
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);
    assert_eq!(listed[0].word_count, 2);
}
