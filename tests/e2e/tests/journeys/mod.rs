//! Journey Tests
//!
//! Complete learner workflows across extraction, scheduling, caching,
//! prefetch and storage. Each journey file is also registered as its own
//! test target.

use chrono::Utc;
use subvocab_core::{Feedback, NextWord, StudyConfig, StudySession};
use subvocab_e2e_tests::{MockLookup, TestDataFactory, TestDatabaseManager};

/// Import, study every word once, and resume from disk with nothing new left
#[tokio::test]
async fn test_first_pass_through_an_episode() {
    let db = TestDatabaseManager::new_temp();
    let collection = db.seed_collection("Harbor S01E01", TestDataFactory::HARBOR_SRT);
    assert!(!db.is_empty());

    let progress = db.storage.load_progress(&collection.id).unwrap();
    let mut session =
        StudySession::from_collection(&collection, progress, MockLookup::new(), StudyConfig::default());

    let mut studied = Vec::new();
    for _ in 0..collection.words.len() {
        let NextWord::Word(word) = session.next_word() else {
            panic!("ran out of words early");
        };
        let _ = session.details(&word).await;
        let (word, state) = session.record_feedback(Feedback::Good).unwrap();
        db.storage.save_progress(&collection.id, &word, &state).unwrap();
        studied.push(word);
        session.prefetch().await;
    }

    // Frequency order: "harbor" appears three times, "storm" twice
    assert_eq!(studied[0], "harbor");
    assert_eq!(studied[1], "storm");
    assert_eq!(studied.len(), collection.words.len());

    // Each word was looked up exactly once across details and prefetch
    for word in &collection.words {
        assert_eq!(session.lookup().calls_for(word), 1, "word {word}");
    }

    let reopened = db.reopen();
    let stats = reopened.collection_stats(&collection.id).unwrap();
    assert_eq!(stats.new_words, 0);
    assert_eq!(stats.due_words, 0);
    assert_eq!(stats.learned_words, collection.words.len());
    let progress = reopened.load_progress(&collection.id).unwrap();
    assert!(progress.values().all(|s| s.next_review_date > Utc::now()));
}
