//! Collection-level study statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::{ProgressMap, Proficiency};

/// Snapshot of how far a learner has progressed through a word list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    pub total_words: usize,
    /// Words with no review state
    pub new_words: usize,
    /// Words eligible for review right now
    pub due_words: usize,
    /// Words carrying any proficiency label
    pub learned_words: usize,
    pub beginner: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

impl StudyStats {
    /// Tally `words` against `progress` as of `now`
    ///
    /// Progress entries for words outside the list are ignored.
    pub fn collect(words: &[String], progress: &ProgressMap, now: DateTime<Utc>) -> Self {
        let mut stats = StudyStats {
            total_words: words.len(),
            ..Default::default()
        };

        for word in words {
            let Some(state) = progress.get(word) else {
                stats.new_words += 1;
                continue;
            };

            if state.is_due(now) {
                stats.due_words += 1;
            }

            if let Some(proficiency) = state.proficiency {
                stats.learned_words += 1;
                match proficiency {
                    Proficiency::Beginner => stats.beginner += 1,
                    Proficiency::Intermediate => stats.intermediate += 1,
                    Proficiency::Advanced => stats.advanced += 1,
                }
            }
        }

        stats
    }

    /// Fraction of the list that has been studied at least once
    pub fn completion(&self) -> f64 {
        if self.total_words == 0 {
            0.0
        } else {
            (self.total_words - self.new_words) as f64 / self.total_words as f64
        }
    }
}
