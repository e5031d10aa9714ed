//! Review state types
//!
//! Per-word scheduling state plus the feedback and proficiency vocabularies.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lowest ease factor any word may reach
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Ease factor of a word that has never been reviewed
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Review state keyed by normalized word
pub type ProgressMap = HashMap<String, WordReviewState>;

// ============================================================================
// FEEDBACK
// ============================================================================

/// Learner feedback after a word is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Feedback {
    /// Forgot or struggled
    Hard,
    /// Recalled normally
    #[default]
    Good,
    /// Already known
    Easy,
}

impl Feedback {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Hard => "Hard",
            Feedback::Good => "Good",
            Feedback::Easy => "Easy",
        }
    }

    /// Parse from a feedback name
    ///
    /// Unknown values are treated as `Good` so a bad button mapping never
    /// blocks the study flow.
    pub fn parse_name(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "hard" | "h" | "forgot" => Feedback::Hard,
            "easy" | "e" | "known" => Feedback::Easy,
            "good" | "g" | "review" => Feedback::Good,
            other => {
                tracing::debug!(feedback = other, "Unknown feedback, treating as Good");
                Feedback::Good
            }
        }
    }
}

impl std::fmt::Display for Feedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PROFICIENCY
// ============================================================================

/// Informational mastery label; never feeds back into scheduling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Proficiency {
    Beginner,
    Intermediate,
    Advanced,
}

impl Proficiency {
    /// Derive the label from the post-update review count and the feedback given
    pub fn derive(review_count: u32, feedback: Feedback) -> Self {
        match feedback {
            Feedback::Easy if review_count >= 3 => Proficiency::Advanced,
            Feedback::Good | Feedback::Easy if review_count >= 2 => Proficiency::Intermediate,
            _ => Proficiency::Beginner,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Beginner => "beginner",
            Proficiency::Intermediate => "intermediate",
            Proficiency::Advanced => "advanced",
        }
    }

    /// Parse a stored label; anything unrecognized reads as unknown
    pub fn parse_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "beginner" => Some(Proficiency::Beginner),
            "intermediate" => Some(Proficiency::Intermediate),
            "advanced" => Some(Proficiency::Advanced),
            _ => None,
        }
    }
}

impl std::fmt::Display for Proficiency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// WORD REVIEW STATE
// ============================================================================

/// Scheduling state for a single word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordReviewState {
    /// Times feedback has been recorded
    pub review_count: u32,
    /// Interval growth multiplier (>= 1.3)
    pub ease_factor: f64,
    /// Days until the next review; 0 = not yet scheduled
    pub interval: u32,
    /// When the word becomes eligible again
    pub next_review_date: DateTime<Utc>,
    /// Derived mastery label
    pub proficiency: Option<Proficiency>,
}

impl WordReviewState {
    /// State of a word that has never received feedback
    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            review_count: 0,
            ease_factor: INITIAL_EASE_FACTOR,
            interval: 0,
            next_review_date: now,
            proficiency: None,
        }
    }

    /// Whether the word is eligible for presentation at `now`
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_date <= now
    }
}

// ============================================================================
// TESTS
// ============================================================================
