//! Review scheduler
//!
//! Applies learner feedback to a word's review state.

use chrono::{DateTime, Duration, Utc};

use super::selection;
use super::state::{
    Feedback, ProgressMap, Proficiency, WordReviewState, INITIAL_EASE_FACTOR, MIN_EASE_FACTOR,
};

/// Tunable constants of the update rule
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerParameters {
    /// Ease factor assigned to unseen words
    pub initial_ease: f64,
    /// Ease factor floor
    pub min_ease: f64,
    /// Ease change applied by Hard (subtracted) and Easy (added)
    pub ease_step: f64,
    /// Interval multiplier for Hard
    pub hard_factor: f64,
    /// Extra multiplier on top of ease for Easy
    pub easy_bonus: f64,
}

impl Default for SchedulerParameters {
    fn default() -> Self {
        Self {
            initial_ease: INITIAL_EASE_FACTOR,
            min_ease: MIN_EASE_FACTOR,
            ease_step: 0.15,
            hard_factor: 0.5,
            easy_bonus: 1.3,
        }
    }
}

/// Owns the feedback update rule and next-word selection
#[derive(Debug, Clone, Default)]
pub struct ReviewScheduler {
    params: SchedulerParameters,
}

impl ReviewScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom parameters
    ///
    /// The ease floor never drops below 1.3 regardless of what is passed.
    pub fn with_params(mut params: SchedulerParameters) -> Self {
        params.min_ease = params.min_ease.max(MIN_EASE_FACTOR);
        Self { params }
    }

    pub fn params(&self) -> &SchedulerParameters {
        &self.params
    }

    /// Apply feedback using the current time
    pub fn record_feedback(
        &self,
        state: Option<&WordReviewState>,
        feedback: Feedback,
    ) -> WordReviewState {
        self.record_feedback_at(state, feedback, Utc::now())
    }

    /// Apply feedback as of `now`
    ///
    /// Returns a fresh state; the input is never modified.
    pub fn record_feedback_at(
        &self,
        state: Option<&WordReviewState>,
        feedback: Feedback,
        now: DateTime<Utc>,
    ) -> WordReviewState {
        let p = &self.params;
        let (review_count, ease, interval) = match state {
            Some(s) => (s.review_count, s.ease_factor.max(p.min_ease), s.interval),
            None => (0, p.initial_ease, 0),
        };

        let review_count = review_count.saturating_add(1);
        let mut ease = ease;
        let previous = interval as f64;

        // Ease moves before the interval is computed
        let interval = match feedback {
            Feedback::Hard => {
                ease = (ease - p.ease_step).max(p.min_ease);
                if interval == 0 {
                    1.0
                } else {
                    (previous * p.hard_factor).round().max(1.0)
                }
            }
            Feedback::Good => {
                if interval == 0 {
                    1.0
                } else {
                    (previous * ease).round()
                }
            }
            Feedback::Easy => {
                ease += p.ease_step;
                if interval == 0 {
                    1.0
                } else {
                    (previous * ease * p.easy_bonus).round()
                }
            }
        };

        let interval = clamp_interval(interval);
        let next_review_date = now + Duration::days(interval as i64);
        let proficiency = Proficiency::derive(review_count, feedback);

        tracing::debug!(
            feedback = %feedback,
            review_count,
            ease_factor = ease,
            interval,
            "Recorded feedback"
        );

        WordReviewState {
            review_count,
            ease_factor: ease,
            interval,
            next_review_date,
            proficiency: Some(proficiency),
        }
    }

    /// Next word to present at the current time
    pub fn select_next(&self, words: &[String], progress: &ProgressMap) -> Option<String> {
        selection::select_next(words, progress)
    }

    /// Next word to present as of `now`
    pub fn select_next_at(
        &self,
        words: &[String],
        progress: &ProgressMap,
        now: DateTime<Utc>,
    ) -> Option<String> {
        selection::select_next_at(words, progress, now)
    }
}

/// Interval floor of one day, capped so date arithmetic cannot overflow
fn clamp_interval(days: f64) -> u32 {
    const MAX_INTERVAL_DAYS: f64 = 36_500.0;
    if days.is_nan() {
        return 1;
    }
    days.clamp(1.0, MAX_INTERVAL_DAYS) as u32
}

// ============================================================================
// TESTS
// ============================================================================
