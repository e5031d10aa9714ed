//! SRS (Spaced Repetition System) Module
//!
//! SM-2 style scheduling for subtitle vocabulary, as popularized by Anki.
//!
//! ## Update rule
//! - Hard: ease -= 0.15 (floor 1.3), interval halves
//! - Good: interval *= ease
//! - Easy: ease += 0.15, interval *= ease * 1.3
//! - A first review (interval 0) always schedules one day out
//!
//! ## Selection order
//! 1. Due words, shortest interval first
//! 2. New words, in caller order
//! 3. Everything scheduled in the future, soonest first

mod scheduler;
mod selection;
mod state;
mod stats;

pub use scheduler::{ReviewScheduler, SchedulerParameters};
pub use selection::{due_words, due_words_at, new_words, select_next, select_next_at};
pub use state::{
    Feedback, ProgressMap, Proficiency, WordReviewState, INITIAL_EASE_FACTOR, MIN_EASE_FACTOR,
};
pub use stats::StudyStats;
