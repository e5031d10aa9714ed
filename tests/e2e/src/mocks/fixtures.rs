//! Test Data Factory
//!
//! Subtitle documents and word lists for journey tests.

use chrono::{DateTime, Duration, Utc};
use subvocab_core::{Feedback, ProgressMap, ReviewScheduler};

/// Factory for creating test data
pub struct TestDataFactory;

impl TestDataFactory {
    /// A short episode: "harbor" three times, "storm" twice, the rest once
    pub const HARBOR_SRT: &'static str = "\u{feff}1\r\n\
00:00:01,000 --> 00:00:03,500\r\n\
<i>The harbor lights are out again.</i>\r\n\
\r\n\
2\r\n\
00:00:04,000 --> 00:00:06,000\r\n\
[THUNDER RUMBLING]\r\n\
\r\n\
3\r\n\
00:00:06,500 --> 00:00:09,000\r\n\
A storm is coming into the harbor,\r\n\
captain.\r\n\
\r\n\
4\r\n\
00:00:09,500 --> 00:00:12,000\r\n\
(sighs) Then anchor the vessel\r\n\
before the storm reaches the harbor.\r\n";

    /// Build an SRT document with one cue per line
    pub fn srt_from_lines(lines: &[&str]) -> String {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                format!(
                    "{}\n00:00:{:02},000 --> 00:00:{:02},500\n{}\n\n",
                    i + 1,
                    i % 60,
                    i % 60,
                    line
                )
            })
            .collect()
    }

    /// `n` distinct lowercase words
    pub fn word_list(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("lexeme{i:04}")).collect()
    }

    /// Progress where `due` words are overdue and `scheduled` words come back
    /// twelve hours after `now`; every other word stays new
    pub fn progress_with(due: &[&str], scheduled: &[&str], now: DateTime<Utc>) -> ProgressMap {
        let scheduler = ReviewScheduler::new();
        let mut progress = ProgressMap::new();

        for word in due {
            progress.insert(
                word.to_string(),
                scheduler.record_feedback_at(None, Feedback::Good, now - Duration::days(5)),
            );
        }
        for word in scheduled {
            progress.insert(
                word.to_string(),
                scheduler.record_feedback_at(None, Feedback::Good, now - Duration::hours(12)),
            );
        }

        progress
    }
}
