//! Plain-text batch output.

use crate::models::ArticleOutcome;

/// Format one outcome as `URL  STATUS  rate=..  words=..`.
///
/// Rate and word count print as `-` when the article was not scored.
pub fn format_outcome_line(outcome: &ArticleOutcome) -> String {
    let rate = outcome
        .rate()
        .map_or_else(|| "-".to_string(), |rate| format!("{rate:.2}"));
    let words = outcome
        .words_count()
        .map_or_else(|| "-".to_string(), |words| words.to_string());
    format!(
        "{}\t{}\trate={}\twords={}",
        outcome.url(),
        outcome.status(),
        rate,
        words
    )
}
