//! Data models for article outcomes and batch reports.
//!
//! - [`ProcessingStatus`]: closed set of terminal states for one URL
//! - [`ArticleScore`]: rate and word count, only ever present together
//! - [`ArticleOutcome`]: the terminal record produced by one article task
//! - [`OutcomeRecord`]: the public JSON shape of an outcome
//! - [`BatchReport`]: a full batch as written by the CLI runner

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal status of one article task.
///
/// Serialized in SCREAMING_SNAKE_CASE (`"OK"`, `"FETCH_ERROR"`, ...) to keep the
/// wire values stable for API consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    Ok,
    FetchError,
    ParseError,
    TimeoutError,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Ok => "OK",
            ProcessingStatus::FetchError => "FETCH_ERROR",
            ProcessingStatus::ParseError => "PARSE_ERROR",
            ProcessingStatus::TimeoutError => "TIMEOUT_ERROR",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score of a successfully analyzed article.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArticleScore {
    /// Percentage of words found in the charged lexicon, in `[0, 100]`.
    pub rate: f64,
    /// Number of normalized words in the article.
    pub words_count: usize,
}

/// Terminal record for one input URL.
///
/// Fields are private so the only way to build one is through [`ArticleOutcome::ok`]
/// or [`ArticleOutcome::failed`]; a score therefore exists exactly when the
/// status is [`ProcessingStatus::Ok`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleOutcome {
    url: String,
    status: ProcessingStatus,
    elapsed_seconds: Option<f64>,
    score: Option<ArticleScore>,
}

impl ArticleOutcome {
    pub fn ok(url: String, score: ArticleScore, elapsed_seconds: f64) -> Self {
        Self {
            url,
            status: ProcessingStatus::Ok,
            elapsed_seconds: Some(elapsed_seconds),
            score: Some(score),
        }
    }

    /// Build a failed outcome. `elapsed_seconds` is set only when tokenization
    /// had already started.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `status` is [`ProcessingStatus::Ok`].
    pub fn failed(url: String, status: ProcessingStatus, elapsed_seconds: Option<f64>) -> Self {
        debug_assert!(status != ProcessingStatus::Ok, "failed outcome with OK status");
        Self {
            url,
            status,
            elapsed_seconds,
            score: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status
    }

    /// Wall-clock time spent tokenizing, not total task latency.
    pub fn elapsed_seconds(&self) -> Option<f64> {
        self.elapsed_seconds
    }

    pub fn score(&self) -> Option<ArticleScore> {
        self.score
    }

    pub fn rate(&self) -> Option<f64> {
        self.score().map(|s| s.rate)
    }

    pub fn words_count(&self) -> Option<usize> {
        self.score().map(|s| s.words_count)
    }
}

/// Public JSON shape of an [`ArticleOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub url: String,
    pub status: ProcessingStatus,
    pub rate: Option<f64>,
    pub words_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<f64>,
}

impl OutcomeRecord {
    /// Record for the HTTP response, where timing stays internal.
    pub fn public(outcome: &ArticleOutcome) -> Self {
        Self {
            elapsed_seconds: None,
            ..Self::from(outcome)
        }
    }
}

impl From<&ArticleOutcome> for OutcomeRecord {
    fn from(outcome: &ArticleOutcome) -> Self {
        Self {
            url: outcome.url.clone(),
            status: outcome.status,
            rate: outcome.rate(),
            words_count: outcome.words_count(),
            elapsed_seconds: outcome.elapsed_seconds,
        }
    }
}

/// One CLI batch run, as written to the JSON report file.
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchReport {
    /// Local timestamp in RFC 3339 format.
    pub generated_at: String,
    /// Wall-clock time of the whole batch.
    pub elapsed_seconds: f64,
    pub outcomes: Vec<OutcomeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_values() {
        let json = serde_json::to_string(&[
            ProcessingStatus::Ok,
            ProcessingStatus::FetchError,
            ProcessingStatus::ParseError,
            ProcessingStatus::TimeoutError,
        ])
        .unwrap();
        assert_eq!(
            json,
            r#"["OK","FETCH_ERROR","PARSE_ERROR","TIMEOUT_ERROR"]"#
        );
        assert_eq!(ProcessingStatus::TimeoutError.to_string(), "TIMEOUT_ERROR");
    }

    #[test]
    fn test_ok_outcome_carries_score() {
        let outcome = ArticleOutcome::ok(
            "https://example.com".to_string(),
            ArticleScore {
                rate: 1.5,
                words_count: 200,
            },
            0.42,
        );
        assert_eq!(outcome.status(), ProcessingStatus::Ok);
        assert_eq!(outcome.rate(), Some(1.5));
        assert_eq!(outcome.words_count(), Some(200));
        assert_eq!(outcome.elapsed_seconds(), Some(0.42));
    }

    #[test]
    fn test_failed_outcome_has_no_score() {
        let outcome = ArticleOutcome::failed(
            "random_link".to_string(),
            ProcessingStatus::FetchError,
            None,
        );
        assert_eq!(outcome.url(), "random_link");
        assert_eq!(outcome.rate(), None);
        assert_eq!(outcome.words_count(), None);
        assert_eq!(outcome.elapsed_seconds(), None);
    }

    #[test]
    fn test_public_record_shape() {
        let outcome = ArticleOutcome::failed(
            "https://example.com/slow".to_string(),
            ProcessingStatus::TimeoutError,
            Some(3.0),
        );
        let value = serde_json::to_value(OutcomeRecord::public(&outcome)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "url": "https://example.com/slow",
                "status": "TIMEOUT_ERROR",
                "rate": null,
                "words_count": null,
            })
        );
    }

    #[test]
    fn test_report_record_keeps_elapsed() {
        let outcome = ArticleOutcome::ok(
            "https://example.com".to_string(),
            ArticleScore {
                rate: 0.0,
                words_count: 0,
            },
            0.25,
        );
        let record = OutcomeRecord::from(&outcome);
        assert_eq!(record.elapsed_seconds, Some(0.25));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"elapsed_seconds\":0.25"));
    }
}
