//! The per-URL article task.
//!
//! ```text
//! Fetching ──► Sanitizing ──► Tokenizing ──► Scoring ──► Done(OK)
//!    │              │              │
//!    ▼              ▼              ▼
//! FETCH_ERROR   PARSE_ERROR   TIMEOUT_ERROR
//! ```
//!
//! Every path ends in exactly one [`ArticleOutcome`]; nothing escapes the task.
//! HTML parsing and normalization both run on the blocking pool so a large
//! page never holds a runtime thread.
//! External cancellation is honored at every stage and reported as
//! `TIMEOUT_ERROR`, the same as a tokenization timeout.

use crate::models::{ArticleOutcome, ArticleScore, ProcessingStatus};
use crate::pipeline::Analyzer;
use crate::text::score::calculate_rate;
use crate::text::tokenizer::tokenize;
use crate::utils::truncate_for_log;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Run one URL through fetch, sanitize, tokenize and score.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn process_article(
    analyzer: &Analyzer,
    url: String,
    cancel: &CancellationToken,
) -> ArticleOutcome {
    debug!("Fetching");
    let fetched = tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        fetched = analyzer.fetcher.fetch(&url) => Some(fetched),
    };
    let html = match fetched {
        None => {
            warn!(status = %ProcessingStatus::TimeoutError, "Cancelled while fetching");
            return ArticleOutcome::failed(url, ProcessingStatus::TimeoutError, None);
        }
        Some(Err(e)) => {
            warn!(status = %e.status(), error = %e, "Fetch failed");
            return ArticleOutcome::failed(url, e.status(), None);
        }
        Some(Ok(html)) => html,
    };

    debug!(bytes = html.len(), "Sanitizing");
    if cancel.is_cancelled() {
        warn!(status = %ProcessingStatus::TimeoutError, "Cancelled before sanitizing");
        return ArticleOutcome::failed(url, ProcessingStatus::TimeoutError, None);
    }
    let sanitizer = analyzer.sanitizer.clone();
    let sanitized = tokio::task::spawn_blocking(move || sanitizer.extract_plaintext(&html)).await;
    let text = match sanitized {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!(status = %e.status(), error = %e, "Sanitize failed");
            return ArticleOutcome::failed(url, e.status(), None);
        }
        Err(e) => {
            warn!(status = %ProcessingStatus::ParseError, error = %e, "Sanitizer worker failed");
            return ArticleOutcome::failed(url, ProcessingStatus::ParseError, None);
        }
    };

    debug!(preview = %truncate_for_log(&text, 120), "Tokenizing");
    let started = Instant::now();
    let tokenized = tokenize(
        analyzer.morphology.clone(),
        text,
        analyzer.tokenize_timeout,
        cancel,
    )
    .await;
    let elapsed = started.elapsed().as_secs_f64();

    let words = match tokenized {
        Ok(words) => words,
        Err(e) => {
            warn!(status = %e.status(), error = %e, elapsed_secs = elapsed, "Tokenize failed");
            return ArticleOutcome::failed(url, e.status(), Some(elapsed));
        }
    };

    let score = ArticleScore {
        rate: calculate_rate(&words, &analyzer.lexicon),
        words_count: words.len(),
    };
    info!(
        rate = score.rate,
        words = score.words_count,
        elapsed_secs = elapsed,
        "Analysed article"
    );
    ArticleOutcome::ok(url, score, elapsed)
}
