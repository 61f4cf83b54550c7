//! Splitting plaintext into normalized words under a time budget.
//!
//! Normalization is CPU-bound and can be slow on long articles, so
//! [`tokenize`] runs it on the blocking pool. The worker checks the deadline
//! and the cancellation token before every token and once more after the
//! last one, so a result finished past the deadline is never returned. The
//! async side races the worker against the same deadline so a stuck worker
//! cannot hold the task.

use crate::error::TokenizeError;
use crate::text::morphology::Morphology;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Leading and trailing punctuation, including guillemets and ellipsis.
static EDGE_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{P}\p{S}]+|[\p{P}\p{S}]+$").expect("valid punctuation regex"));

/// Negation particle kept despite being shorter than the length cutoff.
const NEGATION: &str = "не";

/// Normalized forms of this many characters or fewer are dropped. The cutoff
/// applies after normalization, so with a stemming [`Morphology`] a short stem
/// is dropped even when its surface word is longer.
const MIN_WORD_CHARS: usize = 2;

/// Strip quotes, ellipsis and surrounding punctuation from a raw token.
pub fn clean_word(raw: &str) -> String {
    let without_marks: String = raw
        .chars()
        .filter(|c| !matches!(c, '«' | '»' | '…'))
        .collect();
    EDGE_PUNCTUATION.replace_all(&without_marks, "").into_owned()
}

fn keep(normalized: &str) -> bool {
    normalized.chars().count() > MIN_WORD_CHARS || normalized == NEGATION
}

/// Normalize one raw token, or `None` if it is punctuation or too short.
fn normalize_token(morphology: &dyn Morphology, raw: &str) -> Option<String> {
    let cleaned = clean_word(raw);
    if cleaned.is_empty() {
        return None;
    }
    let normalized = morphology.normalize(&cleaned);
    keep(&normalized).then_some(normalized)
}

/// Split and normalize without any time bound. Used for the lexicon.
pub fn split_by_words(morphology: &dyn Morphology, text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(|raw| normalize_token(morphology, raw))
        .collect()
}

/// Split and normalize, giving up once `expires` passes or `cancel` fires.
///
/// The check runs before the first token and after the last one, so an
/// already expired budget fails even for empty text and a slow final token
/// cannot slip past the deadline.
fn split_by_words_until(
    morphology: &dyn Morphology,
    text: &str,
    budget: Duration,
    expires: Instant,
    cancel: &CancellationToken,
) -> Result<Vec<String>, TokenizeError> {
    let check = || {
        if cancel.is_cancelled() {
            Err(TokenizeError::Cancelled)
        } else if Instant::now() >= expires {
            Err(TokenizeError::Timeout(budget))
        } else {
            Ok(())
        }
    };

    check()?;
    let mut words = Vec::new();
    for raw in text.split_whitespace() {
        check()?;
        if let Some(word) = normalize_token(morphology, raw) {
            words.push(word);
        }
    }
    check()?;
    Ok(words)
}

/// Tokenize `text` within `budget`.
///
/// On timeout or cancellation the partial result is discarded. The worker is
/// told to stop through a child token when this future returns or is dropped.
#[instrument(level = "debug", skip_all, fields(bytes = text.len(), ?budget))]
pub async fn tokenize(
    morphology: Arc<dyn Morphology>,
    text: String,
    budget: Duration,
    cancel: &CancellationToken,
) -> Result<Vec<String>, TokenizeError> {
    let expires = Instant::now()
        .checked_add(budget)
        .unwrap_or_else(|| Instant::now() + Duration::from_secs(86_400 * 365));
    let worker_cancel = cancel.child_token();
    let _stop_worker = worker_cancel.clone().drop_guard();

    let mut worker = tokio::task::spawn_blocking(move || {
        split_by_words_until(&*morphology, &text, budget, expires, &worker_cancel)
    });

    let result = tokio::select! {
        biased;
        joined = &mut worker => match joined {
            Ok(words) => words,
            Err(e) if e.is_panic() => {
                Err(TokenizeError::Worker("tokenizer worker panicked".to_string()))
            }
            Err(e) => Err(TokenizeError::Worker(e.to_string())),
        },
        _ = cancel.cancelled() => Err(TokenizeError::Cancelled),
        _ = tokio::time::sleep_until(expires.into()) => Err(TokenizeError::Timeout(budget)),
    };

    match &result {
        Ok(words) => debug!(words = words.len(), "Tokenized article"),
        Err(e) => debug!(error = %e, "Tokenization abandoned"),
    }
    result
}
