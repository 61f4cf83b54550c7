//! Batch fan-out over article tasks.
//!
//! All tasks are spawned up front on the runtime and awaited together with
//! `join_all`, which yields join results in spawn order, so completion order
//! never leaks into the result order. A task that panics or is aborted is
//! reported in its own position.

use crate::models::{ArticleOutcome, ProcessingStatus};
use crate::pipeline::Analyzer;
use crate::pipeline::article::process_article;
use futures::future::join_all;
use itertools::Itertools;
use std::time::Instant;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument};

/// Status for a task that never returned an outcome.
fn join_failure_status(e: &JoinError) -> ProcessingStatus {
    if e.is_panic() {
        ProcessingStatus::ParseError
    } else {
        ProcessingStatus::TimeoutError
    }
}

impl Analyzer {
    /// Analyze every URL concurrently; one outcome per input, in input order.
    ///
    /// Duplicate URLs are processed independently. Cancelling `cancel` makes
    /// every unfinished task end with `TIMEOUT_ERROR`.
    #[instrument(level = "info", skip_all, fields(urls = urls.len()))]
    pub async fn analyze(
        &self,
        urls: Vec<String>,
        cancel: &CancellationToken,
    ) -> Vec<ArticleOutcome> {
        let started = Instant::now();
        let total = urls.len();

        let handles = urls
            .iter()
            .cloned()
            .map(|url| {
                let analyzer = self.clone();
                let cancel = cancel.clone();
                tokio::spawn(async move { process_article(&analyzer, url, &cancel).await })
            })
            .collect::<Vec<_>>();

        let outcomes = join_all(handles)
            .await
            .into_iter()
            .zip(urls)
            .enumerate()
            .map(|(index, (joined, url))| match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    let status = join_failure_status(&e);
                    error!(index, %url, error = %e, %status, "Article task did not finish");
                    ArticleOutcome::failed(url, status, None)
                }
            })
            .collect::<Vec<_>>();

        let counts = outcomes.iter().counts_by(|o| o.status());
        let count = |status: ProcessingStatus| counts.get(&status).copied().unwrap_or(0);
        let elapsed = started.elapsed();
        info!(
            total,
            ok = count(ProcessingStatus::Ok),
            fetch_errors = count(ProcessingStatus::FetchError),
            parse_errors = count(ProcessingStatus::ParseError),
            timeouts = count(ProcessingStatus::TimeoutError),
            elapsed_secs = elapsed.as_secs_f64(),
            "Batch analysed"
        );
        outcomes
    }
}
