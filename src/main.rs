//! # Jaundice Rate
//!
//! Scores news articles for sensationalism: the share of an article's words
//! that appear in a lexicon of emotionally charged terms.
//!
//! ## Usage
//!
//! ```sh
//! jaundice_rate analyze https://inosmi.ru/20220303/kitay-shos-253268048.html random_link
//! jaundice_rate serve
//! ```
//!
//! ## Architecture
//!
//! Every URL in a batch becomes its own task:
//! 1. **Fetching**: download the page through a shared HTTP client
//! 2. **Sanitizing**: locate the article body and reduce it to plaintext
//! 3. **Tokenizing**: split and normalize words on the blocking pool, under a deadline
//! 4. **Scoring**: percentage of words found in the charged lexicon
//!
//! Each task ends with exactly one outcome (`OK`, `FETCH_ERROR`, `PARSE_ERROR`
//! or `TIMEOUT_ERROR`); a failing URL never affects the others.

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod text;
mod utils;

use cli::{Cli, Command};
use config::AppConfig;
use outputs::{json, text::format_outcome_line};
use pipeline::Analyzer;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "jaundice_rate starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = config::load_config(args.config.as_deref()).await?;

    match args.command {
        Command::Analyze {
            urls,
            json_output_dir,
            timeout,
        } => {
            if let Some(timeout) = timeout {
                config.tokenize_timeout_secs = timeout;
                config.validate()?;
            }
            run_batch(&config, urls, json_output_dir.as_deref()).await?;
        }
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            let state = api::AppState {
                analyzer: Arc::new(Analyzer::from_config(&config).await?),
                max_urls: config.max_urls_per_request,
                request_timeout: config.request_timeout(),
            };
            api::serve(state, &config.bind_addr).await?;
        }
    }

    Ok(())
}

/// Analyze `urls`, print one line per outcome and optionally write a report.
async fn run_batch(
    config: &AppConfig,
    urls: Vec<String>,
    json_output_dir: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();

    // Early check: fail before any network work if the report can't be written
    if let Some(dir) = json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "JSON output directory is not writable");
            return Err(e.into());
        }
    }

    let analyzer = Analyzer::from_config(config).await?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; cancelling unfinished articles");
            interrupt.cancel();
        }
    });

    let outcomes = analyzer.analyze(urls, &cancel).await;
    for outcome in &outcomes {
        println!("{}", format_outcome_line(outcome));
    }

    let elapsed = start_time.elapsed();
    if let Some(dir) = json_output_dir {
        let now = chrono::Local::now();
        let report = json::build_report(&outcomes, elapsed.as_secs_f64(), now);
        if let Err(e) = json::write_report(&report, dir, now).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }

    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
