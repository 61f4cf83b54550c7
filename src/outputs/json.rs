//! JSON report output.
//!
//! Reports are grouped by local date, one file per run named after the local
//! time it finished:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     └── 14-30-00.json
//! ```

use crate::error::AppError;
use crate::models::{ArticleOutcome, BatchReport, OutcomeRecord};
use chrono::{DateTime, Local};
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Assemble a report for `outcomes`, stamped with `now`.
pub fn build_report(
    outcomes: &[ArticleOutcome],
    elapsed_seconds: f64,
    now: DateTime<Local>,
) -> BatchReport {
    BatchReport {
        generated_at: now.to_rfc3339(),
        elapsed_seconds,
        outcomes: outcomes.iter().map(OutcomeRecord::from).collect(),
    }
}

/// Write `report` under `json_output_dir/{date}/{HH-MM-SS}.json`.
///
/// Returns the path written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_report(
    report: &BatchReport,
    json_output_dir: &str,
    now: DateTime<Local>,
) -> Result<PathBuf, AppError> {
    let json = serde_json::to_string_pretty(report)?;

    let full_json_dir = PathBuf::from(json_output_dir).join(now.format("%Y-%m-%d").to_string());
    info!(full_json_dir = %full_json_dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(full_json_dir = %full_json_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = full_json_dir.join(format!("{}.json", now.format("%H-%M-%S")));
    fs::write(&output_json_filename, json).await?;
    info!(
        path = %output_json_filename.display(),
        outcomes = report.outcomes.len(),
        "Wrote JSON report"
    );

    Ok(output_json_filename)
}
