//! Error types for every collaborator boundary.
//!
//! Stage errors ([`FetchError`], [`SanitizeError`], [`TokenizeError`]) never
//! leave an article task: each one knows which [`ProcessingStatus`] it maps
//! to, and the task turns it into an outcome. [`AppError`] covers process
//! wiring only (config, lexicon files, server, report output).

use crate::models::ProcessingStatus;
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain raw HTML for a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}")]
    Status { status: reqwest::StatusCode },
}

impl FetchError {
    pub fn status(&self) -> ProcessingStatus {
        ProcessingStatus::FetchError
    }
}

/// Failure to locate article text inside a page.
#[derive(Debug, Error)]
pub enum SanitizeError {
    #[error("article content not found")]
    ContentNotFound,
}

impl SanitizeError {
    pub fn status(&self) -> ProcessingStatus {
        ProcessingStatus::ParseError
    }
}

/// Failure to turn plaintext into normalized words.
#[derive(Debug, Error)]
pub enum TokenizeError {
    #[error("tokenization exceeded {0:?}")]
    Timeout(Duration),

    #[error("tokenization cancelled")]
    Cancelled,

    #[error("tokenizer worker failed: {0}")]
    Worker(String),
}

impl TokenizeError {
    /// A crashed worker means the text itself could not be processed.
    pub fn status(&self) -> ProcessingStatus {
        match self {
            TokenizeError::Timeout(_) | TokenizeError::Cancelled => ProcessingStatus::TimeoutError,
            TokenizeError::Worker(_) => ProcessingStatus::ParseError,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Process-level errors surfaced by `main`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot read lexicon {path}: {source}")]
    Lexicon {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot build http client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
