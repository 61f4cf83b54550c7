//! Collaborators that turn a URL into article plaintext.
//!
//! Each article task goes through two phases here:
//!
//! 1. **Fetching**: download the raw HTML ([`Fetcher`])
//! 2. **Sanitizing**: locate the article body and reduce it to text ([`Sanitizer`])
//!
//! | Implementation | Module | Backed by |
//! |----------------|--------|-----------|
//! | [`http::HttpFetcher`] | [`http`] | shared `reqwest::Client` |
//! | [`article::HtmlSanitizer`] | [`article`] | `scraper` CSS selectors |
//!
//! Both are shared by every task in a batch, so they are `Send + Sync` and
//! held behind `Arc<dyn _>`.

use crate::error::{FetchError, SanitizeError};
use async_trait::async_trait;

pub mod article;
pub mod http;

/// Downloads the page behind a URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Return the response body, failing on network errors and non-2xx statuses.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Extracts article plaintext from raw HTML.
pub trait Sanitizer: Send + Sync {
    fn extract_plaintext(&self, html: &str) -> Result<String, SanitizeError>;
}
