//! The concurrent analysis pipeline.
//!
//! - [`article`]: one URL through fetch, sanitize, tokenize and score
//! - [`batch`]: fan-out over many URLs with one result per input, in input order

use crate::config::AppConfig;
use crate::error::AppError;
use crate::scrapers::article::HtmlSanitizer;
use crate::scrapers::http::HttpFetcher;
use crate::scrapers::{Fetcher, Sanitizer};
use crate::text::lexicon::{ChargedLexicon, load_lexicon};
use crate::text::morphology::Morphology;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument};

pub mod article;
pub mod batch;

/// Everything an article task needs, shared read-only by all tasks.
///
/// Cloning is cheap: every collaborator sits behind an `Arc`.
#[derive(Clone)]
pub struct Analyzer {
    pub fetcher: Arc<dyn Fetcher>,
    pub sanitizer: Arc<dyn Sanitizer>,
    pub morphology: Arc<dyn Morphology>,
    pub lexicon: Arc<ChargedLexicon>,
    /// Budget for the tokenization stage of each task.
    pub tokenize_timeout: Duration,
}

impl Analyzer {
    /// Wire the production collaborators and load the lexicon.
    #[instrument(level = "info", skip_all)]
    pub async fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let morphology = config.morphology.build();
        let lexicon = load_lexicon(
            morphology.as_ref(),
            &config.negative_words_path,
            &config.positive_words_path,
        )
        .await?;
        let fetcher = HttpFetcher::new(&config.user_agent, config.fetch_timeout())?;
        let sanitizer = HtmlSanitizer::new(&config.article_selectors)?;

        let analyzer = Self {
            fetcher: Arc::new(fetcher),
            sanitizer: Arc::new(sanitizer),
            morphology,
            lexicon: Arc::new(lexicon),
            tokenize_timeout: config.tokenize_timeout(),
        };
        info!(?analyzer, morphology = ?config.morphology, "Analyzer ready");
        Ok(analyzer)
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("lexicon_words", &self.lexicon.len())
            .field("tokenize_timeout", &self.tokenize_timeout)
            .finish_non_exhaustive()
    }
}
