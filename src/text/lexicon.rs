//! The charged-word lexicon.

use crate::error::AppError;
use crate::text::morphology::Morphology;
use crate::text::tokenizer::split_by_words;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Normalized forms of negative and positive charged words.
///
/// Built once and only read afterwards; share it behind an `Arc`.
#[derive(Debug, Default, Clone)]
pub struct ChargedLexicon {
    words: HashSet<String>,
}

impl ChargedLexicon {
    /// Normalize both word lists and merge them. Overlapping entries collapse.
    pub fn build(morphology: &dyn Morphology, negative_text: &str, positive_text: &str) -> Self {
        let words = split_by_words(morphology, negative_text)
            .into_iter()
            .chain(split_by_words(morphology, positive_text))
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

async fn read_word_list(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).await.map_err(|source| AppError::Lexicon {
        path: path.display().to_string(),
        source,
    })
}

/// Read both word list files and build the lexicon.
#[instrument(
    level = "info",
    skip_all,
    fields(negative = %negative_path.display(), positive = %positive_path.display())
)]
pub async fn load_lexicon(
    morphology: &dyn Morphology,
    negative_path: &Path,
    positive_path: &Path,
) -> Result<ChargedLexicon, AppError> {
    let negative_text = read_word_list(negative_path).await?;
    let positive_text = read_word_list(positive_path).await?;
    let lexicon = ChargedLexicon::build(morphology, &negative_text, &positive_text);
    if lexicon.is_empty() {
        warn!("Charged lexicon is empty; every article will score 0");
    } else {
        info!(words = lexicon.len(), "Loaded charged lexicon");
    }
    Ok(lexicon)
}
