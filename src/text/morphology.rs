//! Word-form normalization.
//!
//! The pipeline only needs `normalize(token) -> canonical form`, deterministic
//! per token. [`SnowballMorphology`] reduces inflected forms to a shared stem so
//! that "кризиса" and "кризисом" both match a lexicon entry for "кризис";
//! [`LowercaseMorphology`] only folds case.
//!
//! A stem is not a dictionary lemma: it is often shorter than the base form
//! and can differ from it. Word counts and the length cutoff in the tokenizer
//! are therefore stem-based; lexicon entries and article words go through the
//! same normalizer, so matching is unaffected.

use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Normalizes a raw token to its canonical form.
///
/// Implementations are shared across all article tasks and called from the
/// blocking pool, so they must be `Send + Sync` and must not fail.
pub trait Morphology: Send + Sync {
    fn normalize(&self, token: &str) -> String;
}

/// Which [`Morphology`] implementation to build from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorphologyKind {
    #[default]
    Russian,
    English,
    Lowercase,
}

impl MorphologyKind {
    pub fn build(self) -> Arc<dyn Morphology> {
        match self {
            MorphologyKind::Russian => Arc::new(SnowballMorphology::new(Algorithm::Russian)),
            MorphologyKind::English => Arc::new(SnowballMorphology::new(Algorithm::English)),
            MorphologyKind::Lowercase => Arc::new(LowercaseMorphology),
        }
    }
}

/// Case-folds the token; `ё` is folded to `е` as Russian dictionaries do.
fn fold(token: &str) -> String {
    token.to_lowercase().replace('ё', "е")
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LowercaseMorphology;

impl Morphology for LowercaseMorphology {
    fn normalize(&self, token: &str) -> String {
        fold(token)
    }
}

/// Snowball stemmer over case-folded tokens.
pub struct SnowballMorphology {
    stemmer: Stemmer,
}

impl SnowballMorphology {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            stemmer: Stemmer::create(algorithm),
        }
    }
}

impl fmt::Debug for SnowballMorphology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballMorphology").finish_non_exhaustive()
    }
}

impl Morphology for SnowballMorphology {
    fn normalize(&self, token: &str) -> String {
        let folded = fold(token);
        self.stemmer.stem(&folded).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_folds_case_and_yo() {
        let morph = LowercaseMorphology;
        assert_eq!(morph.normalize("ЁЖИК"), "ежик");
        assert_eq!(morph.normalize("Crisis"), "crisis");
    }

    #[test]
    fn test_russian_inflections_share_a_form() {
        let morph = MorphologyKind::Russian.build();
        assert_eq!(morph.normalize("кризиса"), morph.normalize("кризисом"));
        assert_eq!(morph.normalize("Кризис"), morph.normalize("кризис"));
    }

    #[test]
    fn test_english_inflections_share_a_form() {
        let morph = MorphologyKind::English.build();
        assert_eq!(morph.normalize("Attacks"), morph.normalize("attack"));
    }

    #[test]
    fn test_stem_is_never_longer_than_folded_word() {
        let morph = MorphologyKind::Russian.build();
        for word in ["кризисами", "скандального", "они", "шёл"] {
            let stem = morph.normalize(word);
            assert!(stem.chars().count() <= word.chars().count(), "{word} -> {stem}");
        }
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let morph = MorphologyKind::Russian.build();
        assert_eq!(morph.normalize("скандальный"), morph.normalize("скандальный"));
    }

    #[test]
    fn test_kind_from_yaml() {
        let kind: MorphologyKind = serde_yaml::from_str("lowercase").unwrap();
        assert_eq!(kind, MorphologyKind::Lowercase);
    }
}
