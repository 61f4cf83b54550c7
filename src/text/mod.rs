//! Text analysis: normalization, tokenization, lexicon and scoring.
//!
//! - [`morphology`]: the `Morphology` collaborator and its implementations
//! - [`tokenizer`]: word splitting and deadline-bounded tokenization
//! - [`lexicon`]: the shared, read-only charged-word set
//! - [`score`]: the sensationalism rate

pub mod lexicon;
pub mod morphology;
pub mod score;
pub mod tokenizer;
