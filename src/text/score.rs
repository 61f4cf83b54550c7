//! Sensationalism rate.

use crate::text::lexicon::ChargedLexicon;
use crate::utils::round2;

/// Percentage of `words` found in `lexicon`, rounded to two decimals.
///
/// Repeated words count every time. An empty article scores `0.0`.
pub fn calculate_rate<S: AsRef<str>>(words: &[S], lexicon: &ChargedLexicon) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let charged = words
        .iter()
        .filter(|word| lexicon.contains(word.as_ref()))
        .count();
    round2(charged as f64 / words.len() as f64 * 100.0)
}
