//! Text normalization and tokenization utilities.
//!
//! Every string that takes part in a comparison (indexed keys, queries,
//! filter values, suggestion candidates) goes through [`normalize`] first, so
//! that "sabila" and "Sábila" compare equal.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

/// Normalize text: decompose, strip diacritics, lowercase and trim.
pub fn normalize(text: &str) -> String {
  text
    .trim()
    .nfd()
    .filter(|c| !is_combining_mark(*c))
    .flat_map(char::to_lowercase)
    .collect()
}

/// Length of `text` in user-perceived characters.
pub fn text_len(text: &str) -> usize {
  text.graphemes(true).count()
}

/// Split an already normalized query into search tokens.
///
/// Tokens are whitespace-delimited and must be longer than one character.
pub fn query_tokens(normalized: &str) -> Vec<String> {
  normalized
    .split_whitespace()
    .filter(|token| text_len(token) > 1)
    .map(str::to_string)
    .collect()
}

/// Split a normalized description into the words worth indexing.
pub fn description_words(normalized: &str, min_len: usize) -> impl Iterator<Item = &str> {
  normalized
    .split_whitespace()
    .filter(move |word| text_len(word) > min_len)
}
