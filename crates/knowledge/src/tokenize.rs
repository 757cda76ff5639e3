//! Word tokenizer shared by indexing and querying.

use std::collections::BTreeSet;

/// Lowercase `text` and split it into its set of word tokens.
///
/// A word is a run of alphanumeric characters or underscores.
///
/// Unlike Python's `\w`, alphabetic combining marks (Arabic harakat,
/// Devanagari vowel signs) count as word characters, so a vowelled word stays
/// one token instead of splitting around each mark.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
