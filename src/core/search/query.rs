//! Tokenization shared by title indexing and query parsing.
//!
//! Titles and queries go through the same function, so a query token
//! matches exactly the title tokens it would produce itself:
//! - lower-cased before splitting
//! - split on runs of non-word characters (Unicode-aware `\W+`)
//! - empty tokens discarded

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid regex"));

/// Split text into lower-cased word tokens, preserving order and duplicates.
///
/// # Examples
///
/// ```
/// use folio::core::search::tokenize;
///
/// assert_eq!(tokenize("Hello, World!"), vec!["hello", "world"]);
/// assert_eq!(tokenize("snake_case stays"), vec!["snake_case", "stays"]);
/// assert!(tokenize("  --  ").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    NON_WORD
        .split(&lowered)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Distinct tokens of `text`
pub fn unique_tokens(text: &str) -> BTreeSet<String> {
    tokenize(text).into_iter().collect()
}
