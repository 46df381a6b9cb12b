//! Description previews derived from document content.
//!
//! The store never asks callers for a description; it derives one from
//! the markdown body through a [`Summarizer`].

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").expect("valid regex"));
static MARKUP_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[#`-]").expect("valid regex"));
static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").expect("valid regex"));

/// Produces a `description` from a document body
pub trait Summarizer: Send + Sync {
    fn summarize(&self, content: &str) -> String;
}

/// Plain-text preview: markup stripped, first `max_words` words kept
#[derive(Debug, Clone, Copy)]
pub struct TextPreview {
    pub max_words: usize,
}

impl TextPreview {
    pub fn new(max_words: usize) -> Self {
        Self { max_words }
    }
}

impl Default for TextPreview {
    fn default() -> Self {
        Self { max_words: 50 }
    }
}

impl Summarizer for TextPreview {
    fn summarize(&self, content: &str) -> String {
        text_preview(content, self.max_words)
    }
}

/// Strip HTML tags, heading/code/list markers and parenthesized spans
/// (link targets), then keep the first `max_words` whitespace-separated words.
pub fn text_preview(content: &str, max_words: usize) -> String {
    if content.is_empty() {
        return String::new();
    }

    let stripped = HTML_TAG.replace_all(content, "");
    let stripped = MARKUP_CHARS.replace_all(&stripped, "");
    let stripped = PARENTHESIZED.replace_all(&stripped, "");

    stripped
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
