use std::sync::LazyLock;

use regex::Regex;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]+").expect("valid word regex"));

/// Splits text into an ordered sequence of word-like tokens
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Splits on every run of characters that are not letters, digits or underscores
///
/// Letters are matched across scripts, so Cyrillic and Latin words tokenize the same way.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        WORD_PATTERN.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }
}
