use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ContentStats, Message};

static CODE_BLOCK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```.*?```").expect("valid code block regex"));
static LIST_ITEM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*]\s").expect("valid list item regex"));

/// Structural statistics: fenced code blocks, list items, text volume
///
/// Text length is counted in characters, not bytes, so Cyrillic and Latin text weigh the same.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentAnalyzer;

impl ContentAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, messages: &[Message]) -> ContentStats {
        messages.iter().fold(ContentStats::default(), |mut stats, message| {
            let content = message.content.as_str();
            stats.total_text_length += content.chars().count();
            stats.code_block_count += CODE_BLOCK_PATTERN.find_iter(content).count();
            stats.list_item_count += LIST_ITEM_PATTERN.find_iter(content).count();
            stats
        })
    }
}
