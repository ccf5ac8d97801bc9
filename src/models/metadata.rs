use serde::{Deserialize, Serialize};

use crate::utils::OrderedSet;

/// Structural statistics over a conversation's messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStats {
    pub code_block_count: usize,
    pub list_item_count: usize,
    pub total_text_length: usize,
}

/// Detected technology and category labels, in detector-table order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextTags {
    pub technologies: OrderedSet<String>,
    pub categories: OrderedSet<String>,
}

/// A keyword stem with its occurrence count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub stem: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub content: ContentStats,
    pub context: ContextTags,
    pub terms: Vec<Term>,
    pub tags: Vec<String>,
}
