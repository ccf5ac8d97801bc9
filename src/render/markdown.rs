use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Conversation, Metadata, Role};
use crate::processor::is_suppressed;

static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

fn role_heading(role: Role) -> &'static str {
    match role {
        Role::User => "**User**",
        Role::System => "**System**",
        Role::Assistant | Role::Unknown => "**Assistant**",
    }
}

fn clean_content(content: &str) -> String {
    let normalized = content.replace("\r\n", "\n");
    EXCESS_NEWLINES.replace_all(&normalized, "\n\n").trim().to_string()
}

/// Render a conversation report, or `None` when it is below `min_text_length`
pub fn render_markdown(
    conversation: &Conversation,
    metadata: &Metadata,
    min_text_length: usize,
) -> Option<String> {
    if is_suppressed(metadata, min_text_length) {
        return None;
    }

    let categories = if metadata.context.categories.is_empty() {
        "not defined".to_string()
    } else {
        metadata.context.categories.as_slice().join(", ")
    };
    let tags =
        if metadata.tags.is_empty() { "#untagged".to_string() } else { metadata.tags.join(" ") };

    let mut markdown = format!(
        "# Conversation: {}\n\n\
         ## Metadata\n\
         - Categories: {}\n\
         - Content Statistics:\n  \
         - Code Blocks: {}\n  \
         - Lists: {}\n  \
         - Text Volume: {} characters\n\n\
         ## Tags\n\
         {}\n\n\
         ---\n\n",
        conversation.title,
        categories,
        metadata.content.code_block_count,
        metadata.content.list_item_count,
        metadata.content.total_text_length,
        tags,
    );

    // Whitespace-only messages get no section
    for message in conversation.messages.iter().filter(|m| !m.content.trim().is_empty()) {
        markdown.push_str("### ");
        markdown.push_str(role_heading(message.role));
        markdown.push('\n');
        markdown.push_str(&clean_content(&message.content));
        markdown.push_str("\n\n");
    }

    Some(markdown)
}
