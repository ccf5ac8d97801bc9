use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::markdown::render_markdown;
use crate::config::Formatters;
use crate::processor::ProcessedConversation;

const FALLBACK_FILE_STEM: &str = "untitled";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteSummary {
    pub saved: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Pick `<slug>.md`, appending `-2`, `-3`, ... when the name is already taken in this run
fn unique_file_name(title: &str, formatters: &Formatters, used: &mut HashSet<String>) -> String {
    let slug = (formatters.filename)(title);
    let stem = if slug.is_empty() { FALLBACK_FILE_STEM.to_string() } else { slug };

    let mut candidate = format!("{}.md", stem);
    let mut suffix = 2;
    while used.contains(&candidate) {
        candidate = format!("{}-{}.md", stem, suffix);
        suffix += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Write one Markdown report per conversation into `target_dir`
///
/// A failed write is logged and counted; the remaining reports are still written.
pub fn write_reports(
    target_dir: &Path,
    conversations: &[ProcessedConversation],
    formatters: &Formatters,
    min_text_length: usize,
) -> WriteSummary {
    let mut summary = WriteSummary::default();
    let mut used = HashSet::new();

    for processed in conversations {
        let Some(markdown) =
            render_markdown(&processed.conversation, &processed.metadata, min_text_length)
        else {
            tracing::info!(
                title = %processed.conversation.title,
                "Skipping empty or short conversation"
            );
            summary.skipped += 1;
            continue;
        };

        // Titles often repeat across backups
        let file_name = unique_file_name(&processed.conversation.title, formatters, &mut used);
        let path = target_dir.join(&file_name);
        match fs::write(&path, markdown) {
            Ok(()) => {
                summary.saved += 1;
                tracing::info!(file = %file_name, "Saved");
            }
            Err(e) => {
                summary.failed += 1;
                tracing::error!(file = %file_name, error = %e, "Failed to save");
            }
        }
    }

    summary
}
