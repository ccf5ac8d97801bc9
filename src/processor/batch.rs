//! Per-record normalization and parallel metadata generation.

use rayon::prelude::*;

use crate::analyzers::MetadataGenerator;
use crate::models::{Conversation, Metadata, RawRecord};
use crate::parsers::{RawShape, SchemaNormalizer};

/// A conversation with its computed metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedConversation {
    pub conversation: Conversation,
    pub metadata: Metadata,
}

/// Counters for one processing run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub records: usize,
    /// Records that were not valid JSON
    pub parse_failures: usize,
    /// Valid JSON in neither known shape
    pub unrecognized: usize,
    pub conversations: usize,
    /// Conversations below the minimum text length
    pub suppressed: usize,
}

impl BatchSummary {
    pub fn kept(&self) -> usize {
        self.conversations - self.suppressed
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutput {
    /// Conversations that passed the suppression rule, in record order
    pub conversations: Vec<ProcessedConversation>,
    pub summary: BatchSummary,
}

/// True when a conversation has too little text to be rendered
pub fn is_suppressed(metadata: &Metadata, min_text_length: usize) -> bool {
    metadata.content.total_text_length < min_text_length
}

/// Normalize every record, isolating failures to the record that caused them
pub fn normalize_records(
    normalizer: &SchemaNormalizer,
    records: &[RawRecord],
    summary: &mut BatchSummary,
) -> Vec<Conversation> {
    let mut conversations = Vec::new();

    for record in records {
        summary.records += 1;
        let shape = match RawShape::parse(&record.value) {
            Ok(shape) => shape,
            Err(e) => {
                tracing::warn!(key = %record.key, error = %e, "Failed to parse record");
                summary.parse_failures += 1;
                continue;
            }
        };

        if shape == RawShape::Unrecognized {
            tracing::debug!(key = %record.key, "Record matches no known chat shape");
            summary.unrecognized += 1;
            continue;
        }

        let normalized = normalizer.normalize_shape(shape);
        tracing::debug!(key = %record.key, count = normalized.len(), "Normalized record");
        conversations.extend(normalized.into_iter().filter(|c| !c.messages.is_empty()));
    }

    summary.conversations = conversations.len();
    conversations
}

/// Generate metadata for every conversation in parallel, preserving input order
pub fn analyze_conversations(
    generator: &MetadataGenerator,
    conversations: Vec<Conversation>,
) -> Vec<ProcessedConversation> {
    conversations
        .into_par_iter()
        .map(|conversation| {
            let metadata = generator.generate(&conversation);
            ProcessedConversation { conversation, metadata }
        })
        .collect()
}

/// Full core pipeline: normalize, analyze, then drop conversations below `min_text_length`
pub fn process_records(
    records: &[RawRecord],
    normalizer: &SchemaNormalizer,
    generator: &MetadataGenerator,
    min_text_length: usize,
) -> BatchOutput {
    let mut summary = BatchSummary::default();
    let conversations = normalize_records(normalizer, records, &mut summary);
    let processed = analyze_conversations(generator, conversations);

    // Suppression needs the text length, so it runs after analysis
    let (kept, suppressed): (Vec<_>, Vec<_>) = processed
        .into_iter()
        .partition(|p| !is_suppressed(&p.metadata, min_text_length));

    for p in &suppressed {
        tracing::info!(
            title = %p.conversation.title,
            length = p.metadata.content.total_text_length,
            "Skipping empty or short conversation"
        );
    }
    summary.suppressed = suppressed.len();

    BatchOutput { conversations: kept, summary }
}
