//! Batch processing of chat records into analyzed conversations
//!
//! Records are independent: a record that fails to parse is logged and counted, and never
//! changes what its siblings produce. Metadata generation runs in parallel across conversations.

pub mod batch;
pub mod run;

pub use batch::{
    BatchOutput, BatchSummary, ProcessedConversation, analyze_conversations, is_suppressed,
    normalize_records, process_records,
};
pub use run::{CollectedRecords, collect_records, process_backups};
