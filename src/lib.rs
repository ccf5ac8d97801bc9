//! Chat Reader - Extract AI assistant chats from editor state backups
//!
//! Editor state databases keep chat transcripts as JSON blobs in a key/value table. This library
//! reads those blobs, normalizes the two on-disk layouts into one message model, and computes
//! lightweight analytics for each conversation:
//!
//! - Normalizing tabbed (`{"tabs": [...]}`) and flat-timeline (`[...]`) chat JSON
//! - Content statistics (code blocks, list items, text volume)
//! - Technology and category detection from keyword tables
//! - Frequency-ranked keyword stems with pluggable tokenizer and stemmer
//! - Markdown report rendering
//!
//! # Example
//!
//! ```
//! use chat_reader::{MetadataGenerator, SchemaNormalizer};
//!
//! let raw = r#"{"tabs":[{"chatTitle":"Docker","bubbles":[{"type":"user","text":"docker error"}]}]}"#;
//! let conversations = SchemaNormalizer::default().normalize(raw)?;
//! let metadata = MetadataGenerator::default().generate(&conversations[0]);
//! assert_eq!(metadata.tags[0], "#docker");
//! # Ok::<(), chat_reader::ParseError>(())
//! ```

pub mod analyzers;
pub mod cli;
pub mod config;
pub mod models;
pub mod parsers;
pub mod processor;
pub mod render;
pub mod store;
pub mod utils;

// Re-export commonly used types
pub use analyzers::MetadataGenerator;
pub use config::Config;
pub use models::{Conversation, Message, Metadata, RawRecord, Role};
pub use parsers::{ParseError, SchemaNormalizer};
pub use processor::process_records;
pub use utils::format_path_with_tilde;
