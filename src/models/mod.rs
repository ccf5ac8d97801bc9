//! Data models for extracted chat transcripts.
//!
//! - [`RawRecord`] - A key/value pair read from a backup store
//! - [`Conversation`] / [`Message`] - The normalized message model both on-disk layouts map onto
//! - [`Metadata`] - Analytics computed per conversation (content stats, context tags, terms, tags)

pub mod conversation;
pub mod metadata;
pub mod record;

pub use conversation::{Conversation, Message, Role, Timestamp};
pub use metadata::{ContentStats, ContextTags, Metadata, Term};
pub use record::RawRecord;
