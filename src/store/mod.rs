//! Backup store access
//!
//! Locates editor state backups on disk and reads chat-related key/value records from them.
//! Stores are opened read-only; a backup that cannot be read is the caller's to log and skip.

pub mod discovery;
pub mod sqlite;

pub use discovery::{discover_backups, ensure_directories};
pub use sqlite::BackupStore;
