//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a backup directory full of state database backups
pub struct BackupDirBuilder {
    temp_dir: TempDir,
}

impl BackupDirBuilder {
    /// Create a new builder with an empty backup directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Get the path to the backup directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a backup database with the given file name and ItemTable rows
    pub fn with_backup(self, filename: &str, backup: BackupBuilder) -> Self {
        backup.create_at(&self.temp_dir.path().join(filename));
        self
    }

    /// Add an arbitrary file (e.g. a corrupt backup)
    pub fn with_file(self, filename: &str, content: &[u8]) -> Self {
        fs::write(self.temp_dir.path().join(filename), content).expect("Failed to write file");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for BackupDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one SQLite backup with an `ItemTable(key, value)`
#[derive(Default)]
pub struct BackupBuilder {
    rows: Vec<(String, String)>,
}

impl BackupBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw key/value row
    pub fn with_row(mut self, key: &str, value: &str) -> Self {
        self.rows.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a row holding a JSON value
    pub fn with_json(self, key: &str, value: Value) -> Self {
        self.with_row(key, &value.to_string())
    }

    /// Write the database to `path`
    pub fn create_at(&self, path: &Path) -> PathBuf {
        let conn = Connection::open(path).expect("Failed to create backup database");
        conn.execute("CREATE TABLE ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB)", [])
            .expect("Failed to create ItemTable");
        for (key, value) in &self.rows {
            conn.execute("INSERT INTO ItemTable (key, value) VALUES (?1, ?2)", params![key, value])
                .expect("Failed to insert row");
        }
        path.to_path_buf()
    }
}

/// Builder for the tabbed chat shape (`{"tabs": [...]}`)
#[derive(Default)]
pub struct TabbedChatBuilder {
    tabs: Vec<Value>,
}

impl TabbedChatBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tab; each bubble is (type, text)
    pub fn with_tab(mut self, title: &str, bubbles: &[(&str, &str)]) -> Self {
        let bubbles: Vec<Value> = bubbles
            .iter()
            .enumerate()
            .map(|(i, (kind, text))| json!({"type": kind, "text": text, "id": i}))
            .collect();
        self.tabs.push(json!({"chatTitle": title, "bubbles": bubbles}));
        self
    }

    pub fn to_json(&self) -> Value {
        json!({"tabs": self.tabs})
    }
}

/// Builder for the flat timeline shape (`[...]`)
#[derive(Default)]
pub struct TimelineBuilder {
    entries: Vec<Value>,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(mut self, text: &str, timestamp: i64) -> Self {
        self.entries.push(json!({"isUser": true, "text": text, "timestamp": timestamp}));
        self
    }

    pub fn assistant(mut self, text: &str, timestamp: i64) -> Self {
        self.entries.push(json!({"isUser": false, "text": text, "timestamp": timestamp}));
        self
    }

    pub fn system(mut self, text: &str, timestamp: i64) -> Self {
        self.entries.push(json!({"commandType": 2, "text": text, "timestamp": timestamp}));
        self
    }

    pub fn to_json(&self) -> Value {
        Value::Array(self.entries.clone())
    }
}

/// A long-enough assistant answer about Docker debugging
pub fn docker_answer() -> String {
    "The docker container fails because the image was built without the entrypoint. \
     Rebuild the image, then check the container logs for the error again."
        .to_string()
}

/// A realistic backup directory: one tabbed backup, one timeline backup, one corrupt file
pub fn realistic_backup_dir() -> TempDir {
    let answer = docker_answer();
    BackupDirBuilder::new()
        .with_backup(
            "state.vscdb.backup-1",
            BackupBuilder::new()
                .with_json(
                    "workbench.panel.aichat.view.aichat.chatdata",
                    TabbedChatBuilder::new()
                        .with_tab(
                            "Docker Debugging",
                            &[("user", "Why does my container crash?"), ("ai", answer.as_str())],
                        )
                        .with_tab("Tiny", &[("user", "hi")])
                        .to_json(),
                )
                .with_row("editor.fontSize", "14"),
        )
        .with_backup(
            "state.vscdb.backup-2",
            BackupBuilder::new()
                .with_json(
                    "aiService.prompts.history",
                    TimelineBuilder::new()
                        .user(
                            "How do I optimize this SQL query for performance?",
                            1_704_067_200_000,
                        )
                        .assistant(
                            "Add an index on the filtered column and avoid SELECT * in the query. \
                             Measure performance before and after.",
                            1_704_067_260_000,
                        )
                        .to_json(),
                )
                .with_row("composer.conversation.broken", "{not valid json"),
        )
        .with_file("notes.txt", b"not a backup")
        .build()
}
