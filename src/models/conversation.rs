use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    Unknown,
}

impl Role {
    /// Map a raw role label onto a known role, falling back to [`Role::Unknown`]
    pub fn from_label(label: &str) -> Self {
        match label {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "system" => Role::System,
            _ => Role::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Unknown => "unknown",
        }
    }
}

/// Message timestamp as found on disk
///
/// Flat timelines carry epoch milliseconds. Tabbed bubbles only carry an `id`, which is kept
/// as-is: numeric ids become [`Timestamp::EpochMillis`], anything else stays an opaque ordering key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    EpochMillis(i64),
    Opaque(String),
}

impl Timestamp {
    /// Epoch milliseconds, if this timestamp is numeric
    pub fn as_millis(&self) -> Option<i64> {
        match self {
            Timestamp::EpochMillis(ms) => Some(*ms),
            Timestamp::Opaque(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into(), timestamp: None }
    }

    pub fn with_timestamp(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// One reconstructed chat session
///
/// Messages keep their source order. The normalizer never emits a conversation without messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub title: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Concatenate all non-empty message contents with a single space
    pub fn joined_text(messages: &[Message]) -> String {
        let parts: Vec<&str> =
            messages.iter().map(|m| m.content.as_str()).filter(|c| !c.is_empty()).collect();
        parts.join(" ")
    }
}
