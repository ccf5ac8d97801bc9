use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::ParseError;
use crate::config::Formatters;
use crate::models::{Conversation, Message, Role, Timestamp};

/// Timestamps at or before 2000-01-01T00:00:00Z are placeholders and never date a chat
pub const MIN_PLAUSIBLE_EPOCH_MS: i64 = 946_684_800_000;

const UNTITLED_CHAT: &str = "Untitled Chat";
const SYSTEM_COMMAND_TYPE: f64 = 2.0;

/// Structural classification of a raw chat value, decided once at the parse boundary
#[derive(Debug, Clone, PartialEq)]
pub enum RawShape {
    /// `{"tabs": [...]}` - one conversation per tab
    Tabbed(Vec<Value>),
    /// `[...]` - a single conversation of timeline entries
    FlatTimeline(Vec<Value>),
    Unrecognized,
}

impl RawShape {
    /// Parse `raw` as JSON and classify it
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(raw)?;
        Ok(Self::detect(value))
    }

    pub fn detect(value: Value) -> Self {
        match value {
            Value::Array(entries) => RawShape::FlatTimeline(entries),
            Value::Object(mut fields) => match fields.remove("tabs") {
                Some(Value::Array(tabs)) => RawShape::Tabbed(tabs),
                _ => RawShape::Unrecognized,
            },
            _ => RawShape::Unrecognized,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Tab {
    #[serde(
        rename = "chatTitle",
        default,
        deserialize_with = "super::deserializers::lenient_string"
    )]
    chat_title: Option<String>,
    #[serde(default, deserialize_with = "super::deserializers::lenient_array")]
    bubbles: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct Bubble {
    #[serde(rename = "type", default, deserialize_with = "super::deserializers::lenient_string")]
    bubble_type: Option<String>,
    #[serde(default, deserialize_with = "super::deserializers::lenient_string")]
    text: Option<String>,
    #[serde(default, deserialize_with = "super::deserializers::deserialize_bubble_id")]
    id: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
struct TimelineEntry {
    #[serde(rename = "commandType", default)]
    command_type: Value,
    #[serde(rename = "isUser", default, deserialize_with = "super::deserializers::lenient_bool")]
    is_user: Option<bool>,
    #[serde(default, deserialize_with = "super::deserializers::lenient_string")]
    text: Option<String>,
    #[serde(default, deserialize_with = "super::deserializers::lenient_i64")]
    timestamp: Option<i64>,
}

/// Turns raw chat JSON into normalized [`Conversation`]s
///
/// `now` stands in for every missing timeline timestamp and for undatable chats, so a single
/// run is reproducible.
#[derive(Debug, Clone)]
pub struct SchemaNormalizer {
    now: DateTime<Utc>,
    formatters: Formatters,
}

impl SchemaNormalizer {
    pub fn new(now: DateTime<Utc>, formatters: Formatters) -> Self {
        Self { now, formatters }
    }

    /// Parse `raw` as JSON and normalize it
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidJson`] when `raw` is not valid JSON. A valid value that
    /// matches neither known shape yields an empty Vec, not an error.
    pub fn normalize(&self, raw: &str) -> Result<Vec<Conversation>, ParseError> {
        Ok(self.normalize_shape(RawShape::parse(raw)?))
    }

    pub fn normalize_shape(&self, shape: RawShape) -> Vec<Conversation> {
        match shape {
            RawShape::Tabbed(tabs) => self.normalize_tabs(tabs),
            RawShape::FlatTimeline(entries) => self.normalize_timeline(entries).into_iter().collect(),
            RawShape::Unrecognized => Vec::new(),
        }
    }

    fn normalize_tabs(&self, tabs: Vec<Value>) -> Vec<Conversation> {
        tabs.into_iter()
            .filter_map(|tab| serde_json::from_value::<Tab>(tab).ok())
            .filter_map(|tab| {
                let bubbles = tab.bubbles?;
                let messages: Vec<Message> = bubbles
                    .into_iter()
                    .filter_map(|bubble| serde_json::from_value::<Bubble>(bubble).ok())
                    .map(|bubble| Message {
                        role: bubble.bubble_type.as_deref().map_or(Role::Unknown, Role::from_label),
                        content: bubble.text.unwrap_or_default(),
                        timestamp: bubble.id,
                    })
                    .collect();

                if messages.is_empty() {
                    return None;
                }

                Some(Conversation {
                    title: tab.chat_title.unwrap_or_else(|| UNTITLED_CHAT.to_string()),
                    date: None,
                    messages,
                })
            })
            .collect()
    }

    fn normalize_timeline(&self, entries: Vec<Value>) -> Option<Conversation> {
        let now_ms = self.now.timestamp_millis();

        let messages: Vec<Message> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<TimelineEntry>(entry).ok())
            .map(|entry| {
                let role = if entry.command_type.as_f64() == Some(SYSTEM_COMMAND_TYPE) {
                    Role::System
                } else if entry.is_user == Some(true) {
                    Role::User
                } else {
                    Role::Assistant
                };
                let millis = entry.timestamp.filter(|ts| *ts != 0).unwrap_or(now_ms);
                Message {
                    role,
                    content: entry.text.unwrap_or_default(),
                    timestamp: Some(Timestamp::EpochMillis(millis)),
                }
            })
            .collect();

        if messages.is_empty() {
            return None;
        }

        let date = earliest_plausible_date(&messages).unwrap_or(self.now);
        Some(Conversation {
            title: format!("Chat-{}", (self.formatters.date)(&date)),
            date: Some(date),
            messages,
        })
    }
}

impl Default for SchemaNormalizer {
    fn default() -> Self {
        Self::new(Utc::now(), Formatters::default())
    }
}

/// Earliest message timestamp strictly after [`MIN_PLAUSIBLE_EPOCH_MS`]
fn earliest_plausible_date(messages: &[Message]) -> Option<DateTime<Utc>> {
    messages
        .iter()
        .filter_map(|m| m.timestamp.as_ref().and_then(Timestamp::as_millis))
        .filter(|ms| *ms > MIN_PLAUSIBLE_EPOCH_MS)
        .min()
        .and_then(DateTime::from_timestamp_millis)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn normalizer() -> SchemaNormalizer {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        SchemaNormalizer::new(now, Formatters::default())
    }

    #[test]
    fn test_tabbed_single_bubble() {
        let raw = r#"{"tabs":[{"chatTitle":"T","bubbles":[{"type":"user","text":"hi","id":1}]}]}"#;
        let conversations = normalizer().normalize(raw).unwrap();

        assert_eq!(conversations.len(), 1);
        assert_eq!(
            conversations[0],
            Conversation {
                title: "T".to_string(),
                date: None,
                messages: vec![
                    Message::new(Role::User, "hi").with_timestamp(Timestamp::EpochMillis(1))
                ],
            }
        );
    }

    #[test]
    fn test_tabbed_defaults() {
        let raw = r#"{"tabs":[{"bubbles":[{"id":"b-1"},{"type":"assistant","text":null}]}]}"#;
        let conversations = normalizer().normalize(raw).unwrap();

        assert_eq!(conversations.len(), 1);
        let conversation = &conversations[0];
        assert_eq!(conversation.title, "Untitled Chat");
        assert_eq!(conversation.messages[0].role, Role::Unknown);
        assert_eq!(conversation.messages[0].content, "");
        assert_eq!(conversation.messages[0].timestamp, Some(Timestamp::Opaque("b-1".to_string())));
        assert_eq!(conversation.messages[1].role, Role::Assistant);
        assert_eq!(conversation.messages[1].timestamp, None);
    }

    #[test]
    fn test_tabbed_one_conversation_per_tab_with_bubbles() {
        let raw = r#"{"tabs":[
            {"chatTitle":"A","bubbles":[{"type":"user","text":"one"}]},
            {"chatTitle":"no bubbles"},
            {"chatTitle":"bad bubbles","bubbles":"nope"},
            {"chatTitle":"empty","bubbles":[]},
            {"chatTitle":"B","bubbles":[{"type":"user","text":"two"},{"type":"assistant","text":"three"}]}
        ]}"#;
        let conversations = normalizer().normalize(raw).unwrap();

        let titles: Vec<&str> = conversations.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(conversations[1].messages.len(), 2);
    }

    #[test]
    fn test_tabbed_preserves_bubble_order() {
        let raw = r#"{"tabs":[{"bubbles":[
            {"type":"user","text":"1","id":30},
            {"type":"assistant","text":"2","id":10},
            {"type":"user","text":"3","id":20}
        ]}]}"#;
        let conversations = normalizer().normalize(raw).unwrap();
        let contents: Vec<&str> =
            conversations[0].messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_flat_roles_and_date() {
        let raw = r#"[
            {"isUser":true,"text":"a","timestamp":946684800001},
            {"commandType":2,"text":"b","timestamp":1577836800000}
        ]"#;
        let conversations = normalizer().normalize(raw).unwrap();

        assert_eq!(conversations.len(), 1);
        let conversation = &conversations[0];
        assert_eq!(conversation.messages[0].role, Role::User);
        assert_eq!(conversation.messages[1].role, Role::System);
        assert_eq!(conversation.date, DateTime::from_timestamp_millis(946_684_800_001));
        assert_eq!(conversation.title, "Chat-2000-01-01");
    }

    #[test]
    fn test_flat_boundary_timestamp_excluded_from_date() {
        let raw = r#"[
            {"isUser":true,"text":"a","timestamp":946684800000},
            {"isUser":false,"text":"b","timestamp":1577836800000}
        ]"#;
        let conversations = normalizer().normalize(raw).unwrap();

        assert_eq!(conversations[0].date, DateTime::from_timestamp_millis(1_577_836_800_000));
        assert_eq!(conversations[0].title, "Chat-2020-01-01");
        // Still stored on the message
        assert_eq!(
            conversations[0].messages[0].timestamp,
            Some(Timestamp::EpochMillis(946_684_800_000))
        );
    }

    #[test]
    fn test_flat_numeric_string_timestamps_date_the_chat() {
        let raw = r#"[
            {"isUser":true,"text":"a","timestamp":"1577836800000"},
            {"isUser":false,"text":"b","timestamp":"946684800000"}
        ]"#;
        let conversations = normalizer().normalize(raw).unwrap();

        assert_eq!(conversations[0].title, "Chat-2020-01-01");
        assert_eq!(
            conversations[0].messages[0].timestamp,
            Some(Timestamp::EpochMillis(1_577_836_800_000))
        );
    }

    #[test]
    fn test_flat_role_mapping() {
        let raw = r#"[
            {"commandType":2,"isUser":true,"text":"system wins"},
            {"isUser":true,"text":"user"},
            {"isUser":false,"text":"assistant"},
            {"text":"assistant by default"},
            {"isUser":"true","text":"only real booleans count"}
        ]"#;
        let conversations = normalizer().normalize(raw).unwrap();
        let roles: Vec<Role> = conversations[0].messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::System, Role::User, Role::Assistant, Role::Assistant, Role::Assistant]
        );
    }

    #[test]
    fn test_flat_missing_timestamps_default_to_now() {
        let normalizer = normalizer();
        let raw = r#"[{"isUser":true,"text":"no time"},{"isUser":false,"text":"old","timestamp":1000}]"#;
        let conversations = normalizer.normalize(raw).unwrap();
        let conversation = &conversations[0];

        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(
            conversation.messages[0].timestamp,
            Some(Timestamp::EpochMillis(now.timestamp_millis()))
        );
        assert_eq!(conversation.messages[1].timestamp, Some(Timestamp::EpochMillis(1000)));
        assert_eq!(conversation.date, Some(now));
        assert_eq!(conversation.title, "Chat-2024-06-01");
    }

    #[test]
    fn test_flat_all_placeholder_timestamps_date_is_now() {
        let raw = r#"[{"isUser":true,"text":"x","timestamp":5},{"text":"y","timestamp":946684800000}]"#;
        let conversations = normalizer().normalize(raw).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(conversations[0].date, Some(now));
    }

    #[test]
    fn test_flat_missing_text_is_empty() {
        let raw = r#"[{"isUser":true,"timestamp":1577836800000},{"isUser":true,"text":null}]"#;
        let conversations = normalizer().normalize(raw).unwrap();
        assert!(conversations[0].messages.iter().all(|m| m.content.is_empty()));
    }

    #[test]
    fn test_empty_array_yields_nothing() {
        assert!(normalizer().normalize("[]").unwrap().is_empty());
    }

    #[test]
    fn test_array_of_non_objects_yields_nothing() {
        assert!(normalizer().normalize("[1, \"two\", null]").unwrap().is_empty());
    }

    #[test]
    fn test_unrecognized_shapes_yield_nothing() {
        let normalizer = normalizer();
        for raw in [r#"{"other":1}"#, r#"{"tabs":"not an array"}"#, "42", "\"text\"", "null"] {
            assert!(normalizer.normalize(raw).unwrap().is_empty(), "input: {}", raw);
        }
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = normalizer().normalize("{not json");
        assert!(matches!(result, Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn test_parse_shape() {
        let shape = RawShape::parse(r#"{"tabs":[{}]}"#).unwrap();
        assert!(matches!(shape, RawShape::Tabbed(tabs) if tabs.len() == 1));
        assert!(matches!(RawShape::parse("{"), Err(ParseError::InvalidJson(_))));
    }

    #[test]
    fn test_detect_shape() {
        assert!(matches!(RawShape::detect(serde_json::json!({"tabs": []})), RawShape::Tabbed(_)));
        assert!(matches!(RawShape::detect(serde_json::json!([])), RawShape::FlatTimeline(_)));
        assert_eq!(RawShape::detect(serde_json::json!({"x": 1})), RawShape::Unrecognized);
    }
}
