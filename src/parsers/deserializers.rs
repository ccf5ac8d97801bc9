//! Lenient field deserializers for the on-disk chat shapes.
//!
//! Stored chat blobs come from several editor versions and are not schema-checked. A field with
//! an unexpected type is treated as absent instead of failing the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::Timestamp;

/// Non-empty string, otherwise `None`
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

/// Boolean, otherwise `None`
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_bool())
}

/// Integer or digit-only string (fractional numbers are truncated), otherwise `None`
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => digits_as_i64(&s),
        other => number_as_i64(&other),
    })
}

/// Array of arbitrary values, otherwise `None`
pub fn lenient_array<'de, D>(deserializer: D) -> Result<Option<Vec<Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => Some(items),
        _ => None,
    })
}

/// Bubble `id`: numeric ids are read as epoch milliseconds, strings are kept as opaque keys
pub fn deserialize_bubble_id<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(Timestamp::Opaque(s)),
        other => number_as_i64(&other).map(Timestamp::EpochMillis),
    })
}

fn digits_as_i64(s: &str) -> Option<i64> {
    let digits = s.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Overflowing i64 yields None
    digits.parse().ok()
}

fn number_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "lenient_string")]
        text: Option<String>,
        #[serde(default, deserialize_with = "lenient_bool")]
        flag: Option<bool>,
        #[serde(default, deserialize_with = "lenient_i64")]
        number: Option<i64>,
        #[serde(default, deserialize_with = "lenient_array")]
        items: Option<Vec<Value>>,
        #[serde(default, deserialize_with = "deserialize_bubble_id")]
        id: Option<Timestamp>,
    }

    #[test]
    fn test_well_typed_fields() {
        let fields: Fields = serde_json::from_str(
            r#"{"text":"hi","flag":true,"number":1577836800000,"items":[1,2],"id":7}"#,
        )
        .unwrap();
        assert_eq!(fields.text.as_deref(), Some("hi"));
        assert_eq!(fields.flag, Some(true));
        assert_eq!(fields.number, Some(1_577_836_800_000));
        assert_eq!(fields.items.map(|i| i.len()), Some(2));
        assert_eq!(fields.id, Some(Timestamp::EpochMillis(7)));
    }

    #[test]
    fn test_wrong_types_become_none() {
        let fields: Fields = serde_json::from_str(
            r#"{"text":42,"flag":"yes","number":"soon","items":{"a":1},"id":null}"#,
        )
        .unwrap();
        assert!(fields.text.is_none());
        assert!(fields.flag.is_none());
        assert!(fields.number.is_none());
        assert!(fields.items.is_none());
        assert!(fields.id.is_none());
    }

    #[test]
    fn test_missing_fields_default_to_none() {
        let fields: Fields = serde_json::from_str("{}").unwrap();
        assert!(fields.text.is_none());
        assert!(fields.id.is_none());
    }

    #[test]
    fn test_empty_string_is_none() {
        let fields: Fields = serde_json::from_str(r#"{"text":"","id":""}"#).unwrap();
        assert!(fields.text.is_none());
        assert!(fields.id.is_none());
    }

    #[test]
    fn test_string_bubble_id_is_opaque() {
        let fields: Fields =
            serde_json::from_str(r#"{"id":"3f2a9c1e-0000-4000-8000-000000000000"}"#).unwrap();
        assert_eq!(
            fields.id,
            Some(Timestamp::Opaque("3f2a9c1e-0000-4000-8000-000000000000".to_string()))
        );
    }

    #[test]
    fn test_fractional_number_truncates() {
        let fields: Fields = serde_json::from_str(r#"{"number":1.9}"#).unwrap();
        assert_eq!(fields.number, Some(1));
    }

    #[test]
    fn test_numeric_string_is_read_as_integer() {
        let fields: Fields = serde_json::from_str(r#"{"number":" 1577836800000 "}"#).unwrap();
        assert_eq!(fields.number, Some(1_577_836_800_000));
    }

    #[test]
    fn test_signed_or_mixed_strings_are_none() {
        for raw in [r#"{"number":"-5"}"#, r#"{"number":"12ab"}"#, r#"{"number":"1e3"}"#] {
            let fields: Fields = serde_json::from_str(raw).unwrap();
            assert!(fields.number.is_none(), "{} should not parse", raw);
        }
    }

    #[test]
    fn test_numeric_string_bubble_id_stays_opaque() {
        let fields: Fields = serde_json::from_str(r#"{"id":"1700000000000"}"#).unwrap();
        assert_eq!(fields.id, Some(Timestamp::Opaque("1700000000000".to_string())));
    }
}
