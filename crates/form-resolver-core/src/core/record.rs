// crates/form-resolver-core/src/core/record.rs
// ============================================================================
// Module: Bound Record Values
// Description: Attribute values returned by bound records.
// Purpose: Distinguish timestamps and nested records from plain JSON data.
// Dependencies: crate::runtime::date_format, serde_json, time
// ============================================================================

//! ## Overview
//! Bound records expose attributes as [`RecordValue`]s. Timestamps and nested
//! records stay typed so the builder can format dates and project select keys;
//! everything else is plain JSON. [`Record`] is an in-memory implementation of
//! [`crate::interfaces::BoundRecord`] suitable for hosts and tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;
use time::PrimitiveDateTime;

use crate::interfaces::BoundRecord;
use crate::runtime::date_format::format_timestamp;

// ============================================================================
// SECTION: Record Values
// ============================================================================

/// Pattern used when a timestamp is rendered outside a date picker.
const TIMESTAMP_JSON_FORMAT: &str = "Y-m-d H:i:s";

/// Attribute value read from a bound record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// Plain JSON value.
    Json(Value),
    /// Date/time instance.
    Timestamp(PrimitiveDateTime),
    /// Nested related record.
    Record(Record),
    /// Collection of related records.
    Records(Vec<Record>),
}

impl RecordValue {
    /// Returns true for JSON `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Json(Value::Null))
    }

    /// Reads one path segment below this value.
    ///
    /// Records are read by attribute, record collections and JSON arrays by
    /// numeric index, JSON objects by key. Anything else yields `None`.
    #[must_use]
    pub fn descend(&self, segment: &str) -> Option<Self> {
        match self {
            Self::Record(record) => record.attribute(segment),
            Self::Records(records) => {
                let index = segment.parse::<usize>().ok()?;
                records.get(index).cloned().map(Self::Record)
            }
            Self::Json(Value::Object(map)) => map.get(segment).cloned().map(Self::Json),
            Self::Json(Value::Array(items)) => {
                let index = segment.parse::<usize>().ok()?;
                items.get(index).cloned().map(Self::Json)
            }
            Self::Json(_) | Self::Timestamp(_) => None,
        }
    }

    /// Converts the value into JSON.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Timestamp(timestamp) => Value::String(
                format_timestamp(timestamp, TIMESTAMP_JSON_FORMAT)
                    .unwrap_or_else(|_| timestamp.to_string()),
            ),
            Self::Record(record) => record.into_json(),
            Self::Records(records) => {
                Value::Array(records.into_iter().map(Record::into_json).collect())
            }
        }
    }
}

impl From<Value> for RecordValue {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl From<PrimitiveDateTime> for RecordValue {
    fn from(value: PrimitiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Record> for RecordValue {
    fn from(value: Record) -> Self {
        Self::Record(value)
    }
}

impl From<Vec<Record>> for RecordValue {
    fn from(value: Vec<Record>) -> Self {
        Self::Records(value)
    }
}

// ============================================================================
// SECTION: In-Memory Record
// ============================================================================

/// In-memory bound record keyed by attribute name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// Attribute values.
    attributes: BTreeMap<String, RecordValue>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: BTreeMap::new(),
        }
    }

    /// Adds an attribute and returns the record.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RecordValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets an attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RecordValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Builds a record from a JSON object.
    ///
    /// Nested objects become related records and non-empty arrays made only
    /// of objects become record collections; other values stay JSON.
    #[must_use]
    pub fn from_json_object(object: Map<String, Value>) -> Self {
        let attributes = object
            .into_iter()
            .map(|(name, value)| (name, record_value_from_json(value)))
            .collect();
        Self {
            attributes,
        }
    }

    /// Converts the record into a JSON object.
    #[must_use]
    pub fn into_json(self) -> Value {
        Value::Object(
            self.attributes.into_iter().map(|(name, value)| (name, value.into_json())).collect(),
        )
    }
}

/// Classifies a JSON value read from a record document.
fn record_value_from_json(value: Value) -> RecordValue {
    match value {
        Value::Object(object) => RecordValue::Record(Record::from_json_object(object)),
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_object) => {
            RecordValue::Records(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(object) => Some(Record::from_json_object(object)),
                        _ => None,
                    })
                    .collect(),
            )
        }
        other => RecordValue::Json(other),
    }
}

impl BoundRecord for Record {
    fn attribute(&self, name: &str) -> Option<RecordValue> {
        self.attributes.get(name).cloned()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn dotted_lookup_walks_records_and_json() {
        let record = Record::new()
            .with("address", Record::new().with("city", json!("Cluj")))
            .with("meta", json!({"tags": ["a", "b"]}));
        assert_eq!(record.get("address.city"), Some(RecordValue::Json(json!("Cluj"))));
        assert_eq!(record.get("meta.tags.1"), Some(RecordValue::Json(json!("b"))));
        assert_eq!(record.get("address.zip"), None);
        assert_eq!(record.get("missing.city"), None);
    }

    #[test]
    fn json_documents_become_nested_records() {
        let Value::Object(object) = json!({
            "owner": {"id": 4},
            "tags": [{"id": 1}, {"id": 2}],
            "scores": [1, 2],
        }) else {
            return;
        };
        let record = Record::from_json_object(object);
        assert!(matches!(record.attribute("owner"), Some(RecordValue::Record(_))));
        assert!(matches!(record.attribute("tags"), Some(RecordValue::Records(ref items)) if items.len() == 2));
        assert_eq!(record.attribute("scores"), Some(RecordValue::Json(json!([1, 2]))));
    }

    #[test]
    fn timestamps_render_as_strings_in_json() {
        let value = RecordValue::Timestamp(datetime!(2024-03-05 14:07:09));
        assert_eq!(value.into_json(), json!("2024-03-05 14:07:09"));
    }
}
