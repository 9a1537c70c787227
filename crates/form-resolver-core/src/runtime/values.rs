// crates/form-resolver-core/src/runtime/values.rs
// ============================================================================
// Module: Field Value Resolution
// Description: Derive field values from the bound record or pending edits.
// Purpose: Apply per-type value rules in a single dispatch.
// Dependencies: crate::{core, interfaces, runtime::date_format}, tracing
// ============================================================================

//! ## Overview
//! A dirty field keeps its pending value; every other field reads its value
//! from the bound record. The base value then goes through the rule of the
//! field's type. Secrets never leave this pass: encrypted inputs only ever
//! carry [`ENCRYPT_SENTINEL`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::trace;
use tracing::warn;

use crate::core::DatepickerMeta;
use crate::core::Field;
use crate::core::FieldMeta;
use crate::core::InputContent;
use crate::core::InputMeta;
use crate::core::Record;
use crate::core::RecordValue;
use crate::core::Section;
use crate::core::SelectMeta;
use crate::interfaces::BoundRecord;
use crate::runtime::builder::BuildError;
use crate::runtime::date_format::DEFAULT_DATE_FORMAT;
use crate::runtime::date_format::DateFormatError;
use crate::runtime::date_format::format_timestamp;
use crate::runtime::date_format::parse_timestamp;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Marker replacing a stored secret.
pub const ENCRYPT_SENTINEL: &str = "**********";

// ============================================================================
// SECTION: Value Pass
// ============================================================================

/// Resolves the value of every field in place.
pub(crate) fn resolve_values(
    sections: &mut [Section],
    dirty: &BTreeSet<String>,
    record: &dyn BoundRecord,
) -> Result<(), BuildError> {
    for field in sections.iter_mut().flat_map(|section| section.fields.iter_mut()) {
        field.value = resolve_value(field, dirty, record)?;
    }
    Ok(())
}

/// Computes the resolved value of one field.
///
/// # Errors
///
/// Returns [`BuildError::DateFormat`] when a date picker format is invalid.
pub fn resolve_value(
    field: &Field,
    dirty: &BTreeSet<String>,
    record: &dyn BoundRecord,
) -> Result<Option<Value>, BuildError> {
    let is_dirty = dirty.contains(&field.name);
    let base = if is_dirty {
        field.value.clone().map(RecordValue::Json)
    } else {
        record.get(&field.name)
    };
    trace!(field = %field.name, kind = field.meta.kind(), dirty = is_dirty, "resolving field value");

    let value = match &field.meta {
        FieldMeta::Input(meta) => input_value(base, meta),
        FieldMeta::Datepicker(meta) => {
            let base = if is_dirty { base } else { base.map(stored_timestamp) };
            date_value(base, meta).map_err(|source| BuildError::DateFormat {
                field: field.name.clone(),
                source,
            })?
        }
        FieldMeta::Select(meta) => select_value(&field.name, base, meta),
        FieldMeta::Wysiwyg(_) | FieldMeta::Other(_) => base.map(RecordValue::into_json),
    };
    Ok(value.filter(|value| !value.is_null()))
}

// ============================================================================
// SECTION: Type Rules
// ============================================================================

/// Applies the input content rule.
fn input_value(base: Option<RecordValue>, meta: &InputMeta) -> Option<Value> {
    let value = base.map(RecordValue::into_json).filter(|value| !value.is_null());
    match meta.content_kind() {
        InputContent::Text => Some(value.unwrap_or_else(|| Value::String(String::new()))),
        InputContent::Encrypt => value.map(|_| Value::String(ENCRYPT_SENTINEL.to_string())),
        InputContent::Other(_) | InputContent::Unspecified => value,
    }
}

/// Formats timestamps with the field's format.
fn date_value(
    base: Option<RecordValue>,
    meta: &DatepickerMeta,
) -> Result<Option<Value>, DateFormatError> {
    match base {
        Some(RecordValue::Timestamp(timestamp)) => {
            let pattern = meta.format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
            format_timestamp(timestamp, pattern).map(|text| Some(Value::String(text)))
        }
        other => Ok(other.map(RecordValue::into_json)),
    }
}

/// Reads an ISO date string from the record as a timestamp.
fn stored_timestamp(value: RecordValue) -> RecordValue {
    match value {
        RecordValue::Json(Value::String(text)) => match parse_timestamp(&text) {
            Some(timestamp) => RecordValue::Timestamp(timestamp),
            None => RecordValue::Json(Value::String(text)),
        },
        other => other,
    }
}

/// Projects related records onto their tracked attribute.
fn select_value(name: &str, base: Option<RecordValue>, meta: &SelectMeta) -> Option<Value> {
    if meta.objects.unwrap_or(false) {
        return base.map(RecordValue::into_json);
    }
    let track_by = meta.track_by_or_default();

    if meta.multiple.unwrap_or(false) {
        return match base {
            Some(RecordValue::Records(records)) => Some(Value::Array(
                records.iter().map(|record| tracked_value(record, track_by)).collect(),
            )),
            Some(RecordValue::Record(record)) => {
                warn!(field = name, "multiple select bound to a single record; passing through");
                Some(record.into_json())
            }
            other => other.map(RecordValue::into_json),
        };
    }

    match base {
        Some(RecordValue::Record(record)) => Some(tracked_value(&record, track_by)),
        Some(RecordValue::Records(records)) => {
            warn!(field = name, "single select bound to a record collection; passing through");
            Some(RecordValue::Records(records).into_json())
        }
        other => other.map(RecordValue::into_json),
    }
}

/// Reads the tracked attribute of a related record.
fn tracked_value(record: &Record, track_by: &str) -> Value {
    record.attribute(track_by).map_or(Value::Null, RecordValue::into_json)
}
