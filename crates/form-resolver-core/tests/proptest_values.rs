// crates/form-resolver-core/tests/proptest_values.rs
// ============================================================================
// Module: Value Resolution Property Tests
// Description: Property-based checks for value and date resolution.
// Purpose: Exercise dirty precedence and secret masking over arbitrary input.
// Dependencies: form-resolver-core, proptest, serde_json, time
// ============================================================================

//! Property-based tests for field value resolution.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeSet;

use form_resolver_core::ENCRYPT_SENTINEL;
use form_resolver_core::Field;
use form_resolver_core::FieldMeta;
use form_resolver_core::InputMeta;
use form_resolver_core::Record;
use form_resolver_core::runtime::format_timestamp;
use form_resolver_core::runtime::resolve_value;
use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;
use time::Date;
use time::Month;
use time::PrimitiveDateTime;
use time::Time;

fn text_field(name: &str) -> Field {
    Field::new(name, FieldMeta::Input(InputMeta::with_content("text")))
}

proptest! {
    #[test]
    fn dirty_values_survive_resolution(pending in "[a-z ]{1,24}", stored in "[a-z ]{1,24}") {
        let field = text_field("title").with_value(json!(pending.clone()));
        let record = Record::new().with("title", json!(stored));
        let dirty = BTreeSet::from(["title".to_string()]);

        let value = resolve_value(&field, &dirty, &record).unwrap();
        prop_assert_eq!(value, Some(Value::String(pending)));
    }

    #[test]
    fn clean_values_come_from_the_record(pending in "[a-z ]{1,24}", stored in "[a-z ]{1,24}") {
        let field = text_field("title").with_value(json!(pending));
        let record = Record::new().with("title", json!(stored.clone()));

        let value = resolve_value(&field, &BTreeSet::new(), &record).unwrap();
        prop_assert_eq!(value, Some(Value::String(stored)));
    }

    #[test]
    fn encrypted_values_never_leak(secret in "[ -~]{1,32}") {
        let field = Field::new("password", FieldMeta::Input(InputMeta::with_content("encrypt")));
        let record = Record::new().with("password", json!(secret));

        let value = resolve_value(&field, &BTreeSet::new(), &record).unwrap();
        prop_assert_eq!(value, Some(json!(ENCRYPT_SENTINEL)));
    }

    #[test]
    fn default_date_format_matches_iso_dates(
        year in 1970i32..2100,
        month in 1u8..=12,
        day in 1u8..=28,
        hour in 0u8..24,
        minute in 0u8..60,
    ) {
        let month = Month::try_from(month).unwrap();
        let date = Date::from_calendar_date(year, month, day).unwrap();
        let time = Time::from_hms(hour, minute, 0).unwrap();
        let timestamp = PrimitiveDateTime::new(date, time);

        let formatted = format_timestamp(timestamp, "Y-m-d").unwrap();
        prop_assert_eq!(formatted, date.to_string());
    }
}
