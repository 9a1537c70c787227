// crates/form-resolver-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and input loading.
// Purpose: Ensure bounded reads fail closed and inputs load into core types.
// Dependencies: form-resolver-cli main helpers, form-resolver-core, tempfile
// ============================================================================

//! ## Overview
//! Validates argument parsing, `read_bytes_with_limit` size enforcement, and
//! the record, catalog, and route loaders used by `resolve`.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;

use clap::Parser;
use form_resolver_config::FormsConfig;
use form_resolver_core::AllowAll;
use form_resolver_core::BoundRecord;
use form_resolver_core::BuildContext;
use form_resolver_core::Builder;
use form_resolver_core::OptionProviders;
use form_resolver_core::RouteResolver;
use form_resolver_core::RouteTable;
use form_resolver_providers::OptionRegistry;
use serde_json::json;
use tempfile::NamedTempFile;

use super::Cli;
use super::Commands;
use super::ReadLimitError;
use super::load_catalog;
use super::load_record;
use super::load_template;
use super::read_bytes_with_limit;
use super::read_json;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn temp_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn resolve_arguments_collect_repeated_flags() {
    let cli = Cli::try_parse_from([
        "form-resolver",
        "resolve",
        "--template",
        "form.json",
        "--dirty",
        "title",
        "--dirty",
        "body",
        "--deny",
        "users.update",
        "--compact",
    ])
    .unwrap();
    let Commands::Resolve(command) = cli.command else {
        panic!("expected resolve command");
    };
    assert_eq!(command.dirty, vec!["title", "body"]);
    assert_eq!(command.deny, vec!["users.update"]);
    assert!(command.compact);
    assert!(command.record.is_none());
}

#[test]
fn validate_requires_a_template() {
    assert!(Cli::try_parse_from(["form-resolver", "validate"]).is_err());
}

#[test]
fn read_bytes_with_limit_rejects_oversized_files() {
    let file = temp_file(&[b'a'; 32]);
    match read_bytes_with_limit(file.path(), 16) {
        Err(ReadLimitError::TooLarge {
            size,
            limit,
        }) => {
            assert_eq!(size, 32);
            assert_eq!(limit, 16);
        }
        other => panic!("expected size failure, got {other:?}"),
    }
}

#[test]
fn read_bytes_with_limit_accepts_files_at_limit() {
    let file = temp_file(&[b'a'; 16]);
    let bytes = read_bytes_with_limit(file.path(), 16).unwrap();
    assert_eq!(bytes.len(), 16);
}

#[test]
fn read_json_reports_parse_failures() {
    let file = temp_file(b"{ not json");
    let err = read_json::<serde_json::Value>(file.path(), "record").unwrap_err();
    assert!(err.to_string().contains("failed to parse record"));
}

#[test]
fn load_template_rejects_malformed_metadata() {
    let file = temp_file(br#"{"sections": [{"fields": [{"name": "a", "meta": {}}]}], "actions": []}"#);
    assert!(load_template(file.path()).is_err());
}

#[test]
fn load_record_builds_nested_records() {
    let file = temp_file(br#"{"title": "Hello", "owner": {"id": 7}}"#);
    let record = load_record(file.path()).unwrap();
    assert_eq!(record.get("title").map(|value| value.into_json()), Some(json!("Hello")));
    assert_eq!(record.get("owner.id").map(|value| value.into_json()), Some(json!(7)));
}

#[test]
fn record_file_dates_use_the_datepicker_format() {
    let record_file = temp_file(br#"{"born_on": "1990-07-14"}"#);
    let template_file = temp_file(
        br#"{"sections": [{"columns": 1, "fields": [{"name": "born_on", "label": "Born", "meta": {"type": "datepicker", "format": "d.m.Y"}}]}], "actions": []}"#,
    );
    let record = load_record(record_file.path()).unwrap();
    let template = load_template(template_file.path()).unwrap();
    let config = FormsConfig::default();
    let routes = RouteTable::default();
    let options = OptionRegistry::default();
    let context = BuildContext {
        config: &config,
        access: &AllowAll,
        routes: &routes,
        options: &options,
    };
    let resolved = Builder::new(template, Vec::<String>::new(), Some(&record as &dyn BoundRecord), context)
        .run()
        .unwrap();
    let field = resolved.field("born_on").unwrap();
    assert_eq!(field.value, Some(json!("14.07.1990")));
}

#[test]
fn load_catalog_registers_providers() {
    let file = temp_file(br#"{"roles": [{"id": 1, "name": "Admin"}], "statuses": {"1": "Active"}}"#);
    let registry = load_catalog(file.path()).unwrap();
    let statuses = registry.resolve("statuses").unwrap().list_options().unwrap();
    assert_eq!(statuses, vec![json!({"id": 1, "name": "Active"})]);
    assert!(registry.resolve("roles").is_ok());
}

#[test]
fn route_tables_load_from_json() {
    let file = temp_file(br#"{"baseUrl": "https://app.test", "routes": {"users.update": "/users/{user}"}}"#);
    let routes: RouteTable = read_json(file.path(), "route table").unwrap();
    let params = json!({"user": 3});
    let path = routes.resolve("users.update", params.as_object().unwrap(), true).unwrap();
    assert_eq!(path, "/users/3");
}
