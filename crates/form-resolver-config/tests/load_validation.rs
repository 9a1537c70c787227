//! Config load validation tests for form-resolver-config.
// crates/form-resolver-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards and parsed values.
// Purpose: Ensure config input handling is strict and defaults are applied.
// =============================================================================

use std::io::Write;
use std::path::Path;

use form_resolver_config::ConfigError;
use form_resolver_config::DividerPlacement;
use form_resolver_config::FormsConfig;
use form_resolver_core::ConfigStore;
use serde_json::json;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<FormsConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

fn write_config(content: &str) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(content.as_bytes()).map_err(|err| err.to_string())?;
    Ok(file)
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_invalid(FormsConfig::load(Some(path)), "config path exceeds max length")?;
    Ok(())
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_invalid(FormsConfig::load(Some(path)), "config path component too long")?;
    Ok(())
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'a'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(FormsConfig::load(Some(file.path())), "config file exceeds size limit")?;
    Ok(())
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(FormsConfig::load(Some(file.path())), "config file must be utf-8")?;
    Ok(())
}

#[test]
fn load_rejects_missing_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(FormsConfig::load(Some(&path)), "config io error")?;
    Ok(())
}

#[test]
fn load_rejects_unknown_divider_placement() -> TestResult {
    let file = write_config("divider_title_placement = \"top\"\n")?;
    assert_invalid(FormsConfig::load(Some(file.path())), "config parse error")?;
    Ok(())
}

#[test]
fn load_rejects_unknown_button_actions() -> TestResult {
    let file = write_config("[buttons.archive]\nlabel = \"Archive\"\n")?;
    assert_invalid(FormsConfig::load(Some(file.path())), "buttons.archive is not a recognized action")?;
    Ok(())
}

#[test]
fn load_rejects_blank_placeholder() -> TestResult {
    let file = write_config("select_placeholder = \"   \"\n")?;
    assert_invalid(FormsConfig::load(Some(file.path())), "select_placeholder must be non-empty")?;
    Ok(())
}

#[test]
fn load_rejects_untranslatable_alt_date_format() -> TestResult {
    let file = write_config("alt_date_format = \"jS F Y\"\n")?;
    assert_invalid(FormsConfig::load(Some(file.path())), "unsupported format letter `S`")?;
    Ok(())
}

#[test]
fn empty_file_loads_defaults() -> TestResult {
    let file = write_config("")?;
    let config = FormsConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config != FormsConfig::default() {
        return Err("empty config should equal defaults".to_string());
    }
    Ok(())
}

#[test]
fn configured_values_are_served_to_the_builder() -> TestResult {
    let file = write_config(
        r#"
authorize = false
divider_title_placement = "left"
labels = false
select_placeholder = "Pick"
alt_date_format = "m/d/Y"
wysiwyg_api_key = "tiny-key"

[buttons.update]
label = "Apply"
class = "is-warning"
"#,
    )?;
    let config = FormsConfig::load(Some(file.path())).map_err(|err| err.to_string())?;

    if config.divider_title_placement != DividerPlacement::Left {
        return Err("divider placement not parsed".to_string());
    }
    let checks = [
        ("authorize", json!(false)),
        ("dividerTitlePlacement", json!("left")),
        ("labels", json!(false)),
        ("selectPlaceholder", json!("Pick")),
        ("altDateFormat", json!("m/d/Y")),
        ("wysiwygApiKey", json!("tiny-key")),
        ("buttons.update", json!({"label": "Apply", "class": "is-warning"})),
    ];
    for (key, expected) in checks {
        if config.get(key).as_ref() != Some(&expected) {
            return Err(format!("expected {expected} under {key}"));
        }
    }
    if config.get("buttons.back").is_some() {
        return Err("configured buttons should replace the defaults".to_string());
    }
    Ok(())
}

#[test]
fn load_or_default_prefers_explicit_paths() -> TestResult {
    let file = write_config("labels = false\n")?;
    let config = FormsConfig::load_or_default(Some(file.path())).map_err(|err| err.to_string())?;
    if config.labels {
        return Err("explicit config should be loaded".to_string());
    }
    Ok(())
}
