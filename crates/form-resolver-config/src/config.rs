// crates/form-resolver-config/src/config.rs
// ============================================================================
// Module: Forms Configuration
// Description: Configuration loading and validation for form resolution.
// Purpose: Provide strict config parsing with hard limits and builder access.
// Dependencies: form-resolver-core, serde, serde_json, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits
//! and validated before use. Every key has a default, so an empty file is a
//! valid configuration. [`FormsConfig`] implements [`ConfigStore`] under the
//! camelCase keys the builder reads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use form_resolver_core::ConfigStore;
use form_resolver_core::config_keys;
use form_resolver_core::is_recognized_action;
use form_resolver_core::runtime::validate_pattern;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "form-resolver.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "FORM_RESOLVER_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a button caption.
pub(crate) const MAX_BUTTON_LABEL_LENGTH: usize = 128;
/// Maximum length of the select placeholder.
pub(crate) const MAX_PLACEHOLDER_LENGTH: usize = 256;

// ============================================================================
// SECTION: Configuration Model
// ============================================================================

/// Placement of section divider titles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerPlacement {
    /// Title aligned left.
    Left,
    /// Title centered.
    #[default]
    Center,
    /// Title aligned right.
    Right,
}

impl DividerPlacement {
    /// Returns the wire name of the placement.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Rendering defaults for one action button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonConfig {
    /// Button caption.
    pub label: String,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Optional CSS class list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl ButtonConfig {
    /// Builds a button with a caption, icon, and class.
    fn styled(label: &str, icon: &str, class: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: Some(icon.to_string()),
            class: Some(class.to_string()),
        }
    }
}

/// Process-wide forms configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsConfig {
    /// Whether actions are checked against the access oracle by default.
    #[serde(default = "default_authorize")]
    pub authorize: bool,
    /// Default divider title placement.
    #[serde(default)]
    pub divider_title_placement: DividerPlacement,
    /// Whether field labels are shown by default.
    #[serde(default = "default_labels")]
    pub labels: bool,
    /// Default placeholder for select fields.
    #[serde(default = "default_select_placeholder")]
    pub select_placeholder: String,
    /// Default display format for date pickers.
    #[serde(default = "default_alt_date_format")]
    pub alt_date_format: String,
    /// Rich-text editor API key.
    #[serde(default)]
    pub wysiwyg_api_key: Option<String>,
    /// Button defaults keyed by action name; a configured table replaces the
    /// defaults entirely.
    #[serde(default = "default_buttons")]
    pub buttons: BTreeMap<String, ButtonConfig>,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            authorize: default_authorize(),
            divider_title_placement: DividerPlacement::default(),
            labels: default_labels(),
            select_placeholder: default_select_placeholder(),
            alt_date_format: default_alt_date_format(),
            wysiwyg_api_key: None,
            buttons: default_buttons(),
        }
    }
}

impl FormsConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration when a source is available, falling back to
    /// defaults when no path is given, the environment override is unset, and
    /// the default file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an available source fails to load.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if path.is_none()
            && env::var_os(CONFIG_ENV_VAR).is_none()
            && !Path::new(DEFAULT_CONFIG_NAME).exists()
        {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let placeholder = self.select_placeholder.trim();
        if placeholder.is_empty() {
            return Err(ConfigError::Invalid("select_placeholder must be non-empty".to_string()));
        }
        if placeholder.len() > MAX_PLACEHOLDER_LENGTH {
            return Err(ConfigError::Invalid("select_placeholder exceeds max length".to_string()));
        }
        if self.alt_date_format.trim().is_empty() {
            return Err(ConfigError::Invalid("alt_date_format must be non-empty".to_string()));
        }
        validate_pattern(&self.alt_date_format)
            .map_err(|err| ConfigError::Invalid(format!("alt_date_format: {err}")))?;
        if let Some(key) = &self.wysiwyg_api_key
            && key.trim().is_empty()
        {
            return Err(ConfigError::Invalid("wysiwyg_api_key must be non-empty".to_string()));
        }
        for (action, button) in &self.buttons {
            validate_button(action, button)?;
        }
        Ok(())
    }
}

impl ConfigStore for FormsConfig {
    fn get(&self, key: &str) -> Option<Value> {
        if let Some(action) = key.strip_prefix(config_keys::BUTTONS_PREFIX) {
            return self.buttons.get(action).and_then(|button| serde_json::to_value(button).ok());
        }
        match key {
            config_keys::AUTHORIZE => Some(Value::Bool(self.authorize)),
            config_keys::DIVIDER_TITLE_PLACEMENT => {
                Some(Value::String(self.divider_title_placement.as_str().to_string()))
            }
            config_keys::LABELS => Some(Value::Bool(self.labels)),
            config_keys::SELECT_PLACEHOLDER => Some(Value::String(self.select_placeholder.clone())),
            config_keys::ALT_DATE_FORMAT => Some(Value::String(self.alt_date_format.clone())),
            config_keys::WYSIWYG_API_KEY => self.wysiwyg_api_key.clone().map(Value::String),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates one configured button.
fn validate_button(action: &str, button: &ButtonConfig) -> Result<(), ConfigError> {
    if !is_recognized_action(action) {
        return Err(ConfigError::Invalid(format!("buttons.{action} is not a recognized action")));
    }
    let label = button.label.trim();
    if label.is_empty() {
        return Err(ConfigError::Invalid(format!("buttons.{action}.label must be non-empty")));
    }
    if label.len() > MAX_BUTTON_LABEL_LENGTH {
        return Err(ConfigError::Invalid(format!("buttons.{action}.label exceeds max length")));
    }
    Ok(())
}

/// Default authorization flag.
pub(crate) const fn default_authorize() -> bool {
    true
}

/// Default label visibility.
pub(crate) const fn default_labels() -> bool {
    true
}

/// Default select placeholder.
pub(crate) fn default_select_placeholder() -> String {
    "Choose".to_string()
}

/// Default date picker display format.
pub(crate) fn default_alt_date_format() -> String {
    "d-m-Y".to_string()
}

/// Default button table.
pub(crate) fn default_buttons() -> BTreeMap<String, ButtonConfig> {
    [
        ("back", ButtonConfig::styled("Back", "arrow-left", "is-active")),
        ("create", ButtonConfig::styled("Create", "plus", "is-info")),
        ("show", ButtonConfig::styled("Show", "eye", "is-info")),
        ("store", ButtonConfig::styled("Save", "check", "is-success")),
        ("update", ButtonConfig::styled("Save", "check", "is-success")),
        ("destroy", ButtonConfig::styled("Delete", "trash-alt", "is-danger")),
    ]
    .into_iter()
    .map(|(action, button)| (action.to_string(), button))
    .collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::use_debug,
        reason = "Test-only assertions and helpers are permitted."
    )]

    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_are_exposed_under_builder_keys() {
        let config = FormsConfig::default();
        assert_eq!(config.get_bool(config_keys::AUTHORIZE), Some(true));
        assert_eq!(config.get_bool(config_keys::LABELS), Some(true));
        assert_eq!(config.get_str(config_keys::DIVIDER_TITLE_PLACEMENT).as_deref(), Some("center"));
        assert_eq!(config.get_str(config_keys::SELECT_PLACEHOLDER).as_deref(), Some("Choose"));
        assert_eq!(config.get_str(config_keys::ALT_DATE_FORMAT).as_deref(), Some("d-m-Y"));
        assert_eq!(config.get(config_keys::WYSIWYG_API_KEY), None);
        assert_eq!(config.get("unknown"), None);
    }

    #[test]
    fn buttons_are_served_as_json() {
        let config = FormsConfig::default();
        assert_eq!(
            config.get("buttons.destroy"),
            Some(json!({"label": "Delete", "icon": "trash-alt", "class": "is-danger"}))
        );
        assert_eq!(config.get("buttons.archive"), None);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(FormsConfig::default().validate().is_ok());
    }

    #[test]
    fn unrecognized_button_actions_are_rejected() {
        let mut config = FormsConfig::default();
        config.buttons.insert("archive".to_string(), ButtonConfig {
            label: "Archive".to_string(),
            icon: None,
            class: None,
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("buttons.archive is not a recognized action"));
    }

    #[test]
    fn blank_button_labels_are_rejected() {
        let mut config = FormsConfig::default();
        config.buttons.insert("back".to_string(), ButtonConfig {
            label: "  ".to_string(),
            icon: None,
            class: None,
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("buttons.back.label must be non-empty"));
    }
}
