// crates/form-resolver-providers/src/static_options.rs
// ============================================================================
// Module: Static Option Providers
// Description: Option providers backed by in-memory data.
// Purpose: Serve fixed option lists and key/label enumerations.
// Dependencies: form-resolver-core, serde_json
// ============================================================================

//! ## Overview
//! [`StaticOptions`] returns a fixed list verbatim. [`EnumOptions`] turns a
//! key/label enumeration into `{ id, name }` objects, the shape select fields
//! track by default. Integer keys become numeric ids.

// ============================================================================
// SECTION: Imports
// ============================================================================

use form_resolver_core::DEFAULT_LABEL;
use form_resolver_core::DEFAULT_TRACK_BY;
use form_resolver_core::OptionProvider;
use form_resolver_core::ProviderError;
use serde_json::Map;
use serde_json::Value;

// ============================================================================
// SECTION: Static Options
// ============================================================================

/// Provider returning a fixed list of options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticOptions {
    /// Options returned on every call.
    options: Vec<Value>,
}

impl StaticOptions {
    /// Creates a provider over the given options.
    #[must_use]
    pub const fn new(options: Vec<Value>) -> Self {
        Self {
            options,
        }
    }
}

impl OptionProvider for StaticOptions {
    fn list_options(&self) -> Result<Vec<Value>, ProviderError> {
        Ok(self.options.clone())
    }
}

// ============================================================================
// SECTION: Enum Options
// ============================================================================

/// Provider turning a key/label enumeration into option objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumOptions {
    /// Ordered `(key, label)` pairs.
    entries: Vec<(String, String)>,
}

impl EnumOptions {
    /// Creates a provider from ordered key/label pairs.
    #[must_use]
    pub fn new<I, K, L>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, L)>,
        K: Into<String>,
        L: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(|(key, label)| (key.into(), label.into())).collect(),
        }
    }

    /// Creates a provider from a JSON object; non-string labels are rendered
    /// as JSON text.
    #[must_use]
    pub fn from_json(object: &Map<String, Value>) -> Self {
        Self::new(object.iter().map(|(key, label)| {
            let label = match label {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (key.clone(), label)
        }))
    }
}

impl OptionProvider for EnumOptions {
    fn list_options(&self) -> Result<Vec<Value>, ProviderError> {
        Ok(self
            .entries
            .iter()
            .map(|(key, label)| {
                let mut option = Map::new();
                option.insert(DEFAULT_TRACK_BY.to_string(), option_id(key));
                option.insert(DEFAULT_LABEL.to_string(), Value::String(label.clone()));
                Value::Object(option)
            })
            .collect())
    }
}

/// Converts an enumeration key into an option id; only canonical integers
/// become numbers.
fn option_id(key: &str) -> Value {
    match key.parse::<i64>() {
        Ok(number) if number.to_string() == key => Value::from(number),
        _ => Value::String(key.to_string()),
    }
}
