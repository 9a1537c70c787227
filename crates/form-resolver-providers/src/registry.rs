// crates/form-resolver-providers/src/registry.rs
// ============================================================================
// Module: Option Provider Registry
// Description: Registry for built-in and host-supplied option providers.
// Purpose: Resolve option providers by name.
// Dependencies: form-resolver-core, serde_json, tracing
// ============================================================================

//! ## Overview
//! The registry resolves select option providers by symbolic name. It
//! implements the core [`OptionProviders`] contract so the builder can
//! consume it directly.
//! Names are unique: registering a second provider under a taken name fails.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use form_resolver_core::OptionProvider;
use form_resolver_core::OptionProviders;
use form_resolver_core::ProviderError;
use serde_json::Map;
use serde_json::Value;
use tracing::debug;

use crate::EnumOptions;
use crate::StaticOptions;

// ============================================================================
// SECTION: Option Registry
// ============================================================================

/// Option provider registry keyed by provider name.
#[derive(Default)]
pub struct OptionRegistry {
    /// Provider implementations keyed by name.
    providers: BTreeMap<String, Box<dyn OptionProvider + Send + Sync>>,
}

impl OptionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            providers: BTreeMap::new(),
        }
    }

    /// Builds a registry from a JSON catalog: arrays become [`StaticOptions`]
    /// and objects become [`EnumOptions`].
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Failed`] when an entry is neither an array nor
    /// an object.
    pub fn from_catalog(catalog: &Map<String, Value>) -> Result<Self, ProviderError> {
        let mut registry = Self::new();
        for (name, entry) in catalog {
            match entry {
                Value::Array(options) => {
                    registry.register_provider(name, StaticOptions::new(options.clone()))?;
                }
                Value::Object(entries) => {
                    registry.register_provider(name, EnumOptions::from_json(entries))?;
                }
                _ => {
                    return Err(ProviderError::Failed {
                        name: name.clone(),
                        reason: "catalog entry must be an array or an object".to_string(),
                    });
                }
            }
        }
        Ok(registry)
    }

    /// Registers a provider under the given name.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Duplicate`] when the name is already taken.
    pub fn register_provider(
        &mut self,
        name: impl Into<String>,
        provider: impl OptionProvider + Send + Sync + 'static,
    ) -> Result<(), ProviderError> {
        let name = name.into();
        if self.providers.contains_key(&name) {
            return Err(ProviderError::Duplicate(name));
        }
        debug!(provider = %name, "registered option provider");
        self.providers.insert(name, Box::new(provider));
        Ok(())
    }

    /// Returns the registered provider names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }
}

impl OptionProviders for OptionRegistry {
    fn resolve(&self, name: &str) -> Result<&dyn OptionProvider, ProviderError> {
        let Some(provider) = self.providers.get(name) else {
            return Err(ProviderError::NotFound(name.to_string()));
        };
        Ok(&**provider)
    }
}
