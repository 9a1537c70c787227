// crates/form-resolver-core/src/interfaces/mod.rs
// ============================================================================
// Module: Form Resolver Interfaces
// Description: Contracts for records, authorization, routing, config, options.
// Purpose: Define the collaborator surfaces used by the template builder.
// Dependencies: crate::core, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The builder never reaches for ambient state. Everything it reads from the
//! outside world arrives through the traits in this module: the bound record,
//! the authorization oracle, the route resolver, the configuration store, and
//! the option-provider registry. All calls are synchronous.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use thiserror::Error;

use crate::core::Attributes;
use crate::core::RecordValue;

// ============================================================================
// SECTION: Bound Record
// ============================================================================

/// Separator between segments of a nested attribute path.
pub const PATH_SEPARATOR: char = '.';

/// Entity a template's values are derived from.
pub trait BoundRecord {
    /// Reads a single attribute by name.
    fn attribute(&self, name: &str) -> Option<RecordValue>;

    /// Reads a possibly dotted attribute path.
    ///
    /// Missing intermediate segments yield `None` instead of failing.
    fn get(&self, path: &str) -> Option<RecordValue> {
        let mut segments = path.split(PATH_SEPARATOR);
        let first = segments.next()?;
        let mut value = self.attribute(first)?;
        for segment in segments {
            value = value.descend(segment)?;
        }
        Some(value)
    }
}

// ============================================================================
// SECTION: Authorization
// ============================================================================

/// Answers whether the current actor may access a named route.
///
/// Implementations are bound to a single actor when constructed.
pub trait AccessOracle {
    /// Returns true when the actor may access `route`.
    fn can_access(&self, route: &str) -> bool;
}

// ============================================================================
// SECTION: Routing
// ============================================================================

/// Route resolution errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No route is registered under the name.
    #[error("route not defined: {0}")]
    NotFound(String),
    /// A required route parameter was not supplied.
    #[error("missing parameter `{parameter}` for route {route}")]
    MissingParameter {
        /// Route name.
        route: String,
        /// Parameter name.
        parameter: String,
    },
    /// A parameter value cannot be rendered into a URL.
    #[error("parameter `{parameter}` for route {route} must be a scalar")]
    InvalidParameter {
        /// Route name.
        route: String,
        /// Parameter name.
        parameter: String,
    },
}

/// Maps symbolic route names to paths.
pub trait RouteResolver {
    /// Resolves `route` with `params`.
    ///
    /// When `relative` is true the result is a path without scheme or host.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] when the route is unknown or its parameters are
    /// incomplete.
    fn resolve(&self, route: &str, params: &Attributes, relative: bool)
    -> Result<String, RouteError>;
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration keys read by the builder.
pub mod config_keys {
    /// Default `authorize` flag.
    pub const AUTHORIZE: &str = "authorize";
    /// Default divider title placement.
    pub const DIVIDER_TITLE_PLACEMENT: &str = "dividerTitlePlacement";
    /// Default `labels` flag.
    pub const LABELS: &str = "labels";
    /// Select placeholder caption.
    pub const SELECT_PLACEHOLDER: &str = "selectPlaceholder";
    /// Date picker display format.
    pub const ALT_DATE_FORMAT: &str = "altDateFormat";
    /// Rich text editor API key.
    pub const WYSIWYG_API_KEY: &str = "wysiwygApiKey";
    /// Prefix of per-action button configuration (`buttons.{action}`).
    pub const BUTTONS_PREFIX: &str = "buttons.";
}

/// Read-only, process-wide configuration.
pub trait ConfigStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;

    /// Returns the string stored under `key`, if any.
    fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the boolean stored under `key`, if any.
    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }
}

// ============================================================================
// SECTION: Option Providers
// ============================================================================

/// Option provider errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// No provider is registered under the name.
    #[error("option provider not found: {0}")]
    NotFound(String),
    /// A provider is already registered under the name.
    #[error("option provider already registered: {0}")]
    Duplicate(String),
    /// The provider failed to list its options.
    #[error("option provider {name} failed: {reason}")]
    Failed {
        /// Provider name.
        name: String,
        /// Failure description.
        reason: String,
    },
}

/// Supplies the options of a select field.
pub trait OptionProvider {
    /// Lists the selectable options.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the options cannot be produced.
    fn list_options(&self) -> Result<Vec<Value>, ProviderError>;
}

/// Registry resolving option providers by name.
pub trait OptionProviders {
    /// Resolves the provider registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotFound`] when no provider matches.
    fn resolve(&self, name: &str) -> Result<&dyn OptionProvider, ProviderError>;
}
