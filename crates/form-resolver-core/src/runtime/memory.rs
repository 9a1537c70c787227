// crates/form-resolver-core/src/runtime/memory.rs
// ============================================================================
// Module: In-Memory Collaborators
// Description: Static configuration and access oracles.
// Purpose: Provide simple collaborator implementations for hosts and tests.
// Dependencies: crate::interfaces, serde_json
// ============================================================================

//! ## Overview
//! Small, deterministic implementations of the builder's collaborator traits.
//! They hold no interior mutability and can be shared across threads.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde_json::Value;

use crate::core::Attributes;
use crate::interfaces::AccessOracle;
use crate::interfaces::ConfigStore;
use crate::interfaces::PATH_SEPARATOR;

// ============================================================================
// SECTION: Static Configuration
// ============================================================================

/// Configuration backed by a JSON object; dotted keys walk nested objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticConfig {
    /// Configuration document.
    values: Attributes,
}

impl StaticConfig {
    /// Wraps a configuration document.
    #[must_use]
    pub const fn new(values: Attributes) -> Self {
        Self {
            values,
        }
    }

    /// Builds configuration from a JSON value; non-objects yield an empty store.
    #[must_use]
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(values) => Self::new(values),
            _ => Self::default(),
        }
    }
}

impl ConfigStore for StaticConfig {
    fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.values.get(key) {
            return Some(value.clone());
        }
        let mut segments = key.split(PATH_SEPARATOR);
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current.clone())
    }
}

// ============================================================================
// SECTION: Access Oracles
// ============================================================================

/// Grants access to every route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllowAll;

impl AccessOracle for AllowAll {
    fn can_access(&self, _route: &str) -> bool {
        true
    }
}

/// Denies access to an explicit set of routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DenyList {
    /// Denied route names.
    denied: BTreeSet<String>,
}

impl DenyList {
    /// Creates an oracle denying the given routes.
    #[must_use]
    pub fn new<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            denied: routes.into_iter().map(Into::into).collect(),
        }
    }
}

impl AccessOracle for DenyList {
    fn can_access(&self, route: &str) -> bool {
        !self.denied.contains(route)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn static_config_reads_flat_and_dotted_keys() {
        let config = StaticConfig::from_json(json!({
            "labels": false,
            "buttons": {"update": {"label": "Save"}},
        }));
        assert_eq!(config.get_bool("labels"), Some(false));
        assert_eq!(config.get("buttons.update"), Some(json!({"label": "Save"})));
        assert_eq!(config.get("buttons.destroy"), None);
        assert_eq!(config.get_str("labels"), None);
    }

    #[test]
    fn deny_list_blocks_listed_routes_only() {
        let oracle = DenyList::new(["users.destroy"]);
        assert!(!oracle.can_access("users.destroy"));
        assert!(oracle.can_access("users.update"));
        assert!(AllowAll.can_access("anything"));
    }
}
