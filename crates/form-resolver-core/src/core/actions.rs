// crates/form-resolver-core/src/core/actions.rs
// ============================================================================
// Module: Template Actions
// Description: Recognized action names and action-set validation.
// Purpose: Reject templates that declare actions the builder cannot route.
// Dependencies: crate::core::template, thiserror
// ============================================================================

//! ## Overview
//! Templates declare actions by name. The recognized universe is the union of
//! the names legal on create-style forms and on update-style forms. The
//! [`ActionsValidator`] is a read-only check run before building.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::template::Template;

// ============================================================================
// SECTION: Action Names
// ============================================================================

/// Action names legal on create-style templates.
pub const CREATE_ACTIONS: &[&str] = &["back", "store"];

/// Action names legal on update-style templates.
pub const UPDATE_ACTIONS: &[&str] = &["back", "create", "show", "update", "destroy"];

/// Actions whose target is a route name handed to the consumer's router.
pub const LOCAL_ACTIONS: &[&str] = &["create", "show", "back"];

/// Action that is never forbidden.
pub const BACK_ACTION: &str = "back";

/// Returns the recognized action names, deduplicated, in declaration order.
#[must_use]
pub fn recognized_actions() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::with_capacity(CREATE_ACTIONS.len() + UPDATE_ACTIONS.len());
    for name in CREATE_ACTIONS.iter().chain(UPDATE_ACTIONS) {
        if !names.contains(name) {
            names.push(name);
        }
    }
    names
}

/// Returns true when the action name belongs to the recognized universe.
#[must_use]
pub fn is_recognized_action(name: &str) -> bool {
    CREATE_ACTIONS.contains(&name) || UPDATE_ACTIONS.contains(&name)
}

/// Returns true when the action targets a route rather than a path.
#[must_use]
pub fn is_local_action(name: &str) -> bool {
    LOCAL_ACTIONS.contains(&name)
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Template definition errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template declares actions outside the recognized universe.
    #[error("unknown action(s) provided: {unknown}; allowed actions are: {allowed}")]
    UnknownActions {
        /// Comma-separated unknown action names.
        unknown: String,
        /// Comma-separated recognized action names.
        allowed: String,
    },
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Checks a template's declared actions against the recognized universe.
pub struct ActionsValidator<'a> {
    /// Template under inspection.
    template: &'a Template,
}

impl<'a> ActionsValidator<'a> {
    /// Creates a validator for the given template.
    #[must_use]
    pub const fn new(template: &'a Template) -> Self {
        Self {
            template,
        }
    }

    /// Validates the declared action names.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnknownActions`] listing every unknown name
    /// alongside the allowed names.
    pub fn validate(&self) -> Result<(), TemplateError> {
        let mut unknown: Vec<&str> = Vec::new();
        for action in &self.template.actions {
            if !is_recognized_action(action) && !unknown.contains(&action.as_str()) {
                unknown.push(action);
            }
        }
        if unknown.is_empty() {
            return Ok(());
        }
        Err(TemplateError::UnknownActions {
            unknown: unknown.join(", "),
            allowed: recognized_actions().join(", "),
        })
    }
}

impl Template {
    /// Validates the declared action names.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::UnknownActions`] when any name is unknown.
    pub fn validate_actions(&self) -> Result<(), TemplateError> {
        ActionsValidator::new(self).validate()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_actions_are_deduplicated_in_order() {
        assert_eq!(recognized_actions(), vec!["back", "store", "create", "show", "update", "destroy"]);
    }

    #[test]
    fn local_actions_are_recognized() {
        assert!(LOCAL_ACTIONS.iter().all(|name| is_recognized_action(name)));
        assert!(is_local_action("show"));
        assert!(!is_local_action("update"));
    }
}
