// crates/form-resolver-core/src/runtime/actions.rs
// ============================================================================
// Module: Action Resolution
// Description: Resolve declared action names into action descriptors.
// Purpose: Attach targets, button configuration, and authorization outcomes.
// Dependencies: crate::{core, interfaces, runtime::builder}, tracing
// ============================================================================

//! ## Overview
//! Each action gets a route name, either from the template's explicit
//! `routes` override or synthesized as `{routePrefix}.{action}`. Local actions
//! (`create`, `show`, `back`) target that route name directly; every other
//! action targets the relative path the route resolves to.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::trace;

use crate::core::ActionDescriptor;
use crate::core::ActionTarget;
use crate::core::BACK_ACTION;
use crate::core::ResolvedActions;
use crate::core::Template;
use crate::core::is_local_action;
use crate::interfaces::config_keys;
use crate::runtime::builder::BuildContext;
use crate::runtime::builder::BuildError;

// ============================================================================
// SECTION: Action Pass
// ============================================================================

/// Resolves every declared action.
pub(crate) fn resolve_actions(
    template: &Template,
    context: &BuildContext<'_>,
) -> Result<ResolvedActions, BuildError> {
    let authorize = template.authorize.unwrap_or(false);
    let mut resolved = ResolvedActions::default();

    for action in &template.actions {
        let route = route_name(template, action);
        let target = if is_local_action(action) {
            ActionTarget::Route(route.clone())
        } else {
            let path = context.routes.resolve(&route, &template.route_params, true).map_err(
                |source| BuildError::ActionRoute {
                    action: action.clone(),
                    source,
                },
            )?;
            ActionTarget::Path(path)
        };
        let button = context.config.get(&format!("{}{action}", config_keys::BUTTONS_PREFIX));
        let forbidden = action != BACK_ACTION && authorize && !context.access.can_access(&route);
        trace!(action = %action, route = %route, forbidden, "resolved action");

        resolved.insert(action.clone(), ActionDescriptor {
            button,
            forbidden,
            target,
        });
    }

    Ok(resolved)
}

/// Returns the route name for an action.
#[must_use]
pub fn route_name(template: &Template, action: &str) -> String {
    if let Some(route) = template.routes.as_ref().and_then(|routes| routes.get(action)) {
        return route.clone();
    }
    format!("{}.{action}", template.route_prefix.as_deref().unwrap_or_default())
}
