// crates/form-resolver-core/src/runtime/builder.rs
// ============================================================================
// Module: Template Builder
// Description: Orchestrates the resolution passes over a form template.
// Purpose: Turn a parsed template into a resolved template in one call.
// Dependencies: crate::{core, interfaces, runtime}, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`Builder::run`] consumes a [`Template`] and produces a
//! [`ResolvedTemplate`] through ordered passes:
//!
//! 1. configuration defaults (`authorize`, `dividerTitlePlacement`, `labels`);
//! 2. field values, only when a record is bound;
//! 3. action descriptors;
//! 4. field metadata.
//!
//! Later passes read what earlier ones wrote: actions need the defaulted
//! `authorize` flag and encrypted inputs snapshot their masked value. The
//! build-time routing inputs have no place in [`ResolvedTemplate`], so they
//! are dropped when the result is assembled. Any failure aborts the run and
//! no partial template is returned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::debug;

use crate::core::ResolvedActions;
use crate::core::ResolvedTemplate;
use crate::core::Template;
use crate::interfaces::AccessOracle;
use crate::interfaces::BoundRecord;
use crate::interfaces::ConfigStore;
use crate::interfaces::OptionProviders;
use crate::interfaces::ProviderError;
use crate::interfaces::RouteError;
use crate::interfaces::RouteResolver;
use crate::interfaces::config_keys;
use crate::runtime::actions::resolve_actions;
use crate::runtime::date_format::DateFormatError;
use crate::runtime::metadata::compute_metas;
use crate::runtime::values::resolve_values;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Template build errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A select field references an option provider that cannot be used.
    #[error("cannot resolve options for field {field}: {source}")]
    Provider {
        /// Field name.
        field: String,
        /// Provider failure.
        #[source]
        source: ProviderError,
    },
    /// A path-kind action route cannot be resolved.
    #[error("cannot resolve route for action {action}: {source}")]
    ActionRoute {
        /// Action name.
        action: String,
        /// Routing failure.
        #[source]
        source: RouteError,
    },
    /// A select `source` route cannot be resolved.
    #[error("cannot resolve source route for field {field}: {source}")]
    SourceRoute {
        /// Field name.
        field: String,
        /// Routing failure.
        #[source]
        source: RouteError,
    },
    /// A date picker declares a format that cannot be applied.
    #[error("cannot format value of field {field}: {source}")]
    DateFormat {
        /// Field name.
        field: String,
        /// Formatting failure.
        #[source]
        source: DateFormatError,
    },
}

// ============================================================================
// SECTION: Build Context
// ============================================================================

/// Collaborators consulted while building.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    /// Process-wide configuration.
    pub config: &'a dyn ConfigStore,
    /// Authorization oracle bound to the current actor.
    pub access: &'a dyn AccessOracle,
    /// Route resolver.
    pub routes: &'a dyn RouteResolver,
    /// Option-provider registry.
    pub options: &'a dyn OptionProviders,
}

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Resolves one template against an optional bound record.
pub struct Builder<'a> {
    /// Template being resolved.
    template: Template,
    /// Names of fields whose pending value must be kept.
    dirty: BTreeSet<String>,
    /// Record values are derived from.
    record: Option<&'a dyn BoundRecord>,
    /// Collaborators.
    context: BuildContext<'a>,
}

impl<'a> Builder<'a> {
    /// Creates a builder.
    #[must_use]
    pub fn new<I, S>(
        template: Template,
        dirty: I,
        record: Option<&'a dyn BoundRecord>,
        context: BuildContext<'a>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            template,
            dirty: dirty.into_iter().map(Into::into).collect(),
            record,
            context,
        }
    }

    /// Runs every pass and returns the resolved template.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] when an option provider, route, or date format
    /// cannot be resolved.
    pub fn run(self) -> Result<ResolvedTemplate, BuildError> {
        let Self {
            mut template,
            dirty,
            record,
            context,
        } = self;
        debug!(
            sections = template.sections.len(),
            actions = template.actions.len(),
            dirty = dirty.len(),
            bound = record.is_some(),
            "resolving form template"
        );

        append_config_defaults(&mut template, context.config);
        match record {
            Some(record) => resolve_values(&mut template.sections, &dirty, record)?,
            None => debug!("no bound record; field values left as declared"),
        }
        let actions = resolve_actions(&template, &context)?;
        compute_metas(&mut template.sections, &context)?;

        Ok(finish(template, actions))
    }
}

/// Copies configuration defaults the template does not declare.
///
/// Explicit template values are never overwritten, so applying this twice is
/// the same as applying it once.
pub fn append_config_defaults(template: &mut Template, config: &dyn ConfigStore) {
    if template.authorize.is_none() {
        template.authorize = config.get_bool(config_keys::AUTHORIZE);
    }
    if template.divider_title_placement.is_none() {
        template.divider_title_placement = config.get_str(config_keys::DIVIDER_TITLE_PLACEMENT);
    }
    if template.labels.is_none() {
        template.labels = config.get_bool(config_keys::LABELS);
    }
}

/// Assembles the resolved template, dropping build-time inputs.
fn finish(template: Template, actions: ResolvedActions) -> ResolvedTemplate {
    let Template {
        sections,
        actions: _,
        routes: _,
        route_prefix: _,
        route_params,
        authorize: _,
        divider_title_placement,
        labels,
        extra,
    } = template;
    ResolvedTemplate {
        sections,
        actions,
        route_params,
        divider_title_placement,
        labels,
        extra,
    }
}
