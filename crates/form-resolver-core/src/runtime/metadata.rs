// crates/form-resolver-core/src/runtime/metadata.rs
// ============================================================================
// Module: Field Metadata Computation
// Description: Enrich field metadata with derived defaults.
// Purpose: Resolve option providers, routes, and configured defaults per type.
// Dependencies: crate::{core, interfaces, runtime::builder}, serde_json
// ============================================================================

//! ## Overview
//! Runs once per build, after values are resolved. Attributes are only filled
//! when the author left them out, except the editor API key, which always
//! mirrors configuration, and select `options`/`source`, which are replaced
//! by their resolved forms.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::core::Attributes;
use crate::core::DEFAULT_LABEL;
use crate::core::DEFAULT_TRACK_BY;
use crate::core::DatepickerMeta;
use crate::core::Field;
use crate::core::FieldMeta;
use crate::core::InputContent;
use crate::core::InputMeta;
use crate::core::Section;
use crate::core::SelectMeta;
use crate::core::SelectOptions;
use crate::core::WysiwygMeta;
use crate::interfaces::ConfigStore;
use crate::interfaces::config_keys;
use crate::runtime::builder::BuildContext;
use crate::runtime::builder::BuildError;

// ============================================================================
// SECTION: Metadata Pass
// ============================================================================

/// Computes metadata for every field in place.
pub(crate) fn compute_metas(
    sections: &mut [Section],
    context: &BuildContext<'_>,
) -> Result<(), BuildError> {
    for field in sections.iter_mut().flat_map(|section| section.fields.iter_mut()) {
        compute_meta(field, context)?;
    }
    Ok(())
}

/// Dispatches on the field type.
fn compute_meta(field: &mut Field, context: &BuildContext<'_>) -> Result<(), BuildError> {
    let Field {
        name,
        value,
        meta,
        ..
    } = field;
    match meta {
        FieldMeta::Select(meta) => compute_select(name, meta, context)?,
        FieldMeta::Input(meta) => compute_input(value.as_ref(), meta),
        FieldMeta::Datepicker(meta) => compute_date(meta, context.config),
        FieldMeta::Wysiwyg(meta) => compute_wysiwyg(meta, context.config),
        FieldMeta::Other(_) => {}
    }
    Ok(())
}

// ============================================================================
// SECTION: Type Rules
// ============================================================================

/// Resolves symbolic options and fills select defaults.
fn compute_select(
    name: &str,
    meta: &mut SelectMeta,
    context: &BuildContext<'_>,
) -> Result<(), BuildError> {
    if let Some(SelectOptions::Provider(provider)) = &meta.options {
        let options = context
            .options
            .resolve(provider)
            .and_then(|provider| provider.list_options())
            .map_err(|source| BuildError::Provider {
                field: name.to_string(),
                source,
            })?;
        meta.options = Some(SelectOptions::Inline(Value::Array(options)));
    }
    if meta.placeholder.is_none() {
        meta.placeholder = context.config.get_str(config_keys::SELECT_PLACEHOLDER);
    }
    if meta.track_by.is_none() {
        meta.track_by = Some(DEFAULT_TRACK_BY.to_string());
    }
    if meta.label.is_none() {
        meta.label = Some(DEFAULT_LABEL.to_string());
    }
    if let Some(source) = &meta.source {
        let path = context.routes.resolve(source, &Attributes::new(), true).map_err(|source| {
            BuildError::SourceRoute {
                field: name.to_string(),
                source,
            }
        })?;
        meta.source = Some(path);
    }
    Ok(())
}

/// Snapshots the masked value of encrypted inputs.
fn compute_input(value: Option<&Value>, meta: &mut InputMeta) {
    if meta.content_kind() == InputContent::Encrypt {
        meta.initial_value = Some(value.cloned().unwrap_or(Value::Null));
    }
}

/// Fills the display format from configuration when absent.
fn compute_date(meta: &mut DatepickerMeta, config: &dyn ConfigStore) {
    if meta.alt_format.is_none() {
        meta.alt_format = config.get_str(config_keys::ALT_DATE_FORMAT);
    }
}

/// Mirrors the configured editor API key.
fn compute_wysiwyg(meta: &mut WysiwygMeta, config: &dyn ConfigStore) {
    meta.api_key = config.get_str(config_keys::WYSIWYG_API_KEY);
}
