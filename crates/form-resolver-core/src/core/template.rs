// crates/form-resolver-core/src/core/template.rs
// ============================================================================
// Module: Form Template Model
// Description: Template, section, field, and field metadata structures.
// Purpose: Define the parsed template tree and its resolved counterpart.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A [`Template`] is the parsed, unresolved form description: ordered
//! sections of typed fields, declared action names, and the build-time routing
//! inputs used to resolve those actions. A [`ResolvedTemplate`] is what the
//! builder hands back; it has no slot for the build-time inputs, so they can
//! never leak into rendering.
//!
//! Field metadata is a closed tagged union keyed by the `type` attribute with
//! an [`FieldMeta::Other`] fallback. Attributes the model does not name are
//! kept verbatim in each node's `extra` map.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Shared Types
// ============================================================================

/// Free-form JSON attributes attached to template nodes.
pub type Attributes = Map<String, Value>;

// ============================================================================
// SECTION: Template
// ============================================================================

/// Parsed form template prior to resolution.
///
/// # Invariants
/// - `sections` and their fields keep authoring order.
/// - `routes`, `route_prefix`, and `authorize` are build-time inputs only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Ordered template sections.
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Declared action names.
    #[serde(default)]
    pub actions: Vec<String>,
    /// Explicit route name overrides keyed by action name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routes: Option<BTreeMap<String, String>>,
    /// Prefix used to synthesize `{prefix}.{action}` route names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_prefix: Option<String>,
    /// Parameters applied when resolving path-kind action routes.
    #[serde(default)]
    pub route_params: Attributes,
    /// Whether action authorization is enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorize: Option<bool>,
    /// Placement of section divider titles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divider_title_placement: Option<String>,
    /// Whether field labels are rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<bool>,
    /// Remaining authoring attributes (title, icon, method, ...).
    #[serde(flatten)]
    pub extra: Attributes,
}

impl Template {
    /// Iterates over every field in section order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(|section| section.fields.iter())
    }

    /// Iterates mutably over every field in section order.
    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.sections.iter_mut().flat_map(|section| section.fields.iter_mut())
    }

    /// Returns the field with the given name, if any.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().find(|field| field.name == name)
    }
}

/// Ordered group of fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Fields in authoring order.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Remaining section attributes (columns, divider, title, ...).
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Single form field.
///
/// # Invariants
/// - `name` may be a dotted path into the bound record.
/// - `value` of `None` and an explicit JSON `null` are the same state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name or dotted record path.
    pub name: String,
    /// Current value, if any.
    #[serde(default)]
    pub value: Option<Value>,
    /// Type-tagged field metadata.
    pub meta: FieldMeta,
    /// Remaining field attributes (label, column, ...).
    #[serde(flatten)]
    pub extra: Attributes,
}

impl Field {
    /// Creates a field with no value and no extra attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, meta: FieldMeta) -> Self {
        Self {
            name: name.into(),
            value: None,
            meta,
            extra: Attributes::new(),
        }
    }

    /// Sets the field value.
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

// ============================================================================
// SECTION: Field Metadata
// ============================================================================

/// Errors raised while decoding field metadata.
#[derive(Debug, Error)]
pub enum MetaError {
    /// The metadata object has no string `type` attribute.
    #[error("field meta is missing a string `type` attribute")]
    MissingType,
    /// The typed attributes failed to decode.
    #[error("invalid `{kind}` field meta: {reason}")]
    Invalid {
        /// Metadata type tag.
        kind: String,
        /// Decoder message.
        reason: String,
    },
}

/// Type-tagged field metadata.
///
/// Serialized as a flat JSON object whose `type` attribute selects the
/// variant. Unknown types are carried as [`FieldMeta::Other`] and never
/// modified by the builder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Attributes")]
pub enum FieldMeta {
    /// Free text and masked inputs.
    Input(InputMeta),
    /// Date pickers.
    Datepicker(DatepickerMeta),
    /// Single and multiple selects.
    Select(SelectMeta),
    /// Rich text editors.
    Wysiwyg(WysiwygMeta),
    /// Any other field type, passed through unmodified.
    Other(OtherMeta),
}

impl FieldMeta {
    /// Returns the `type` tag of this metadata.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Input(_) => INPUT_TYPE,
            Self::Datepicker(_) => DATEPICKER_TYPE,
            Self::Select(_) => SELECT_TYPE,
            Self::Wysiwyg(_) => WYSIWYG_TYPE,
            Self::Other(other) => &other.kind,
        }
    }
}

/// Type tag for input fields.
const INPUT_TYPE: &str = "input";
/// Type tag for date picker fields.
const DATEPICKER_TYPE: &str = "datepicker";
/// Type tag for select fields.
const SELECT_TYPE: &str = "select";
/// Type tag for rich text fields.
const WYSIWYG_TYPE: &str = "wysiwyg";

impl TryFrom<Attributes> for FieldMeta {
    type Error = MetaError;

    fn try_from(mut attributes: Attributes) -> Result<Self, Self::Error> {
        let kind = match attributes.remove("type") {
            Some(Value::String(kind)) => kind,
            _ => return Err(MetaError::MissingType),
        };
        let meta = match kind.as_str() {
            INPUT_TYPE => Self::Input(decode_meta(&kind, attributes)?),
            DATEPICKER_TYPE => Self::Datepicker(decode_meta(&kind, attributes)?),
            SELECT_TYPE => Self::Select(decode_meta(&kind, attributes)?),
            WYSIWYG_TYPE => Self::Wysiwyg(decode_meta(&kind, attributes)?),
            _ => Self::Other(OtherMeta {
                kind,
                attributes,
            }),
        };
        Ok(meta)
    }
}

/// Decodes the typed body of a metadata variant.
fn decode_meta<T: for<'de> Deserialize<'de>>(
    kind: &str,
    attributes: Attributes,
) -> Result<T, MetaError> {
    serde_json::from_value(Value::Object(attributes)).map_err(|err| MetaError::Invalid {
        kind: kind.to_string(),
        reason: err.to_string(),
    })
}

impl Serialize for FieldMeta {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        /// Flat `{ "type": ..., ...body }` view of a metadata variant.
        #[derive(Serialize)]
        struct Tagged<'a, T: Serialize> {
            /// Metadata type tag.
            #[serde(rename = "type")]
            kind: &'a str,
            /// Variant body.
            #[serde(flatten)]
            body: &'a T,
        }

        let kind = self.kind();
        match self {
            Self::Input(body) => Tagged { kind, body }.serialize(serializer),
            Self::Datepicker(body) => Tagged { kind, body }.serialize(serializer),
            Self::Select(body) => Tagged { kind, body }.serialize(serializer),
            Self::Wysiwyg(body) => Tagged { kind, body }.serialize(serializer),
            Self::Other(other) => Tagged {
                kind,
                body: &other.attributes,
            }
            .serialize(serializer),
        }
    }
}

/// Input content classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContent<'a> {
    /// Plain text; absent values render as the empty string.
    Text,
    /// Secret value; never exposed after resolution.
    Encrypt,
    /// Any other declared content (number, email, password, ...).
    Other(&'a str),
    /// No content declared.
    Unspecified,
}

/// Metadata for `input` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputMeta {
    /// Declared content kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Masked snapshot of the resolved value for `encrypt` inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<Value>,
    /// Remaining attributes.
    #[serde(flatten)]
    pub extra: Attributes,
}

impl InputMeta {
    /// Creates input metadata with the given content kind.
    #[must_use]
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Classifies the declared content.
    #[must_use]
    pub fn content_kind(&self) -> InputContent<'_> {
        match self.content.as_deref() {
            Some("text") => InputContent::Text,
            Some("encrypt") => InputContent::Encrypt,
            Some(other) => InputContent::Other(other),
            None => InputContent::Unspecified,
        }
    }
}

/// Metadata for `datepicker` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatepickerMeta {
    /// Value format (`Y-m-d` style tokens).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Display format used by the picker widget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_format: Option<String>,
    /// Remaining attributes.
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Select options: either inline data or the name of an option provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectOptions {
    /// Symbolic reference resolved through the option-provider registry.
    Provider(String),
    /// Inline option data.
    Inline(Value),
}

/// Metadata for `select` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectMeta {
    /// Inline options or provider name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<SelectOptions>,
    /// Whether several options may be selected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,
    /// Whether whole objects are bound instead of tracked keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<bool>,
    /// Attribute identifying an option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_by: Option<String>,
    /// Attribute displayed for an option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Route name of a server-side option source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Placeholder caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Remaining attributes.
    #[serde(flatten)]
    pub extra: Attributes,
}

impl SelectMeta {
    /// Returns the tracked attribute, defaulting to `id`.
    #[must_use]
    pub fn track_by_or_default(&self) -> &str {
        self.track_by.as_deref().unwrap_or(DEFAULT_TRACK_BY)
    }
}

/// Default tracked attribute for select options.
pub const DEFAULT_TRACK_BY: &str = "id";
/// Default label attribute for select options.
pub const DEFAULT_LABEL: &str = "name";

/// Metadata for `wysiwyg` fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WysiwygMeta {
    /// Editor API key mirrored from configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Remaining attributes.
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Metadata for field types the builder does not interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherMeta {
    /// Declared type tag.
    pub kind: String,
    /// All other attributes.
    pub attributes: Attributes,
}

// ============================================================================
// SECTION: Resolved Template
// ============================================================================

/// Fully resolved template returned by the builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTemplate {
    /// Sections with resolved values and metadata.
    pub sections: Vec<Section>,
    /// Action descriptors keyed by action name.
    pub actions: ResolvedActions,
    /// Route parameters carried through for the consumer.
    pub route_params: Attributes,
    /// Placement of section divider titles.
    pub divider_title_placement: Option<String>,
    /// Whether field labels are rendered.
    pub labels: Option<bool>,
    /// Remaining authoring attributes.
    #[serde(flatten)]
    pub extra: Attributes,
}

impl ResolvedTemplate {
    /// Iterates over every field in section order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(|section| section.fields.iter())
    }

    /// Returns the field with the given name, if any.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().find(|field| field.name == name)
    }
}

/// Action descriptors in declaration order, serialized as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedActions {
    /// Descriptors keyed by action name.
    entries: Vec<(String, ActionDescriptor)>,
}

impl ResolvedActions {
    /// Inserts a descriptor, replacing any previous one for the same action.
    pub fn insert(&mut self, action: impl Into<String>, descriptor: ActionDescriptor) {
        let action = action.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == action) {
            entry.1 = descriptor;
        } else {
            self.entries.push((action, descriptor));
        }
    }

    /// Returns the descriptor for an action.
    #[must_use]
    pub fn get(&self, action: &str) -> Option<&ActionDescriptor> {
        self.entries.iter().find(|(name, _)| name == action).map(|(_, descriptor)| descriptor)
    }

    /// Iterates over `(action, descriptor)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionDescriptor)> {
        self.entries.iter().map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    /// Returns the number of resolved actions.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no actions were declared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ResolvedActions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, descriptor) in &self.entries {
            map.serialize_entry(name, descriptor)?;
        }
        map.end()
    }
}

/// Resolved action ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// Button configuration, when configured.
    pub button: Option<Value>,
    /// Whether the current actor may not trigger the action.
    pub forbidden: bool,
    /// Navigation target.
    pub target: ActionTarget,
}

/// Action target, either a named route or a concrete path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ActionTarget {
    /// Route name left for the consumer's router.
    Route(String),
    /// Resolved relative path.
    Path(String),
}

impl ActionTarget {
    /// Returns the route name or path.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Route(value) | Self::Path(value) => value,
        }
    }
}
