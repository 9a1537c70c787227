// crates/form-resolver-core/src/core/mod.rs
// ============================================================================
// Module: Form Resolver Core Types
// Description: Template model, action names, and bound record values.
// Purpose: Provide the canonical structures the builder consumes and produces.
// Dependencies: serde, serde_json, time
// ============================================================================

//! ## Overview
//! Core types describe form templates before and after resolution, the
//! recognized action universe, and the values bound records hand back.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod actions;
pub mod record;
pub mod template;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use actions::ActionsValidator;
pub use actions::BACK_ACTION;
pub use actions::CREATE_ACTIONS;
pub use actions::LOCAL_ACTIONS;
pub use actions::TemplateError;
pub use actions::UPDATE_ACTIONS;
pub use actions::is_local_action;
pub use actions::is_recognized_action;
pub use actions::recognized_actions;
pub use record::Record;
pub use record::RecordValue;
pub use template::ActionDescriptor;
pub use template::ActionTarget;
pub use template::Attributes;
pub use template::DEFAULT_LABEL;
pub use template::DEFAULT_TRACK_BY;
pub use template::DatepickerMeta;
pub use template::Field;
pub use template::FieldMeta;
pub use template::InputContent;
pub use template::InputMeta;
pub use template::MetaError;
pub use template::OtherMeta;
pub use template::ResolvedActions;
pub use template::ResolvedTemplate;
pub use template::Section;
pub use template::SelectMeta;
pub use template::SelectOptions;
pub use template::Template;
pub use template::WysiwygMeta;
