// crates/form-resolver-core/src/runtime/mod.rs
// ============================================================================
// Module: Form Resolver Runtime
// Description: Template builder passes and in-memory collaborators.
// Purpose: Resolve templates into their rendering-ready form.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime hosts the [`Builder`] and its passes (values, actions,
//! metadata), date format translation, and simple collaborator
//! implementations ([`RouteTable`], [`StaticConfig`], [`AllowAll`],
//! [`DenyList`]).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod actions;
pub mod builder;
pub mod date_format;
pub mod memory;
pub mod metadata;
pub mod routes;
pub mod values;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use actions::route_name;
pub use builder::BuildContext;
pub use builder::BuildError;
pub use builder::Builder;
pub use builder::append_config_defaults;
pub use date_format::DEFAULT_DATE_FORMAT;
pub use date_format::DateFormatError;
pub use date_format::format_timestamp;
pub use date_format::parse_timestamp;
pub use date_format::validate_pattern;
pub use memory::AllowAll;
pub use memory::DenyList;
pub use memory::StaticConfig;
pub use routes::RouteTable;
pub use values::ENCRYPT_SENTINEL;
pub use values::resolve_value;
