// crates/form-resolver-core/src/lib.rs
// ============================================================================
// Module: Form Resolver Core Library
// Description: Public API surface for the form template resolver.
// Purpose: Expose template types, collaborator interfaces, and the builder.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Form resolver core turns a parsed form template into a rendering-ready
//! template: values come from a bound record or from pending user edits,
//! metadata picks up derived defaults, and declared actions become routable
//! descriptors annotated with an authorization outcome. It performs no I/O of
//! its own and integrates through explicit interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::AccessOracle;
pub use interfaces::BoundRecord;
pub use interfaces::ConfigStore;
pub use interfaces::OptionProvider;
pub use interfaces::OptionProviders;
pub use interfaces::ProviderError;
pub use interfaces::RouteError;
pub use interfaces::RouteResolver;
pub use interfaces::config_keys;
pub use runtime::AllowAll;
pub use runtime::BuildContext;
pub use runtime::BuildError;
pub use runtime::Builder;
pub use runtime::DateFormatError;
pub use runtime::DenyList;
pub use runtime::ENCRYPT_SENTINEL;
pub use runtime::RouteTable;
pub use runtime::StaticConfig;
