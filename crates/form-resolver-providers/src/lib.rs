// crates/form-resolver-providers/src/lib.rs
// ============================================================================
// Module: Form Resolver Providers
// Description: Built-in option providers and registry utilities.
// Purpose: Supply select options by symbolic name.
// Dependencies: form-resolver-core, serde_json, tracing
// ============================================================================

//! ## Overview
//! This crate ships built-in option providers (fixed lists and enumerations)
//! and a registry implementation that resolves providers by name. The
//! registry implements the core `OptionProviders` contract consumed by the
//! builder.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod registry;
pub mod static_options;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use registry::OptionRegistry;
pub use static_options::EnumOptions;
pub use static_options::StaticOptions;
