// crates/form-resolver-config/src/lib.rs
// ============================================================================
// Module: Form Resolver Config Library
// Description: Forms configuration model and validation.
// Purpose: Single source of truth for form-resolver.toml semantics.
// Dependencies: form-resolver-core, serde, toml
// ============================================================================

//! ## Overview
//! `form-resolver-config` defines the process-wide forms configuration. It
//! loads `form-resolver.toml` with strict limits, validates it, and exposes it
//! to the builder through the core `ConfigStore` contract.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
