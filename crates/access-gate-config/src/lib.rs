// crates/access-gate-config/src/lib.rs
// ============================================================================
// Module: Access Gate Config Library
// Description: Host configuration model, loading, and canonical example.
// Purpose: Single source of truth for access-gate.toml semantics.
// Dependencies: access-gate-core, serde, serde_json, serde_yaml, toml
// ============================================================================

//! ## Overview
//! `access-gate-config` defines the file a host reads to build a gate: the
//! gate policy itself, the timing windows, and the audit sink. Validation is
//! strict and fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
