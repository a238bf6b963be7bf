// crates/access-gate-cli/src/lib.rs
// ============================================================================
// Module: Access Gate CLI Library
// Description: Terminal host components for the Access Gate command line.
// Purpose: Provide the surface, widget, session loop, and reports to the binary.
// Dependencies: access-gate-core, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This library houses the terminal host used by the `access-gate` binary:
//! a line-oriented prompt surface, a placeholder widget, the interactive
//! session loop, and JSON report payloads. Keeping them here lets unit tests
//! drive sessions with in-memory readers and a manual clock.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod report;
pub mod session;
pub mod terminal;
