// crates/access-gate-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for access-gate-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::PathBuf;

use access_gate_config::AccessGateConfig;
use access_gate_config::ConfigFormat;
use access_gate_config::ConfigLoadError;
use tempfile::TempDir;

/// Parses a TOML string into an `AccessGateConfig` without validation.
pub fn config_from_toml(toml_str: &str) -> Result<AccessGateConfig, ConfigLoadError> {
    AccessGateConfig::parse(toml_str, ConfigFormat::Toml)
}

/// Minimal valid TOML: content only.
pub const MINIMAL_TOML: &str = "[gate.content]\ntype = \"entities\"\n";

/// Writes `contents` to `name` inside a fresh temp dir.
pub fn write_config(name: &str, contents: &str) -> Result<(TempDir, PathBuf), String> {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join(name);
    fs::write(&path, contents).map_err(|err| err.to_string())?;
    Ok((dir, path))
}
