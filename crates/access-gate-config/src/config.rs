// crates/access-gate-config/src/config.rs
// ============================================================================
// Module: Access Gate Host Configuration
// Description: Configuration loading and validation for Access Gate hosts.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: access-gate-core, serde, serde_json, serde_yaml, thiserror, toml
// ============================================================================

//! ## Overview
//! Host configuration is loaded from a single file with strict size and path
//! limits. The format follows the file extension: TOML by default, YAML for
//! `.yaml`/`.yml`, JSON for `.json`. Missing or invalid configuration fails
//! closed; nothing is partially applied.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use access_gate_core::DEFAULT_INVALID_COOLDOWN_MS;
use access_gate_core::DEFAULT_REVEAL_WINDOW_MS;
use access_gate_core::FileAuditSink;
use access_gate_core::GateAuditSink;
use access_gate_core::GateConfig;
use access_gate_core::GateTimings;
use access_gate_core::NoopAuditSink;
use access_gate_core::StderrAuditSink;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "access-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "ACCESS_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Upper bound for either timing window in milliseconds.
pub(crate) const MAX_TIMING_WINDOW_MS: u64 = 600_000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Access Gate host configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessGateConfig {
    /// Gate policy and wrapped content.
    #[serde(default)]
    pub gate: GateConfig,
    /// Cool-down and reveal windows.
    #[serde(default)]
    pub timings: TimingsConfig,
    /// Audit sink selection.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl AccessGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigLoadError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigLoadError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigLoadError::Invalid("config file must be utf-8".to_string()))?;
        let config = Self::parse(content, ConfigFormat::from_path(&resolved))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration text without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError::Parse`] when the text is malformed.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self, ConfigLoadError> {
        match format {
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|err| ConfigLoadError::Parse(err.to_string()))
            }
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|err| ConfigLoadError::Parse(err.to_string()))
            }
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|err| ConfigLoadError::Parse(err.to_string()))
            }
        }
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.gate.validate().map_err(|err| ConfigLoadError::Invalid(format!("gate: {err}")))?;
        self.timings.validate()?;
        self.audit.validate()?;
        Ok(())
    }

    /// Returns validated gate timings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] when the windows are out of order or zero.
    pub fn gate_timings(&self) -> Result<GateTimings, ConfigLoadError> {
        self.timings.to_gate_timings()
    }

    /// Builds the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] when the audit file cannot be opened.
    pub fn build_audit_sink(&self) -> Result<Arc<dyn GateAuditSink>, ConfigLoadError> {
        self.audit.build_sink()
    }
}

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document.
    Toml,
    /// YAML document.
    Yaml,
    /// JSON document.
    Json,
}

impl ConfigFormat {
    /// Selects the format from a path extension; unknown extensions read as TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "yaml" | "yml" => Self::Yaml,
            "json" => Self::Json,
            _ => Self::Toml,
        }
    }
}

// ============================================================================
// SECTION: Timings
// ============================================================================

/// Timing windows in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimingsConfig {
    /// Invalid-input flash duration.
    #[serde(default = "default_invalid_cooldown_ms")]
    pub invalid_cooldown_ms: u64,
    /// Click-through duration after a successful unlock.
    #[serde(default = "default_reveal_window_ms")]
    pub reveal_window_ms: u64,
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            invalid_cooldown_ms: DEFAULT_INVALID_COOLDOWN_MS,
            reveal_window_ms: DEFAULT_REVEAL_WINDOW_MS,
        }
    }
}

impl TimingsConfig {
    /// Validates timing bounds and ordering.
    fn validate(&self) -> Result<(), ConfigLoadError> {
        for (field, value) in [
            ("timings.invalid_cooldown_ms", self.invalid_cooldown_ms),
            ("timings.reveal_window_ms", self.reveal_window_ms),
        ] {
            if value > MAX_TIMING_WINDOW_MS {
                return Err(ConfigLoadError::Invalid(format!(
                    "{field} must be at most {MAX_TIMING_WINDOW_MS}"
                )));
            }
        }
        self.to_gate_timings().map(|_| ())
    }

    /// Converts to core timings.
    fn to_gate_timings(self) -> Result<GateTimings, ConfigLoadError> {
        GateTimings::from_millis(self.invalid_cooldown_ms, self.reveal_window_ms)
            .map_err(|err| ConfigLoadError::Invalid(format!("timings: {err}")))
    }
}

/// Default invalid cool-down for serde.
const fn default_invalid_cooldown_ms() -> u64 {
    DEFAULT_INVALID_COOLDOWN_MS
}

/// Default reveal window for serde.
const fn default_reveal_window_ms() -> u64 {
    DEFAULT_REVEAL_WINDOW_MS
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Audit sink selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard audit events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
}

/// Audit configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink kind.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Log file path for the file sink.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates sink settings.
    fn validate(&self) -> Result<(), ConfigLoadError> {
        match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::File, None) => {
                Err(ConfigLoadError::Invalid("audit.path is required for the file sink".to_string()))
            }
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (AuditSinkKind::None | AuditSinkKind::Stderr, Some(_)) => Err(ConfigLoadError::Invalid(
                "audit.path is only valid for the file sink".to_string(),
            )),
            (AuditSinkKind::None | AuditSinkKind::Stderr, None) => Ok(()),
        }
    }

    /// Builds the sink.
    fn build_sink(&self) -> Result<Arc<dyn GateAuditSink>, ConfigLoadError> {
        match self.sink {
            AuditSinkKind::None => Ok(Arc::new(NoopAuditSink)),
            AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
            AuditSinkKind::File => {
                let path = self.path.as_deref().ok_or_else(|| {
                    ConfigLoadError::Invalid("audit.path is required for the file sink".to_string())
                })?;
                let sink = FileAuditSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigLoadError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Host configuration errors.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// I/O failure while reading configuration or opening sinks.
    #[error("config io error: {0}")]
    Io(String),
    /// Parse failure.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigLoadError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigLoadError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigLoadError> {
    if path.to_string_lossy().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigLoadError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigLoadError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a configured path string.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigLoadError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigLoadError::Invalid(format!("{field} must be non-empty")));
    }
    validate_path(Path::new(trimmed))
        .map_err(|_| ConfigLoadError::Invalid(format!("{field} exceeds path limits")))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("gate.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("gate.YML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("gate.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("gate.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("gate")), ConfigFormat::Toml);
    }

    #[test]
    fn path_string_rejects_blank_and_long_components() {
        assert!(validate_path_string("audit.path", "  ").is_err());
        let long = "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1);
        assert!(validate_path_string("audit.path", &format!("logs/{long}")).is_err());
        assert!(validate_path_string("audit.path", "logs/gate.log").is_ok());
    }

    #[test]
    fn explicit_path_wins_over_defaults() {
        let path = resolve_path(Some(Path::new("custom.yaml"))).unwrap();
        assert_eq!(path, PathBuf::from("custom.yaml"));
    }

    #[test]
    fn timing_bounds_are_enforced() {
        let timings = TimingsConfig {
            invalid_cooldown_ms: 3_000,
            reveal_window_ms: MAX_TIMING_WINDOW_MS + 1,
        };
        assert!(timings.validate().is_err());
        assert!(TimingsConfig::default().validate().is_ok());
    }
}
