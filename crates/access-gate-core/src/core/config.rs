// crates/access-gate-core/src/core/config.rs
// ============================================================================
// Module: Access Gate Configuration Model
// Description: Gate configuration schema and eager validation.
// Purpose: Reject malformed gate configuration at set time, never at unlock time.
// Dependencies: crate::core::{identifiers, restriction}, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A gate configuration wraps an opaque embedded-widget configuration with
//! global exemptions and restriction rules. Validation runs when the
//! configuration is applied and fails closed: missing content, a pin rule
//! without a code, or blank exemption users are configuration errors.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::UserId;
use crate::core::restriction::Exemption;
use crate::core::restriction::RestrictionConfig;
use crate::core::restriction::RuleKind;
use crate::core::restriction::is_exempt;

// ============================================================================
// SECTION: Content
// ============================================================================

/// Opaque embedded-widget configuration handed to the widget factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentConfig(Value);

impl ContentConfig {
    /// Wraps a raw JSON value.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the raw JSON value.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }

    /// Returns a string field from an object-shaped content config.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Returns an unsigned integer field from an object-shaped content config.
    #[must_use]
    pub fn u64_field(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }
}

// ============================================================================
// SECTION: Gate Configuration
// ============================================================================

/// Gate configuration.
///
/// # Invariants
/// - `content` is present once validated.
/// - A configured pin rule carries a non-empty code once validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Embedded widget configuration (`card` accepted as an alias).
    #[serde(default, alias = "card", skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentConfig>,
    /// Master bypass list; matching actors skip the overlay entirely.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exemptions: Vec<Exemption>,
    /// Restriction rules.
    #[serde(default, skip_serializing_if = "RestrictionConfig::is_empty")]
    pub restrictions: RestrictionConfig,
}

impl GateConfig {
    /// Creates an unrestricted configuration around the provided content.
    #[must_use]
    pub fn with_content(content: Value) -> Self {
        Self {
            content: Some(ContentConfig::new(content)),
            exemptions: Vec::new(),
            restrictions: RestrictionConfig::default(),
        }
    }

    /// Parses and validates a configuration from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_json_value(value: Value) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_value(value).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(input).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content.as_ref().is_none_or(|content| content.as_value().is_null()) {
            return Err(ConfigError::MissingContent);
        }
        if let Some(pin) = &self.restrictions.pin {
            match &pin.code {
                None => return Err(ConfigError::MissingPinCode),
                Some(code) if code.is_empty() => return Err(ConfigError::EmptyPinCode),
                Some(_) => {}
            }
        }
        ensure_exemption_users(&self.exemptions, "exemptions")?;
        for kind in RuleKind::ALL {
            if let Some(exemptions) = self.restrictions.exemptions_for(kind) {
                ensure_exemption_users(exemptions, &format!("restrictions.{kind}.exemptions"))?;
            }
        }
        Ok(())
    }

    /// Returns the content config when present.
    #[must_use]
    pub const fn content(&self) -> Option<&ContentConfig> {
        self.content.as_ref()
    }

    /// Returns true when the actor matches a global exemption.
    #[must_use]
    pub fn is_globally_exempt(&self, actor: Option<&UserId>) -> bool {
        is_exempt(&self.exemptions, actor)
    }
}

/// Ensures every exemption entry names a non-blank user.
fn ensure_exemption_users(exemptions: &[Exemption], scope: &str) -> Result<(), ConfigError> {
    for (index, exemption) in exemptions.iter().enumerate() {
        if exemption.user.is_blank() {
            return Err(ConfigError::BlankExemptionUser(format!("{scope}[{index}]")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Gate configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configuration could not be parsed.
    #[error("invalid gate configuration: {0}")]
    Parse(String),
    /// Embedded widget configuration is missing.
    #[error("gate configuration requires a content entry")]
    MissingContent,
    /// Pin rule has no code.
    #[error("a pin code is required for pin restrictions")]
    MissingPinCode,
    /// Pin rule code is empty.
    #[error("pin code must not be empty")]
    EmptyPinCode,
    /// Exemption entry names a blank user.
    #[error("exemption user must not be blank: {0}")]
    BlankExemptionUser(String),
}
