// crates/access-gate-core/src/core/restriction.rs
// ============================================================================
// Module: Access Gate Restriction Rules
// Description: Declarative hide/block/pin/confirm rules with exemptions.
// Purpose: Model restriction configuration as typed, serializable rules.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! A restriction configuration carries up to four independent rules. Each
//! rule may list exemptions; a rule restricts every actor not found in its
//! exemption list. An absent or empty exemption list exempts nobody.
//!
//! Pin codes accept either a string or an integer in source documents and are
//! normalized to their decimal string form. The integer 0 is rejected as a
//! missing code; the string "0" is a valid code. Matching is strict string
//! equality.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Visitor;

use crate::core::identifiers::UserId;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prompt label used when a pin rule omits `text`.
pub const DEFAULT_PIN_PROMPT: &str = "Input pin code";
/// Confirmation message used when a confirm rule omits `text`.
pub const DEFAULT_CONFIRM_TEXT: &str = "Are you sure you want to unlock?";

// ============================================================================
// SECTION: Exemptions
// ============================================================================

/// Single exemption entry keyed by user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exemption {
    /// Exempted user identifier.
    pub user: UserId,
}

impl Exemption {
    /// Creates an exemption for the provided user.
    #[must_use]
    pub fn new(user: impl Into<UserId>) -> Self {
        Self {
            user: user.into(),
        }
    }
}

/// Returns true when the actor matches any exemption entry.
///
/// An absent actor never matches.
#[must_use]
pub fn is_exempt(exemptions: &[Exemption], actor: Option<&UserId>) -> bool {
    actor.is_some_and(|actor| exemptions.iter().any(|exemption| &exemption.user == actor))
}

// ============================================================================
// SECTION: Rule Kinds
// ============================================================================

/// Restriction rule kind, listed in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Hide the whole gate.
    Hide,
    /// Reject every unlock attempt.
    Block,
    /// Require a pin code.
    Pin,
    /// Require a yes/no confirmation.
    Confirm,
}

impl RuleKind {
    /// All rule kinds in evaluation order.
    pub const ALL: [Self; 4] = [Self::Hide, Self::Block, Self::Pin, Self::Confirm];

    /// Returns the configuration key for this rule kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hide => "hide",
            Self::Block => "block",
            Self::Pin => "pin",
            Self::Confirm => "confirm",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common view over every restriction rule.
pub trait RestrictionRule {
    /// Rule kind.
    const KIND: RuleKind;

    /// Exemptions attached to the rule.
    fn exemptions(&self) -> &[Exemption];
}

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Hides the gate and its wrapped widget.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HideRule {
    /// Actors for whom the rule does not apply.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exemptions: Vec<Exemption>,
}

/// Rejects unlock attempts outright.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRule {
    /// Optional explanation shown on rejection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Actors for whom the rule does not apply.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exemptions: Vec<Exemption>,
}

/// Requires a pin code before unlocking.
///
/// # Invariants
/// - `code` must be present and non-empty once the owning config is validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinRule {
    /// Expected pin code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<PinCode>,
    /// Optional prompt label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Actors for whom the rule does not apply.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exemptions: Vec<Exemption>,
}

impl PinRule {
    /// Returns the prompt label, falling back to the default.
    #[must_use]
    pub fn prompt(&self) -> &str {
        self.text.as_deref().unwrap_or(DEFAULT_PIN_PROMPT)
    }

    /// Returns true when the input matches the configured code.
    ///
    /// A rule without a code never matches.
    #[must_use]
    pub fn accepts(&self, input: Option<&str>) -> bool {
        match (&self.code, input) {
            (Some(code), Some(input)) => code.matches(input),
            _ => false,
        }
    }
}

/// Requires a yes/no confirmation before unlocking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmRule {
    /// Optional confirmation message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Actors for whom the rule does not apply.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exemptions: Vec<Exemption>,
}

impl ConfirmRule {
    /// Returns the confirmation message, falling back to the default.
    #[must_use]
    pub fn message(&self) -> &str {
        self.text.as_deref().unwrap_or(DEFAULT_CONFIRM_TEXT)
    }
}

impl RestrictionRule for HideRule {
    const KIND: RuleKind = RuleKind::Hide;

    fn exemptions(&self) -> &[Exemption] {
        &self.exemptions
    }
}

impl RestrictionRule for BlockRule {
    const KIND: RuleKind = RuleKind::Block;

    fn exemptions(&self) -> &[Exemption] {
        &self.exemptions
    }
}

impl RestrictionRule for PinRule {
    const KIND: RuleKind = RuleKind::Pin;

    fn exemptions(&self) -> &[Exemption] {
        &self.exemptions
    }
}

impl RestrictionRule for ConfirmRule {
    const KIND: RuleKind = RuleKind::Confirm;

    fn exemptions(&self) -> &[Exemption] {
        &self.exemptions
    }
}

/// Set of restriction rules active on a gate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionConfig {
    /// Optional hide rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide: Option<HideRule>,
    /// Optional block rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<BlockRule>,
    /// Optional pin rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<PinRule>,
    /// Optional confirm rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm: Option<ConfirmRule>,
}

impl RestrictionConfig {
    /// Returns true when no rule is configured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.hide.is_none() && self.block.is_none() && self.pin.is_none() && self.confirm.is_none()
    }

    /// Returns the exemptions of a configured rule, or `None` when absent.
    #[must_use]
    pub fn exemptions_for(&self, kind: RuleKind) -> Option<&[Exemption]> {
        match kind {
            RuleKind::Hide => self.hide.as_ref().map(RestrictionRule::exemptions),
            RuleKind::Block => self.block.as_ref().map(RestrictionRule::exemptions),
            RuleKind::Pin => self.pin.as_ref().map(RestrictionRule::exemptions),
            RuleKind::Confirm => self.confirm.as_ref().map(RestrictionRule::exemptions),
        }
    }
}

// ============================================================================
// SECTION: Pin Code
// ============================================================================

/// Configured pin code.
///
/// # Invariants
/// - Stored as a string; integer inputs are normalized to decimal form.
/// - `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct PinCode(String);

impl PinCode {
    /// Creates a pin code from a string.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns true when the code is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Strict equality against actor input.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        self.0 == input
    }
}

impl fmt::Debug for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PinCode(<redacted>)")
    }
}

impl From<&str> for PinCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Serialize for PinCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PinCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PinCodeVisitor)
    }
}

/// Visitor accepting string or integer pin codes.
struct PinCodeVisitor;

impl Visitor<'_> for PinCodeVisitor {
    type Value = PinCode;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a pin code string or integer")
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(PinCode::new(value))
    }

    fn visit_string<E: serde::de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(PinCode(value))
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
        if value == 0 {
            return Err(E::custom("integer pin code 0 counts as missing; quote it as \"0\""));
        }
        Ok(PinCode(value.to_string()))
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
        if value < 0 {
            return Err(E::custom("pin code must not be negative"));
        }
        self.visit_u64(value.unsigned_abs())
    }

    fn visit_f64<E: serde::de::Error>(self, _value: f64) -> Result<Self::Value, E> {
        Err(E::custom("pin code must be a string or integer, not a float"))
    }

    fn visit_bool<E: serde::de::Error>(self, _value: bool) -> Result<Self::Value, E> {
        Err(E::custom("pin code must be a string or integer, not a boolean"))
    }
}
