// crates/access-gate-core/tests/config_validation.rs
// ============================================================================
// Module: Gate Config Validation Tests
// Description: Eager validation of gate configuration invariants.
// Purpose: Ensure malformed configuration fails at set time with clear errors.
// Dependencies: access-gate-core, serde_json
// ============================================================================

//! ## Overview
//! Covers missing content, pin rules without codes, pin code normalization,
//! and blank exemption users.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use access_gate_core::ConfigError;
use access_gate_core::GateConfig;
use access_gate_core::PinCode;
use serde_json::json;

// ============================================================================
// SECTION: Content
// ============================================================================

#[test]
fn missing_content_is_rejected() {
    let err = GateConfig::from_json_value(json!({"restrictions": {"confirm": {}}})).unwrap_err();
    assert_eq!(err, ConfigError::MissingContent);
}

#[test]
fn null_content_is_rejected() {
    let err = GateConfig::from_json_value(json!({"content": null})).unwrap_err();
    assert_eq!(err, ConfigError::MissingContent);
}

#[test]
fn card_alias_is_accepted_for_content() {
    let config = GateConfig::from_json_value(json!({"card": {"type": "light"}})).unwrap();
    assert_eq!(config.content().and_then(|content| content.str_field("type")), Some("light"));
}

#[test]
fn default_config_fails_validation() {
    assert_eq!(GateConfig::default().validate(), Err(ConfigError::MissingContent));
}

// ============================================================================
// SECTION: Pin Codes
// ============================================================================

#[test]
fn pin_without_code_is_rejected() {
    let err = GateConfig::from_json_value(json!({
        "content": {"type": "light"},
        "restrictions": {"pin": {"text": "Code?"}}
    }))
    .unwrap_err();
    assert_eq!(err, ConfigError::MissingPinCode);
    assert_eq!(err.to_string(), "a pin code is required for pin restrictions");
}

#[test]
fn pin_without_code_is_rejected_regardless_of_other_rules() {
    let err = GateConfig::from_json_value(json!({
        "content": {"type": "light"},
        "exemptions": [{"user": "owner"}],
        "restrictions": {"block": {}, "pin": {"exemptions": [{"user": "a"}]}, "confirm": {}}
    }))
    .unwrap_err();
    assert_eq!(err, ConfigError::MissingPinCode);
}

#[test]
fn empty_pin_code_is_rejected() {
    let err = GateConfig::from_json_value(json!({
        "content": {"type": "light"},
        "restrictions": {"pin": {"code": ""}}
    }))
    .unwrap_err();
    assert_eq!(err, ConfigError::EmptyPinCode);
}

#[test]
fn integer_pin_code_is_normalized_to_string() {
    let config = GateConfig::from_json_value(json!({
        "content": {"type": "light"},
        "restrictions": {"pin": {"code": 1234}}
    }))
    .unwrap();
    let pin = config.restrictions.pin.as_ref().unwrap();
    assert_eq!(pin.code, Some(PinCode::new("1234")));
    assert!(pin.accepts(Some("1234")));
    assert!(!pin.accepts(Some("01234")));
}

#[test]
fn float_and_boolean_pin_codes_are_rejected() {
    for code in [json!(12.5), json!(true), json!(-4)] {
        let err = GateConfig::from_json_value(json!({
            "content": {"type": "light"},
            "restrictions": {"pin": {"code": code}}
        }))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "unexpected error {err}");
    }
}

#[test]
fn integer_zero_pin_code_counts_as_missing() {
    let err = GateConfig::from_json_value(json!({
        "content": {"type": "light"},
        "restrictions": {"pin": {"code": 0}}
    }))
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "unexpected error {err}");

    let config = GateConfig::from_json_value(json!({
        "content": {"type": "light"},
        "restrictions": {"pin": {"code": "0"}}
    }))
    .unwrap();
    assert!(config.restrictions.pin.as_ref().unwrap().accepts(Some("0")));
}

#[test]
fn pin_code_debug_output_is_redacted() {
    let code = PinCode::new("9876");
    assert!(!format!("{code:?}").contains("9876"));
}

// ============================================================================
// SECTION: Exemptions
// ============================================================================

#[test]
fn blank_global_exemption_user_is_rejected() {
    let err = GateConfig::from_json_value(json!({
        "content": {"type": "light"},
        "exemptions": [{"user": "ok"}, {"user": "  "}]
    }))
    .unwrap_err();
    assert_eq!(err, ConfigError::BlankExemptionUser("exemptions[1]".to_string()));
}

#[test]
fn blank_rule_exemption_user_is_rejected_with_scope() {
    let err = GateConfig::from_json_value(json!({
        "content": {"type": "light"},
        "restrictions": {"confirm": {"exemptions": [{"user": ""}]}}
    }))
    .unwrap_err();
    assert_eq!(
        err,
        ConfigError::BlankExemptionUser("restrictions.confirm.exemptions[0]".to_string())
    );
}

#[test]
fn malformed_json_reports_parse_error() {
    let err = GateConfig::from_json_str("{\"content\": ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn serialized_config_round_trips_through_validation() {
    let config = GateConfig::from_json_value(json!({
        "content": {"type": "light"},
        "restrictions": {"pin": {"code": 7, "text": "Pin"}, "block": {"text": "Closed"}}
    }))
    .unwrap();
    let text = serde_json::to_string(&config).unwrap();
    assert_eq!(GateConfig::from_json_str(&text).unwrap(), config);
}
