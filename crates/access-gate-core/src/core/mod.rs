// crates/access-gate-core/src/core/mod.rs
// ============================================================================
// Module: Access Gate Core Types
// Description: Canonical gate configuration, restriction rules, and view types.
// Purpose: Provide stable, serializable types for gate configuration and state.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types define the gate configuration schema, restriction rules,
//! deterministic time values, and the derived visual state. These types are
//! the canonical source of truth for hosts and configuration loaders.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod config;
pub mod identifiers;
pub mod restriction;
pub mod time;
pub mod view;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::ContentConfig;
pub use config::GateConfig;
pub use identifiers::UserId;
pub use restriction::BlockRule;
pub use restriction::ConfirmRule;
pub use restriction::DEFAULT_CONFIRM_TEXT;
pub use restriction::DEFAULT_PIN_PROMPT;
pub use restriction::Exemption;
pub use restriction::HideRule;
pub use restriction::PinCode;
pub use restriction::PinRule;
pub use restriction::RestrictionConfig;
pub use restriction::RestrictionRule;
pub use restriction::RuleKind;
pub use restriction::is_exempt;
pub use time::DEFAULT_INVALID_COOLDOWN_MS;
pub use time::DEFAULT_REVEAL_WINDOW_MS;
pub use time::GateTimings;
pub use time::TimingError;
pub use time::Timestamp;
pub use view::GateVisualState;
pub use view::LockAnimation;
pub use view::OverlayView;
