// crates/access-gate-cli/src/report.rs
// ============================================================================
// Module: CLI Reports
// Description: JSON report payloads for evaluation and session status.
// Purpose: Keep machine-readable CLI output stable and serializable.
// Dependencies: access-gate-core, serde
// ============================================================================

//! ## Overview
//! Reports are the JSON payloads printed by `evaluate` and the session
//! `status` command. They are derived on demand and never stored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use access_gate_core::GateConfig;
use access_gate_core::GatePhase;
use access_gate_core::GateVisualState;
use access_gate_core::OverlayView;
use access_gate_core::PolicyEvaluator;
use access_gate_core::RuleKind;
use access_gate_core::UserId;
use serde::Serialize;

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Policy evaluation for a single actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationReport {
    /// Evaluated actor.
    pub actor: Option<UserId>,
    /// True when a global exemption matched.
    pub globally_exempt: bool,
    /// Derived visual state.
    pub visual_state: GateVisualState,
    /// Rules restricting the actor, in evaluation order.
    pub rules: Vec<RuleKind>,
}

impl EvaluationReport {
    /// Evaluates `config` for `actor`.
    #[must_use]
    pub fn evaluate(config: &GateConfig, actor: Option<UserId>) -> Self {
        let policy = PolicyEvaluator::new(config);
        Self {
            globally_exempt: policy.is_globally_exempt(actor.as_ref()),
            visual_state: policy.visual_state(actor.as_ref()),
            rules: policy.applicable_rules(actor.as_ref()),
            actor,
        }
    }
}

// ============================================================================
// SECTION: Status
// ============================================================================

/// Snapshot of an interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Current actor.
    pub actor: Option<UserId>,
    /// Overlay view at the session clock.
    pub view: OverlayView,
    /// Machine phase at the session clock.
    pub phase: GatePhase,
    /// Reported layout size.
    pub size: u32,
    /// Rules restricting the actor.
    pub rules: Vec<RuleKind>,
}
