// crates/access-gate-core/src/runtime/policy.rs
// ============================================================================
// Module: Access Gate Policy Evaluation
// Description: Pure restriction-rule evaluation against an actor identity.
// Purpose: Decide which rules restrict an actor and derive the visual state.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! A rule applies to an actor when it is configured and the actor is not in
//! its exemption list. Global exemptions are checked first and short-circuit
//! every per-rule evaluation, including `hide`. Evaluation is pure and cheap
//! enough to repeat on every render.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::GateConfig;
use crate::core::GateVisualState;
use crate::core::RestrictionRule;
use crate::core::RuleKind;
use crate::core::UserId;
use crate::core::is_exempt;

// ============================================================================
// SECTION: Rule Evaluation
// ============================================================================

/// Returns true when the rule is configured and does not exempt the actor.
#[must_use]
pub fn applies<R: RestrictionRule>(rule: Option<&R>, actor: Option<&UserId>) -> bool {
    rule.is_some_and(|rule| !is_exempt(rule.exemptions(), actor))
}

// ============================================================================
// SECTION: Policy Evaluator
// ============================================================================

/// Evaluates a gate configuration against actor identities.
#[derive(Debug, Clone, Copy)]
pub struct PolicyEvaluator<'a> {
    /// Configuration under evaluation.
    config: &'a GateConfig,
}

impl<'a> PolicyEvaluator<'a> {
    /// Creates an evaluator over the provided configuration.
    #[must_use]
    pub const fn new(config: &'a GateConfig) -> Self {
        Self {
            config,
        }
    }

    /// Returns true when the actor matches a global exemption.
    #[must_use]
    pub fn is_globally_exempt(&self, actor: Option<&UserId>) -> bool {
        self.config.is_globally_exempt(actor)
    }

    /// Returns true when the rule of the given kind restricts the actor.
    ///
    /// Global exemptions are not consulted here.
    #[must_use]
    pub fn applies(&self, kind: RuleKind, actor: Option<&UserId>) -> bool {
        let restrictions = &self.config.restrictions;
        match kind {
            RuleKind::Hide => applies(restrictions.hide.as_ref(), actor),
            RuleKind::Block => applies(restrictions.block.as_ref(), actor),
            RuleKind::Pin => applies(restrictions.pin.as_ref(), actor),
            RuleKind::Confirm => applies(restrictions.confirm.as_ref(), actor),
        }
    }

    /// Lists the rules restricting the actor, in evaluation order.
    ///
    /// Empty when the actor is globally exempt.
    #[must_use]
    pub fn applicable_rules(&self, actor: Option<&UserId>) -> Vec<RuleKind> {
        if self.is_globally_exempt(actor) {
            return Vec::new();
        }
        RuleKind::ALL.into_iter().filter(|kind| self.applies(*kind, actor)).collect()
    }

    /// Derives the visual state for the actor.
    #[must_use]
    pub fn visual_state(&self, actor: Option<&UserId>) -> GateVisualState {
        if self.is_globally_exempt(actor) {
            return GateVisualState::Unlocked;
        }
        if self.applies(RuleKind::Hide, actor) {
            return GateVisualState::Hidden;
        }
        let restricted = [RuleKind::Block, RuleKind::Pin, RuleKind::Confirm]
            .into_iter()
            .any(|kind| self.applies(kind, actor));
        if restricted {
            GateVisualState::Locked {
                blocked: self.applies(RuleKind::Block, actor),
            }
        } else {
            GateVisualState::Unlocked
        }
    }
}
