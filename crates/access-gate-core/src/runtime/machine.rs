// crates/access-gate-core/src/runtime/machine.rs
// ============================================================================
// Module: Access Gate State Machine
// Description: Unlock attempt sequencing with cool-down and reveal deadlines.
// Purpose: Drive block/pin/confirm checks from a single unlock trigger.
// Dependencies: crate::core, crate::runtime::policy, serde
// ============================================================================

//! ## Overview
//! The machine owns only the transient phase of an attempt. Lock state is
//! re-derived from configuration and actor on every render, so a successful
//! unlock is never remembered past its reveal window.
//!
//! Attempts are step driven: `begin_attempt` either finishes the attempt or
//! returns a prompt request, and the matching `resolve_*` call continues it.
//! Only one attempt may be in flight; triggers arriving while a prompt is
//! pending or a timer is running are ignored and leave the deadline intact.
//!
//! ## Invariants
//! - Timers are deadlines stored in the phase; replacing the phase cancels them.
//! - Every failure path ends locked.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::ConfirmRule;
use crate::core::DEFAULT_CONFIRM_TEXT;
use crate::core::DEFAULT_PIN_PROMPT;
use crate::core::GateConfig;
use crate::core::GateTimings;
use crate::core::PinRule;
use crate::core::RuleKind;
use crate::core::Timestamp;
use crate::core::UserId;
use crate::runtime::policy::PolicyEvaluator;

// ============================================================================
// SECTION: Phases and Steps
// ============================================================================

/// Transient phase of the unlock interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GatePhase {
    /// Accepting the unlock trigger.
    Ready,
    /// Waiting for a pin value.
    AwaitingPin,
    /// Waiting for a yes/no confirmation.
    AwaitingConfirmation,
    /// Invalid-input flash until the deadline.
    Invalid {
        /// Cool-down deadline.
        until: Timestamp,
    },
    /// Overlay click-through until the deadline.
    Open {
        /// Reveal deadline.
        until: Timestamp,
    },
}

impl GatePhase {
    /// Returns true while a prompt is outstanding.
    #[must_use]
    pub const fn is_awaiting_prompt(self) -> bool {
        matches!(self, Self::AwaitingPin | Self::AwaitingConfirmation)
    }
}

/// Result of one attempt step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum AttemptStep {
    /// Trigger dropped: another attempt is in flight or nothing is locked.
    Ignored,
    /// Block rule rejected the attempt.
    Rejected {
        /// Explanation to show the actor, if configured.
        message: Option<String>,
    },
    /// A pin value must be requested.
    PromptPin {
        /// Prompt label.
        prompt: String,
    },
    /// A confirmation must be requested.
    PromptConfirmation {
        /// Confirmation message.
        message: String,
    },
    /// Pin missing or wrong.
    Invalid,
    /// Confirmation declined.
    Declined,
    /// All applicable rules passed.
    Opened,
}

impl AttemptStep {
    /// Returns true when the step ends the attempt.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::PromptPin { .. } | Self::PromptConfirmation { .. })
    }
}

/// Timer that elapsed during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerExpiry {
    /// Invalid cool-down ended.
    CooldownElapsed,
    /// Reveal window ended.
    RevealElapsed,
}

// ============================================================================
// SECTION: Gate Machine
// ============================================================================

/// Unlock attempt state machine.
#[derive(Debug, Clone)]
pub struct GateMachine {
    /// Timing windows.
    timings: GateTimings,
    /// Current phase.
    phase: GatePhase,
}

impl GateMachine {
    /// Creates a machine in the ready phase.
    #[must_use]
    pub const fn new(timings: GateTimings) -> Self {
        Self {
            timings,
            phase: GatePhase::Ready,
        }
    }

    /// Returns the timing windows.
    #[must_use]
    pub const fn timings(&self) -> GateTimings {
        self.timings
    }

    /// Returns the stored phase without applying deadlines.
    #[must_use]
    pub const fn phase(&self) -> GatePhase {
        self.phase
    }

    /// Returns the phase as observed at `now`; elapsed deadlines read as ready.
    #[must_use]
    pub const fn phase_at(&self, now: Timestamp) -> GatePhase {
        match self.phase {
            GatePhase::Invalid {
                until,
            }
            | GatePhase::Open {
                until,
            } if now.has_reached(until) => GatePhase::Ready,
            phase => phase,
        }
    }

    /// Expires a due timer.
    pub fn tick(&mut self, now: Timestamp) -> Option<TimerExpiry> {
        let expiry = match self.phase {
            GatePhase::Invalid {
                until,
            } if now.has_reached(until) => TimerExpiry::CooldownElapsed,
            GatePhase::Open {
                until,
            } if now.has_reached(until) => TimerExpiry::RevealElapsed,
            _ => return None,
        };
        self.phase = GatePhase::Ready;
        Some(expiry)
    }

    /// Starts an unlock attempt.
    pub fn begin_attempt(
        &mut self,
        config: &GateConfig,
        actor: Option<&UserId>,
        now: Timestamp,
    ) -> AttemptStep {
        self.tick(now);
        if self.phase != GatePhase::Ready {
            return AttemptStep::Ignored;
        }
        let policy = PolicyEvaluator::new(config);
        if !policy.visual_state(actor).is_locked() {
            return AttemptStep::Ignored;
        }
        if policy.applies(RuleKind::Block, actor) {
            self.enter_invalid(now);
            let message = config.restrictions.block.as_ref().and_then(|block| block.text.clone());
            return AttemptStep::Rejected {
                message,
            };
        }
        if policy.applies(RuleKind::Pin, actor) {
            let prompt =
                config.restrictions.pin.as_ref().map_or(DEFAULT_PIN_PROMPT, PinRule::prompt);
            self.phase = GatePhase::AwaitingPin;
            return AttemptStep::PromptPin {
                prompt: prompt.to_string(),
            };
        }
        self.after_pin(&policy, config, actor, now)
    }

    /// Continues an attempt with the actor's pin value.
    ///
    /// `None` means the prompt was dismissed and counts as a wrong pin.
    pub fn resolve_pin(
        &mut self,
        config: &GateConfig,
        actor: Option<&UserId>,
        input: Option<&str>,
        now: Timestamp,
    ) -> AttemptStep {
        if self.phase != GatePhase::AwaitingPin {
            return AttemptStep::Ignored;
        }
        let accepted = config.restrictions.pin.as_ref().is_some_and(|pin| pin.accepts(input));
        if !accepted {
            self.enter_invalid(now);
            return AttemptStep::Invalid;
        }
        let policy = PolicyEvaluator::new(config);
        self.after_pin(&policy, config, actor, now)
    }

    /// Continues an attempt with the actor's confirmation decision.
    pub fn resolve_confirmation(&mut self, accepted: bool, now: Timestamp) -> AttemptStep {
        if self.phase != GatePhase::AwaitingConfirmation {
            return AttemptStep::Ignored;
        }
        if !accepted {
            self.phase = GatePhase::Ready;
            return AttemptStep::Declined;
        }
        self.open(now)
    }

    /// Resolves a dismissed prompt: no pin value, or a declined confirmation.
    pub fn dismiss_prompt(&mut self, now: Timestamp) -> AttemptStep {
        match self.phase {
            GatePhase::AwaitingPin => {
                self.enter_invalid(now);
                AttemptStep::Invalid
            }
            GatePhase::AwaitingConfirmation => {
                self.phase = GatePhase::Ready;
                AttemptStep::Declined
            }
            _ => AttemptStep::Ignored,
        }
    }

    /// Restarts the cool-down from `now` after a rejection notice was shown.
    ///
    /// Returns true when the machine was in the invalid phase.
    pub fn acknowledge_rejection(&mut self, now: Timestamp) -> bool {
        if matches!(self.phase, GatePhase::Invalid { .. }) {
            self.enter_invalid(now);
            return true;
        }
        false
    }

    /// Drops an outstanding prompt without feedback.
    ///
    /// Returns true when a prompt was pending.
    pub fn abandon_prompt(&mut self) -> bool {
        if self.phase.is_awaiting_prompt() {
            self.phase = GatePhase::Ready;
            return true;
        }
        false
    }

    /// Requests confirmation when it applies, otherwise opens.
    fn after_pin(
        &mut self,
        policy: &PolicyEvaluator<'_>,
        config: &GateConfig,
        actor: Option<&UserId>,
        now: Timestamp,
    ) -> AttemptStep {
        if policy.applies(RuleKind::Confirm, actor) {
            let message = config
                .restrictions
                .confirm
                .as_ref()
                .map_or(DEFAULT_CONFIRM_TEXT, ConfirmRule::message);
            self.phase = GatePhase::AwaitingConfirmation;
            return AttemptStep::PromptConfirmation {
                message: message.to_string(),
            };
        }
        self.open(now)
    }

    /// Enters the invalid phase for the cool-down window.
    fn enter_invalid(&mut self, now: Timestamp) {
        self.phase = GatePhase::Invalid {
            until: now.saturating_add(self.timings.invalid_cooldown()),
        };
    }

    /// Enters the open phase for the reveal window.
    fn open(&mut self, now: Timestamp) -> AttemptStep {
        self.phase = GatePhase::Open {
            until: now.saturating_add(self.timings.reveal_window()),
        };
        AttemptStep::Opened
    }
}
