// crates/access-gate-core/src/runtime/overlay.rs
// ============================================================================
// Module: Access Gate Overlay Adapter
// Description: Host boundary composing configuration, actor, widget, and machine.
// Purpose: Expose overlay view state and route clicks and prompts.
// Dependencies: crate::{audit, core, interfaces, runtime}, thiserror
// ============================================================================

//! ## Overview
//! The overlay adapter is the only component with side effects. It mounts
//! the wrapped widget through the factory, forwards actor identity changes
//! to it, issues prompts through the injected interaction surface, and
//! records audit events. Policy evaluation and the state machine stay pure.
//!
//! Until the host supplies its environment (the first `set_actor` call), the
//! gate renders hidden.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::audit::GateAuditEvent;
use crate::audit::GateAuditEventParams;
use crate::audit::GateAuditOutcome;
use crate::audit::GateAuditSink;
use crate::core::ConfigError;
use crate::core::GateConfig;
use crate::core::GateTimings;
use crate::core::GateVisualState;
use crate::core::LockAnimation;
use crate::core::OverlayView;
use crate::core::Timestamp;
use crate::core::UserId;
use crate::interfaces::EmbeddedWidget;
use crate::interfaces::InteractionSurface;
use crate::interfaces::WidgetError;
use crate::interfaces::WidgetFactory;
use crate::runtime::machine::AttemptStep;
use crate::runtime::machine::GateMachine;
use crate::runtime::machine::GatePhase;
use crate::runtime::machine::TimerExpiry;
use crate::runtime::policy::PolicyEvaluator;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while applying gate configuration.
#[derive(Debug, Error)]
pub enum GateError {
    /// Configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Widget factory failed.
    #[error(transparent)]
    Widget(#[from] WidgetError),
}

// ============================================================================
// SECTION: Overlay Adapter
// ============================================================================

/// Overlay presentation adapter for a single gate.
pub struct OverlayAdapter<F: WidgetFactory> {
    /// Factory used to mount the wrapped widget.
    factory: F,
    /// Audit sink.
    audit: Arc<dyn GateAuditSink>,
    /// Unlock state machine.
    machine: GateMachine,
    /// Active configuration.
    config: Option<GateConfig>,
    /// Mounted widget.
    widget: Option<F::Widget>,
    /// Current actor identity.
    actor: Option<UserId>,
    /// True once the host has supplied its environment.
    attached: bool,
}

impl<F: WidgetFactory> OverlayAdapter<F> {
    /// Creates an adapter with no configuration and no host environment.
    #[must_use]
    pub fn new(factory: F, audit: Arc<dyn GateAuditSink>, timings: GateTimings) -> Self {
        Self {
            factory,
            audit,
            machine: GateMachine::new(timings),
            config: None,
            widget: None,
            actor: None,
            attached: false,
        }
    }

    /// Applies a configuration and mounts its widget.
    ///
    /// A pending prompt is dropped. Running timers are kept.
    ///
    /// # Errors
    ///
    /// Returns [`GateError`] when validation or widget creation fails; the
    /// previous configuration stays in force.
    pub fn set_config(&mut self, config: GateConfig, now: Timestamp) -> Result<(), GateError> {
        if let Err(err) = config.validate() {
            self.record(now, GateAuditOutcome::ConfigRejected, Some(err.to_string()));
            return Err(err.into());
        }
        let content = config.content().ok_or(ConfigError::MissingContent)?;
        let mut widget = match self.factory.create(content) {
            Ok(widget) => widget,
            Err(err) => {
                self.record(now, GateAuditOutcome::ConfigRejected, Some(err.to_string()));
                return Err(err.into());
            }
        };
        if self.attached {
            widget.set_actor(self.actor.as_ref());
        }
        self.machine.abandon_prompt();
        self.config = Some(config);
        self.widget = Some(widget);
        self.record(now, GateAuditOutcome::ConfigApplied, None);
        Ok(())
    }

    /// Supplies the current actor identity from the host.
    ///
    /// The mounted widget is updated only when the identity changes.
    pub fn set_actor(&mut self, actor: Option<UserId>) {
        let changed = !self.attached || self.actor != actor;
        self.attached = true;
        self.actor = actor;
        if changed && let Some(widget) = self.widget.as_mut() {
            widget.set_actor(self.actor.as_ref());
        }
    }

    /// Derives the visual state from configuration and actor.
    #[must_use]
    pub fn visual_state(&self) -> GateVisualState {
        match &self.config {
            Some(config) if self.attached => {
                PolicyEvaluator::new(config).visual_state(self.actor.as_ref())
            }
            _ => GateVisualState::Hidden,
        }
    }

    /// Returns the overlay view at `now`.
    ///
    /// Rendering never mutates state; expired deadlines read as ready.
    #[must_use]
    pub fn render(&self, now: Timestamp) -> OverlayView {
        let phase = self.machine.phase_at(now);
        let animation = match phase {
            GatePhase::Invalid {
                ..
            } => Some(LockAnimation::Invalid),
            GatePhase::Open {
                ..
            } => Some(LockAnimation::FadeOut),
            GatePhase::Ready | GatePhase::AwaitingPin | GatePhase::AwaitingConfirmation => None,
        };
        OverlayView {
            state: self.visual_state(),
            animation,
            interactive: !matches!(phase, GatePhase::Open { .. }),
            awaiting_prompt: phase.is_awaiting_prompt(),
        }
    }

    /// Expires a due timer.
    pub fn tick(&mut self, now: Timestamp) -> Option<TimerExpiry> {
        let expiry = self.machine.tick(now)?;
        let outcome = match expiry {
            TimerExpiry::CooldownElapsed => GateAuditOutcome::CooldownElapsed,
            TimerExpiry::RevealElapsed => GateAuditOutcome::RevealElapsed,
        };
        self.record(now, outcome, None);
        Some(expiry)
    }

    /// Runs a complete unlock attempt, prompting through the surface.
    ///
    /// `now` is read again after every surface call, so cool-down and reveal
    /// deadlines start when the actor answers rather than at the click.
    pub fn click<S, N>(&mut self, surface: &mut S, mut now: N) -> AttemptStep
    where
        S: InteractionSurface + ?Sized,
        N: FnMut() -> Timestamp,
    {
        let mut step = self.begin_attempt(now());
        loop {
            step = match step {
                AttemptStep::Rejected {
                    message: Some(message),
                } => {
                    surface.notify(&message);
                    self.acknowledge_rejection(now());
                    return AttemptStep::Rejected {
                        message: Some(message),
                    };
                }
                AttemptStep::PromptPin {
                    prompt,
                } => {
                    let input = surface.request_pin(&prompt);
                    self.submit_pin(input.as_deref(), now())
                }
                AttemptStep::PromptConfirmation {
                    message,
                } => {
                    let accepted = surface.request_confirmation(&message);
                    self.submit_confirmation(accepted, now())
                }
                terminal => return terminal,
            };
        }
    }

    /// Starts an unlock attempt for hosts that resolve prompts asynchronously.
    pub fn begin_attempt(&mut self, now: Timestamp) -> AttemptStep {
        self.tick(now);
        let step = match &self.config {
            Some(config) if self.attached => {
                self.machine.begin_attempt(config, self.actor.as_ref(), now)
            }
            _ => AttemptStep::Ignored,
        };
        self.record_step(&step, now);
        step
    }

    /// Restarts the cool-down once the actor has acknowledged a rejection notice.
    ///
    /// Returns true when the gate was cooling down.
    pub fn acknowledge_rejection(&mut self, now: Timestamp) -> bool {
        self.machine.acknowledge_rejection(now)
    }

    /// Resolves a pending pin prompt.
    pub fn submit_pin(&mut self, input: Option<&str>, now: Timestamp) -> AttemptStep {
        let step = match &self.config {
            Some(config) => self.machine.resolve_pin(config, self.actor.as_ref(), input, now),
            None => AttemptStep::Ignored,
        };
        self.record_step(&step, now);
        step
    }

    /// Resolves a pending confirmation prompt.
    pub fn submit_confirmation(&mut self, accepted: bool, now: Timestamp) -> AttemptStep {
        let step = self.machine.resolve_confirmation(accepted, now);
        self.record_step(&step, now);
        step
    }

    /// Resolves a pending prompt the actor dismissed.
    pub fn dismiss_prompt(&mut self, now: Timestamp) -> AttemptStep {
        let step = self.machine.dismiss_prompt(now);
        self.record_step(&step, now);
        step
    }

    /// Returns the wrapped widget's size hint, never below 1.
    ///
    /// Falls back to 1 when no widget is mounted or the gate is hidden.
    #[must_use]
    pub fn reported_size(&self) -> u32 {
        if !self.visual_state().is_visible() {
            return 1;
        }
        self.widget.as_ref().map_or(1, |widget| widget.reported_size().max(1))
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> Option<&GateConfig> {
        self.config.as_ref()
    }

    /// Returns the current actor identity.
    #[must_use]
    pub const fn actor(&self) -> Option<&UserId> {
        self.actor.as_ref()
    }

    /// Returns the mounted widget.
    #[must_use]
    pub const fn widget(&self) -> Option<&F::Widget> {
        self.widget.as_ref()
    }

    /// Returns the stored machine phase.
    #[must_use]
    pub const fn phase(&self) -> GatePhase {
        self.machine.phase()
    }

    /// Records the audit event for an attempt step.
    fn record_step(&self, step: &AttemptStep, now: Timestamp) {
        let (outcome, detail) = match step {
            AttemptStep::Ignored => (GateAuditOutcome::AttemptIgnored, None),
            AttemptStep::Rejected {
                ..
            } => (GateAuditOutcome::AttemptRejected, None),
            AttemptStep::PromptPin {
                ..
            } => (GateAuditOutcome::PromptIssued, Some("pin".to_string())),
            AttemptStep::PromptConfirmation {
                ..
            } => (GateAuditOutcome::PromptIssued, Some("confirm".to_string())),
            AttemptStep::Invalid => (GateAuditOutcome::PinMismatch, None),
            AttemptStep::Declined => (GateAuditOutcome::ConfirmationDeclined, None),
            AttemptStep::Opened => (GateAuditOutcome::Opened, None),
        };
        self.record(now, outcome, detail);
    }

    /// Records an audit event against the current configuration and actor.
    fn record(&self, now: Timestamp, outcome: GateAuditOutcome, detail: Option<String>) {
        let rules = self
            .config
            .as_ref()
            .map(|config| PolicyEvaluator::new(config).applicable_rules(self.actor.as_ref()))
            .unwrap_or_default();
        let event = GateAuditEvent::new(GateAuditEventParams {
            now,
            actor: self.actor.clone(),
            outcome,
            rules,
            detail,
        });
        self.audit.record(&event);
    }
}
