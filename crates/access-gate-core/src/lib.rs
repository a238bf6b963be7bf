// crates/access-gate-core/src/lib.rs
// ============================================================================
// Module: Access Gate Core Library
// Description: Public API surface for the Access Gate core.
// Purpose: Expose restriction types, collaborator interfaces, and runtime helpers.
// Dependencies: crate::{audit, core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Access Gate core evaluates declarative restriction policies (hide, block,
//! pin, confirm) against the current actor and drives the overlay state
//! machine that sequences unlock attempts. It never renders the wrapped
//! widget; rendering, prompts, and identity are supplied by the host through
//! explicit interfaces. Every failure path leaves the gate locked.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use audit::FileAuditSink;
pub use audit::GateAuditEvent;
pub use audit::GateAuditEventParams;
pub use audit::GateAuditOutcome;
pub use audit::GateAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use interfaces::EmbeddedWidget;
pub use interfaces::InteractionSurface;
pub use interfaces::WidgetError;
pub use interfaces::WidgetFactory;
pub use runtime::AttemptStep;
pub use runtime::GateError;
pub use runtime::GateMachine;
pub use runtime::GatePhase;
pub use runtime::OverlayAdapter;
pub use runtime::PolicyEvaluator;
pub use runtime::TimerExpiry;
