// crates/access-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Access Gate Runtime
// Description: Policy evaluation, unlock state machine, and overlay adapter.
// Purpose: Execute gate behavior against host-supplied identity and time.
// Dependencies: crate::{audit, core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules compose top-down: the policy evaluator decides which rules
//! restrict an actor, the machine sequences unlock attempts, and the overlay
//! adapter exposes the result to the host.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod machine;
pub mod overlay;
pub mod policy;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use machine::AttemptStep;
pub use machine::GateMachine;
pub use machine::GatePhase;
pub use machine::TimerExpiry;
pub use overlay::GateError;
pub use overlay::OverlayAdapter;
pub use policy::PolicyEvaluator;
pub use policy::applies;
