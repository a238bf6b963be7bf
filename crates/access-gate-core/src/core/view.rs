// crates/access-gate-core/src/core/view.rs
// ============================================================================
// Module: Access Gate View Types
// Description: Derived visual state and overlay view snapshots.
// Purpose: Describe what a host should draw without prescribing how.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Visual state is recomputed on every render from configuration and actor
//! identity; it is never stored. The overlay view layers the transient
//! animation of an in-flight attempt on top of it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Visual State
// ============================================================================

/// Derived gate visual state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GateVisualState {
    /// Nothing is rendered, neither overlay nor widget.
    Hidden,
    /// Widget is rendered without an overlay.
    Unlocked,
    /// Widget is rendered beneath the lock overlay.
    Locked {
        /// Advisory flag: the block rule applies to the actor.
        blocked: bool,
    },
}

impl GateVisualState {
    /// Returns true when the overlay is shown.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Locked { .. })
    }

    /// Returns true when anything is rendered.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Transient lock animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockAnimation {
    /// Blinking lock after a rejected or failed attempt.
    Invalid,
    /// Lock fading out after a successful attempt.
    FadeOut,
}

// ============================================================================
// SECTION: Overlay View
// ============================================================================

/// Snapshot of what the host should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayView {
    /// Derived visual state.
    #[serde(flatten)]
    pub state: GateVisualState,
    /// Active lock animation, if any.
    pub animation: Option<LockAnimation>,
    /// False while the overlay is click-through during the reveal window.
    pub interactive: bool,
    /// True while a pin or confirmation prompt is outstanding.
    pub awaiting_prompt: bool,
}
