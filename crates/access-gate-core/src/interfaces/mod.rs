// crates/access-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Access Gate Interfaces
// Description: Host-facing collaborator traits for widgets and prompts.
// Purpose: Define the contract surfaces used by the overlay adapter.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Interfaces describe how the gate integrates with its host without knowing
//! how anything is drawn. The widget factory mounts the wrapped widget, the
//! widget receives actor identity and reports its size, and the interaction
//! surface issues every actor-visible prompt. Implementations must treat a
//! dismissed prompt as "no value" or "declined".

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::ContentConfig;
use crate::core::UserId;

// ============================================================================
// SECTION: Embedded Widget
// ============================================================================

/// Mountable widget wrapped by the gate.
pub trait EmbeddedWidget {
    /// Forwards the current actor identity to the widget.
    fn set_actor(&mut self, actor: Option<&UserId>);

    /// Returns the widget's layout size hint.
    fn reported_size(&self) -> u32;
}

impl<W: EmbeddedWidget + ?Sized> EmbeddedWidget for Box<W> {
    fn set_actor(&mut self, actor: Option<&UserId>) {
        (**self).set_actor(actor);
    }

    fn reported_size(&self) -> u32 {
        (**self).reported_size()
    }
}

// ============================================================================
// SECTION: Widget Factory
// ============================================================================

/// Widget factory errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// Factory does not know how to build the requested widget.
    #[error("unsupported widget: {0}")]
    Unsupported(String),
    /// Factory failed to build the widget.
    #[error("widget creation failed: {0}")]
    CreationFailed(String),
}

/// External factory that instantiates the wrapped widget.
pub trait WidgetFactory {
    /// Widget type produced by this factory.
    type Widget: EmbeddedWidget;

    /// Builds a widget from its opaque configuration.
    ///
    /// # Errors
    ///
    /// Returns [`WidgetError`] when the widget cannot be created.
    fn create(&self, content: &ContentConfig) -> Result<Self::Widget, WidgetError>;
}

// ============================================================================
// SECTION: Interaction Surface
// ============================================================================

/// Actor-facing prompt surface.
///
/// Each call is a synchronous suspension point: the gate does not proceed
/// until the call returns.
pub trait InteractionSurface {
    /// Shows an informational message and waits for acknowledgment.
    fn notify(&mut self, message: &str);

    /// Requests a pin value; `None` when the prompt was dismissed.
    fn request_pin(&mut self, prompt: &str) -> Option<String>;

    /// Requests a yes/no decision; dismissal counts as `false`.
    fn request_confirmation(&mut self, message: &str) -> bool;
}
