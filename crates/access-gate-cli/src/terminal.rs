// crates/access-gate-cli/src/terminal.rs
// ============================================================================
// Module: Terminal Host
// Description: Line-oriented prompt surface and placeholder widget.
// Purpose: Let the gate run in a terminal without a rendering toolkit.
// Dependencies: access-gate-core
// ============================================================================

//! ## Overview
//! The terminal surface answers pin and confirmation prompts from a line
//! reader and writes notices to a line writer. End of input dismisses a
//! prompt. The terminal widget stands in for the wrapped content: it keeps
//! the forwarded actor and reports the size named in the content config.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::BufRead;
use std::io::Write;

use access_gate_core::ContentConfig;
use access_gate_core::EmbeddedWidget;
use access_gate_core::InteractionSurface;
use access_gate_core::UserId;
use access_gate_core::WidgetError;
use access_gate_core::WidgetFactory;

// ============================================================================
// SECTION: Surface
// ============================================================================

/// Prompt surface over a line reader and writer.
pub struct TerminalSurface<R, W> {
    /// Answer source.
    input: R,
    /// Prompt and notice sink.
    output: W,
}

impl<R: BufRead, W: Write> TerminalSurface<R, W> {
    /// Creates a surface.
    pub const fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
        }
    }

    /// Writes a prompt without a newline and reads one answer line.
    ///
    /// Returns `None` at end of input, when reading fails, or when the prompt
    /// could not be shown.
    fn ask(&mut self, prompt: &str) -> Option<String> {
        write!(self.output, "{prompt}").and_then(|()| self.output.flush()).ok()?;
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                let _ = writeln!(self.output);
                None
            }
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl<R: BufRead, W: Write> InteractionSurface for TerminalSurface<R, W> {
    fn notify(&mut self, message: &str) {
        let _ = writeln!(self.output, "! {message}");
    }

    fn request_pin(&mut self, prompt: &str) -> Option<String> {
        self.ask(&format!("{prompt}: "))
    }

    fn request_confirmation(&mut self, message: &str) -> bool {
        self.ask(&format!("{message} [y/N]: ")).is_some_and(|answer| {
            let answer = answer.trim();
            answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
        })
    }
}

// ============================================================================
// SECTION: Widget
// ============================================================================

/// Placeholder for the wrapped content in a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalWidget {
    /// Display label.
    title: String,
    /// Size hint.
    size: u32,
    /// Last actor forwarded by the gate.
    actor: Option<UserId>,
}

impl TerminalWidget {
    /// Returns the display label.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the last forwarded actor.
    #[must_use]
    pub const fn actor(&self) -> Option<&UserId> {
        self.actor.as_ref()
    }
}

impl EmbeddedWidget for TerminalWidget {
    fn set_actor(&mut self, actor: Option<&UserId>) {
        self.actor = actor.cloned();
    }

    fn reported_size(&self) -> u32 {
        self.size
    }
}

/// Builds [`TerminalWidget`]s from content configuration.
///
/// Content must name a `type`; `title` and `size` are optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalWidgetFactory;

impl WidgetFactory for TerminalWidgetFactory {
    type Widget = TerminalWidget;

    fn create(&self, content: &ContentConfig) -> Result<Self::Widget, WidgetError> {
        let Some(kind) = content.str_field("type") else {
            return Err(WidgetError::Unsupported("content requires a string type".to_string()));
        };
        let size = match content.as_value().get("size") {
            None => 1,
            Some(value) => value
                .as_u64()
                .and_then(|size| u32::try_from(size).ok())
                .ok_or_else(|| {
                    WidgetError::CreationFailed("size must be a non-negative integer".to_string())
                })?,
        };
        Ok(TerminalWidget {
            title: content.str_field("title").unwrap_or(kind).to_string(),
            size,
            actor: None,
        })
    }
}
