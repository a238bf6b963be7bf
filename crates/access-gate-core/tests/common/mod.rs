// crates/access-gate-core/tests/common/mod.rs
// =============================================================================
// Module: Core Test Helpers
// Description: Fake widgets, scripted prompt surfaces, and recording sinks.
// Purpose: Reduce duplication across access-gate-core integration tests.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(clippy::unwrap_used, reason = "Test helpers lock uncontended mutexes.")]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use access_gate_core::ContentConfig;
use access_gate_core::EmbeddedWidget;
use access_gate_core::GateAuditEvent;
use access_gate_core::GateAuditOutcome;
use access_gate_core::GateAuditSink;
use access_gate_core::GateConfig;
use access_gate_core::GateTimings;
use access_gate_core::InteractionSurface;
use access_gate_core::OverlayAdapter;
use access_gate_core::UserId;
use access_gate_core::WidgetError;
use access_gate_core::WidgetFactory;
use serde_json::Value;
use serde_json::json;

// =============================================================================
// Widgets
// =============================================================================

/// Actor identities forwarded to mounted widgets, in order.
pub type ActorLog = Arc<Mutex<Vec<Option<UserId>>>>;

/// Widget that records forwarded actors and reports a fixed size.
pub struct FakeWidget {
    pub size: u32,
    pub actors: ActorLog,
}

impl EmbeddedWidget for FakeWidget {
    fn set_actor(&mut self, actor: Option<&UserId>) {
        self.actors.lock().unwrap().push(actor.cloned());
    }

    fn reported_size(&self) -> u32 {
        self.size
    }
}

/// Factory building [`FakeWidget`]s sized from the content `size` field.
#[derive(Default)]
pub struct FakeFactory {
    pub actors: ActorLog,
    pub created: Arc<Mutex<usize>>,
}

impl WidgetFactory for FakeFactory {
    type Widget = FakeWidget;

    fn create(&self, content: &ContentConfig) -> Result<Self::Widget, WidgetError> {
        if content.str_field("type") == Some("broken") {
            return Err(WidgetError::CreationFailed("broken widget".to_string()));
        }
        *self.created.lock().unwrap() += 1;
        let size = content.u64_field("size").and_then(|size| u32::try_from(size).ok()).unwrap_or(0);
        Ok(FakeWidget {
            size,
            actors: Arc::clone(&self.actors),
        })
    }
}

// =============================================================================
// Surfaces
// =============================================================================

/// Surface answering prompts from scripted queues.
#[derive(Default)]
pub struct ScriptedSurface {
    pub pins: VecDeque<Option<String>>,
    pub confirmations: VecDeque<bool>,
    pub notices: Vec<String>,
    pub pin_prompts: Vec<String>,
    pub confirm_prompts: Vec<String>,
}

impl ScriptedSurface {
    pub fn with_pin(pin: Option<&str>) -> Self {
        let mut surface = Self::default();
        surface.pins.push_back(pin.map(str::to_string));
        surface
    }

    pub fn with_confirmation(accepted: bool) -> Self {
        let mut surface = Self::default();
        surface.confirmations.push_back(accepted);
        surface
    }
}

impl InteractionSurface for ScriptedSurface {
    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn request_pin(&mut self, prompt: &str) -> Option<String> {
        self.pin_prompts.push(prompt.to_string());
        self.pins.pop_front().flatten()
    }

    fn request_confirmation(&mut self, message: &str) -> bool {
        self.confirm_prompts.push(message.to_string());
        self.confirmations.pop_front().unwrap_or(false)
    }
}

// =============================================================================
// Audit
// =============================================================================

/// Audit sink keeping every event in memory.
#[derive(Default)]
pub struct RecordingAuditSink {
    pub events: Mutex<Vec<GateAuditEvent>>,
}

impl RecordingAuditSink {
    pub fn outcomes(&self) -> Vec<GateAuditOutcome> {
        self.events.lock().unwrap().iter().map(|event| event.outcome).collect()
    }
}

impl GateAuditSink for RecordingAuditSink {
    fn record(&self, event: &GateAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

// =============================================================================
// Builders
// =============================================================================

/// Parses a gate config from JSON, panicking on invalid input.
pub fn gate(value: Value) -> GateConfig {
    GateConfig::from_json_value(value).unwrap()
}

/// Minimal content config.
pub fn content() -> Value {
    json!({"type": "entities", "size": 3})
}

/// Adapter wired to a fake factory and recording sink.
pub fn adapter(config: GateConfig) -> (OverlayAdapter<FakeFactory>, Arc<RecordingAuditSink>) {
    let sink = Arc::new(RecordingAuditSink::default());
    let mut adapter = OverlayAdapter::new(
        FakeFactory::default(),
        Arc::clone(&sink) as Arc<dyn GateAuditSink>,
        GateTimings::default(),
    );
    adapter.set_config(config, access_gate_core::Timestamp::ZERO).unwrap();
    (adapter, sink)
}

/// Builds a user identity.
pub fn user(id: &str) -> UserId {
    UserId::new(id)
}
