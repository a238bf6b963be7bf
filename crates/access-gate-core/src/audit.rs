// crates/access-gate-core/src/audit.rs
// ============================================================================
// Module: Access Gate Audit Logging
// Description: Structured audit events for gate configuration and attempts.
// Purpose: Emit redacted JSON-line audit logs without a logging framework.
// Dependencies: crate::core, serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events record configuration changes, unlock attempts, and timer
//! expiry. Sinks are intentionally lightweight so hosts can route events to
//! their own logging pipeline. Pin values are never recorded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::RuleKind;
use crate::core::Timestamp;
use crate::core::UserId;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Audit outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateAuditOutcome {
    /// Configuration accepted and widget mounted.
    ConfigApplied,
    /// Configuration rejected; previous configuration kept.
    ConfigRejected,
    /// Trigger dropped.
    AttemptIgnored,
    /// Block rule rejected the attempt.
    AttemptRejected,
    /// Prompt issued to the actor.
    PromptIssued,
    /// Pin missing or wrong.
    PinMismatch,
    /// Confirmation declined.
    ConfirmationDeclined,
    /// Gate opened for the reveal window.
    Opened,
    /// Invalid cool-down elapsed.
    CooldownElapsed,
    /// Reveal window elapsed.
    RevealElapsed,
}

/// Gate audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct GateAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Host-supplied gate time in milliseconds.
    pub gate_time_ms: u64,
    /// Actor identity when known.
    pub actor: Option<UserId>,
    /// Event outcome.
    pub outcome: GateAuditOutcome,
    /// Rules restricting the actor at the time of the event.
    pub rules: Vec<RuleKind>,
    /// Optional detail message.
    pub detail: Option<String>,
}

/// Inputs required to construct a gate audit event.
pub struct GateAuditEventParams {
    /// Host-supplied gate time.
    pub now: Timestamp,
    /// Actor identity when known.
    pub actor: Option<UserId>,
    /// Event outcome.
    pub outcome: GateAuditOutcome,
    /// Rules restricting the actor.
    pub rules: Vec<RuleKind>,
    /// Optional detail message.
    pub detail: Option<String>,
}

impl GateAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: GateAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "gate_audit",
            timestamp_ms,
            gate_time_ms: params.now.as_millis(),
            actor: params.actor,
            outcome: params.outcome,
            rules: params.rules,
            detail: params.detail,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for gate events.
pub trait GateAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &GateAuditEvent);
}

/// Audit sink that discards events.
pub struct NoopAuditSink;

impl GateAuditSink for NoopAuditSink {
    fn record(&self, _event: &GateAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl GateAuditSink for StderrAuditSink {
    fn record(&self, event: &GateAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl GateAuditSink for FileAuditSink {
    fn record(&self, event: &GateAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}
