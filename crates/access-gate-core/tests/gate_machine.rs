// crates/access-gate-core/tests/gate_machine.rs
// ============================================================================
// Module: Gate Machine Tests
// Description: Unlock attempt sequencing, deadlines, and trigger guarding.
// Purpose: Ensure every failure path ends locked and timers cannot overlap.
// Dependencies: access-gate-core, serde_json
// ============================================================================

//! ## Overview
//! Drives the step API directly with explicit timestamps to cover block, pin,
//! and confirm paths, dismissal, and the single-attempt guard.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use access_gate_core::AttemptStep;
use access_gate_core::DEFAULT_CONFIRM_TEXT;
use access_gate_core::DEFAULT_PIN_PROMPT;
use access_gate_core::GateMachine;
use access_gate_core::GatePhase;
use access_gate_core::GateTimings;
use access_gate_core::TimerExpiry;
use access_gate_core::Timestamp;
use common::content;
use common::gate;
use common::user;
use serde_json::json;

fn at(millis: u64) -> Timestamp {
    Timestamp::from_millis(millis)
}

fn machine() -> GateMachine {
    GateMachine::new(GateTimings::default())
}

// ============================================================================
// SECTION: Block
// ============================================================================

#[test]
fn block_rejects_with_message_and_cools_down() {
    let config = gate(json!({
        "content": content(),
        "restrictions": {"block": {"text": "Maintenance"}, "pin": {"code": "1"}}
    }));
    let mut machine = machine();
    let step = machine.begin_attempt(&config, Some(&user("guest")), at(1_000));
    assert_eq!(
        step,
        AttemptStep::Rejected {
            message: Some("Maintenance".to_string())
        }
    );
    assert_eq!(
        machine.phase(),
        GatePhase::Invalid {
            until: at(4_000)
        }
    );
    assert_eq!(machine.tick(at(3_999)), None);
    assert_eq!(machine.tick(at(4_000)), Some(TimerExpiry::CooldownElapsed));
    assert_eq!(machine.phase(), GatePhase::Ready);
}

#[test]
fn acknowledged_rejection_restarts_cooldown() {
    let config = gate(json!({"content": content(), "restrictions": {"block": {"text": "No"}}}));
    let mut machine = machine();
    machine.begin_attempt(&config, None, at(0));
    assert!(machine.acknowledge_rejection(at(2_500)));
    assert_eq!(
        machine.phase(),
        GatePhase::Invalid {
            until: at(5_500)
        }
    );
    assert_eq!(machine.tick(at(5_500)), Some(TimerExpiry::CooldownElapsed));
    assert!(!machine.acknowledge_rejection(at(6_000)));
    assert_eq!(machine.phase(), GatePhase::Ready);
}

#[test]
fn block_is_never_satisfiable() {
    let config = gate(json!({"content": content(), "restrictions": {"block": {}}}));
    let mut machine = machine();
    let mut now = 0;
    for _ in 0 .. 5 {
        let step = machine.begin_attempt(&config, None, at(now));
        assert_eq!(
            step,
            AttemptStep::Rejected {
                message: None
            }
        );
        now += 3_000;
        machine.tick(at(now));
        assert_eq!(machine.phase(), GatePhase::Ready);
    }
}

// ============================================================================
// SECTION: Pin
// ============================================================================

#[test]
fn correct_pin_opens_for_reveal_window() {
    let config = gate(json!({"content": content(), "restrictions": {"pin": {"code": "1234"}}}));
    let mut machine = machine();
    let step = machine.begin_attempt(&config, None, at(0));
    assert_eq!(
        step,
        AttemptStep::PromptPin {
            prompt: DEFAULT_PIN_PROMPT.to_string()
        }
    );
    assert_eq!(machine.phase(), GatePhase::AwaitingPin);
    let step = machine.resolve_pin(&config, None, Some("1234"), at(200));
    assert_eq!(step, AttemptStep::Opened);
    assert_eq!(
        machine.phase(),
        GatePhase::Open {
            until: at(5_200)
        }
    );
    assert_eq!(machine.tick(at(5_200)), Some(TimerExpiry::RevealElapsed));
}

#[test]
fn wrong_or_missing_pin_goes_invalid() {
    let config = gate(json!({
        "content": content(),
        "restrictions": {"pin": {"code": "1234", "text": "Code please"}}
    }));
    for input in [Some("0000"), None, Some(" 1234")] {
        let mut machine = machine();
        let step = machine.begin_attempt(&config, None, at(0));
        assert_eq!(
            step,
            AttemptStep::PromptPin {
                prompt: "Code please".to_string()
            }
        );
        assert_eq!(machine.resolve_pin(&config, None, input, at(10)), AttemptStep::Invalid);
        assert_eq!(
            machine.phase(),
            GatePhase::Invalid {
                until: at(3_010)
            }
        );
    }
}

#[test]
fn pin_exempt_actor_skips_to_confirmation() {
    let config = gate(json!({
        "content": content(),
        "restrictions": {
            "pin": {"code": "1", "exemptions": [{"user": "alice"}]},
            "confirm": {"text": "Really?"}
        }
    }));
    let mut machine = machine();
    let step = machine.begin_attempt(&config, Some(&user("alice")), at(0));
    assert_eq!(
        step,
        AttemptStep::PromptConfirmation {
            message: "Really?".to_string()
        }
    );
}

#[test]
fn pin_then_confirm_sequence() {
    let config = gate(json!({
        "content": content(),
        "restrictions": {"pin": {"code": "77"}, "confirm": {}}
    }));
    let mut machine = machine();
    machine.begin_attempt(&config, None, at(0));
    let step = machine.resolve_pin(&config, None, Some("77"), at(5));
    assert_eq!(
        step,
        AttemptStep::PromptConfirmation {
            message: DEFAULT_CONFIRM_TEXT.to_string()
        }
    );
    assert_eq!(machine.resolve_confirmation(true, at(6)), AttemptStep::Opened);
}

// ============================================================================
// SECTION: Confirm
// ============================================================================

#[test]
fn declined_confirmation_returns_to_ready_without_flash() {
    let config = gate(json!({"content": content(), "restrictions": {"confirm": {}}}));
    let mut machine = machine();
    machine.begin_attempt(&config, None, at(0));
    assert_eq!(machine.resolve_confirmation(false, at(1)), AttemptStep::Declined);
    assert_eq!(machine.phase(), GatePhase::Ready);
    assert_eq!(machine.tick(at(10_000)), None);
}

#[test]
fn dismissed_prompts_follow_their_failure_paths() {
    let pin = gate(json!({"content": content(), "restrictions": {"pin": {"code": "1"}}}));
    let mut machine = machine();
    machine.begin_attempt(&pin, None, at(0));
    assert_eq!(machine.dismiss_prompt(at(1)), AttemptStep::Invalid);
    assert!(matches!(machine.phase(), GatePhase::Invalid { .. }));

    let confirm = gate(json!({"content": content(), "restrictions": {"confirm": {}}}));
    let mut machine = self::machine();
    machine.begin_attempt(&confirm, None, at(0));
    assert_eq!(machine.dismiss_prompt(at(1)), AttemptStep::Declined);
    assert_eq!(machine.phase(), GatePhase::Ready);
    assert_eq!(machine.dismiss_prompt(at(2)), AttemptStep::Ignored);
}

// ============================================================================
// SECTION: Guarding
// ============================================================================

#[test]
fn unrestricted_gate_ignores_attempts() {
    let config = gate(json!({"content": content()}));
    let mut machine = machine();
    assert_eq!(machine.begin_attempt(&config, None, at(0)), AttemptStep::Ignored);
    assert_eq!(machine.phase(), GatePhase::Ready);
}

#[test]
fn triggers_during_cooldown_do_not_extend_deadline() {
    let config = gate(json!({"content": content(), "restrictions": {"block": {}}}));
    let mut machine = machine();
    machine.begin_attempt(&config, None, at(0));
    assert_eq!(machine.begin_attempt(&config, None, at(2_000)), AttemptStep::Ignored);
    assert_eq!(
        machine.phase(),
        GatePhase::Invalid {
            until: at(3_000)
        }
    );
    assert!(matches!(machine.begin_attempt(&config, None, at(3_000)), AttemptStep::Rejected { .. }));
}

#[test]
fn triggers_during_prompt_or_reveal_are_ignored() {
    let config = gate(json!({"content": content(), "restrictions": {"pin": {"code": "5"}}}));
    let mut machine = machine();
    machine.begin_attempt(&config, None, at(0));
    assert_eq!(machine.begin_attempt(&config, None, at(1)), AttemptStep::Ignored);
    assert_eq!(machine.phase(), GatePhase::AwaitingPin);
    machine.resolve_pin(&config, None, Some("5"), at(2));
    assert_eq!(machine.begin_attempt(&config, None, at(4_000)), AttemptStep::Ignored);
    assert_eq!(
        machine.phase(),
        GatePhase::Open {
            until: at(5_002)
        }
    );
}

#[test]
fn stray_resolutions_are_ignored() {
    let config = gate(json!({"content": content(), "restrictions": {"pin": {"code": "5"}}}));
    let mut machine = machine();
    assert_eq!(machine.resolve_pin(&config, None, Some("5"), at(0)), AttemptStep::Ignored);
    assert_eq!(machine.resolve_confirmation(true, at(0)), AttemptStep::Ignored);
    assert_eq!(machine.phase(), GatePhase::Ready);
}

#[test]
fn phase_at_reads_elapsed_deadlines_as_ready() {
    let config = gate(json!({"content": content(), "restrictions": {"block": {}}}));
    let mut machine = machine();
    machine.begin_attempt(&config, None, at(0));
    assert!(matches!(machine.phase_at(at(2_999)), GatePhase::Invalid { .. }));
    assert_eq!(machine.phase_at(at(3_000)), GatePhase::Ready);
    assert!(matches!(machine.phase(), GatePhase::Invalid { .. }));
}

#[test]
fn custom_timings_are_honored() {
    let timings = GateTimings::from_millis(100, 250).unwrap();
    let config = gate(json!({"content": content(), "restrictions": {"confirm": {}}}));
    let mut machine = GateMachine::new(timings);
    machine.begin_attempt(&config, None, at(0));
    machine.resolve_confirmation(true, at(10));
    assert_eq!(
        machine.phase(),
        GatePhase::Open {
            until: at(260)
        }
    );
}

#[test]
fn timings_reject_invalid_ordering() {
    assert!(GateTimings::from_millis(5_000, 3_000).is_err());
    assert!(GateTimings::from_millis(3_000, 3_000).is_err());
    assert!(GateTimings::from_millis(0, 3_000).is_err());
    assert!(GateTimings::from_millis(3_000, 5_000).is_ok());
}
