// crates/access-gate-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and the CLI.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for Access Gate host configuration. The output is
//! static and must itself pass validation.

/// Returns a canonical example `access-gate.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"# Users listed here bypass the overlay entirely.
[[gate.exemptions]]
user = "owner"

# Wrapped widget configuration, passed to the host widget factory.
[gate.content]
type = "entities"
title = "Garage"
size = 3

[gate.restrictions.pin]
code = "1234"
text = "Garage pin"

[[gate.restrictions.pin.exemptions]]
user = "family"

[gate.restrictions.confirm]
text = "Open the garage door?"

[timings]
invalid_cooldown_ms = 3000
reveal_window_ms = 5000

[audit]
sink = "stderr"
"#,
    )
}
