// crates/bulkhead-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payloads.
// Purpose: Deterministic examples for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for bulkhead configuration. Output is deterministic and
//! kept in sync with the schema by the artifact tests.

/// Returns a canonical example `bulkhead.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r"# Calls admitted at once; 0 keeps the bulkhead saturated.
max_concurrent_calls = 25
# Wait for entry when full; keep 0 for event-loop callers.
max_wait_duration_ms = 0
writable_stack_trace_enabled = true
fair_call_handling_enabled = true
",
    )
}
