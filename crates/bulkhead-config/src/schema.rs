// crates/bulkhead-config/src/schema.rs
// ============================================================================
// Module: Config Schema
// Description: JSON schema builder for bulkhead configuration documents.
// Purpose: Provide a canonical validation schema for config tooling.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The schema describes the flat [`crate::BulkheadConfigRecord`] shape used by
//! TOML files and the serde encoding. Defaults come from the `DEFAULT_*`
//! constants so the two cannot drift.

use serde_json::Value;
use serde_json::json;

use crate::config::DEFAULT_FAIR_CALL_HANDLING_ENABLED;
use crate::config::DEFAULT_MAX_CONCURRENT_CALLS;
use crate::config::DEFAULT_MAX_WAIT_DURATION;
use crate::config::DEFAULT_WRITABLE_STACK_TRACE_ENABLED;

/// Returns the JSON schema for a bulkhead configuration document.
#[must_use]
pub fn config_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "bulkhead://schemas/bulkhead-config.schema.json",
        "title": "Bulkhead Configuration",
        "description": "Concurrency limits and admission policy for a bulkhead.",
        "type": "object",
        "properties": {
            "max_concurrent_calls": {
                "type": "integer",
                "minimum": 0,
                "maximum": i32::MAX,
                "default": DEFAULT_MAX_CONCURRENT_CALLS,
                "description": "Maximum number of calls admitted at once. Zero keeps the bulkhead saturated."
            },
            "max_wait_duration_ms": {
                "type": "integer",
                "minimum": 0,
                "description": "Maximum time in milliseconds a caller waits for entry. Zero rejects immediately when full."
            },
            "max_wait_duration": {
                "type": "object",
                "description": "Exact maximum wait for entry as whole seconds plus nanoseconds.",
                "properties": {
                    "secs": { "type": "integer", "minimum": 0, "maximum": i64::MAX },
                    "nanos": { "type": "integer", "minimum": 0, "maximum": 999_999_999, "default": 0 }
                },
                "required": ["secs"],
                "additionalProperties": false,
                "default": {
                    "secs": DEFAULT_MAX_WAIT_DURATION.as_secs(),
                    "nanos": DEFAULT_MAX_WAIT_DURATION.subsec_nanos()
                }
            },
            "writable_stack_trace_enabled": {
                "type": "boolean",
                "default": DEFAULT_WRITABLE_STACK_TRACE_ENABLED,
                "description": "Whether rejection failures capture stack traces."
            },
            "fair_call_handling_enabled": {
                "type": "boolean",
                "default": DEFAULT_FAIR_CALL_HANDLING_ENABLED,
                "description": "Admit waiting callers first-in-first-out instead of allowing barging."
            }
        },
        "not": { "required": ["max_wait_duration", "max_wait_duration_ms"] },
        "additionalProperties": false
    })
}
