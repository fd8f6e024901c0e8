// crates/bulkhead-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for bulkhead config tests.
// Purpose: Reduce duplication across integration tests for bulkhead-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use bulkhead_config::BulkheadConfig;
use bulkhead_config::ConfigError;

/// Checks that `result` failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

/// Returns a config with every field moved off its default.
pub fn tuned_config() -> Result<BulkheadConfig, ConfigError> {
    Ok(BulkheadConfig::custom()
        .max_concurrent_calls(4)?
        .max_wait_duration(time::Duration::milliseconds(150))?
        .writable_stack_trace_enabled(false)
        .fair_call_handling_strategy_enabled(false)
        .build())
}
