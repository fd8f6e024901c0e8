//! Builder validation tests for bulkhead-config.
// crates/bulkhead-config/tests/builder_validation.rs
// =============================================================================
// Module: Builder Validation Tests
// Description: Validate setter preconditions, derivation, and snapshots.
// Purpose: Ensure invalid tunables are rejected at the call site.
// =============================================================================

use std::time::Duration;

use bulkhead_config::BulkheadConfig;
use bulkhead_config::BulkheadConfigBuilder;
use bulkhead_config::CallHandling;
use bulkhead_config::ConfigError;

mod common;

type TestResult = Result<(), String>;

#[test]
fn negative_capacity_rejected() -> TestResult {
    let mut builder = BulkheadConfig::custom();
    common::assert_invalid(
        builder.max_concurrent_calls(-1).map(|_| ()),
        "max_concurrent_calls must be an integer value >= 0",
    )?;
    Ok(())
}

#[test]
fn negative_capacity_error_is_invalid_argument() -> TestResult {
    let mut builder = BulkheadConfig::custom();
    match builder.max_concurrent_calls(i32::MIN) {
        Err(ConfigError::InvalidArgument {
            field: "max_concurrent_calls",
            ..
        }) => Ok(()),
        Err(other) => Err(format!("unexpected error {other}")),
        Ok(_) => Err("expected invalid argument".to_string()),
    }
}

#[test]
fn negative_wait_rejected() -> TestResult {
    let mut builder = BulkheadConfig::custom();
    common::assert_invalid(
        builder.max_wait_duration(time::Duration::milliseconds(-1)).map(|_| ()),
        "max_wait_duration must be a duration >= 0",
    )?;
    Ok(())
}

#[test]
fn sub_millisecond_negative_wait_rejected() -> TestResult {
    let mut builder = BulkheadConfig::custom();
    common::assert_invalid(
        builder.max_wait_duration(time::Duration::microseconds(-500)).map(|_| ()),
        "max_wait_duration",
    )?;
    Ok(())
}

#[test]
fn rejected_setter_leaves_builder_untouched() -> TestResult {
    let mut builder = BulkheadConfig::custom();
    builder.max_concurrent_calls(12).map_err(|err| err.to_string())?;
    let before = builder.clone();
    let _ = builder.max_concurrent_calls(-5);
    let _ = builder.max_wait_duration(time::Duration::seconds(-1));
    if builder != before {
        return Err("rejected setters mutated the builder".to_string());
    }
    if builder.build().max_concurrent_calls() != 12 {
        return Err("capacity should remain 12".to_string());
    }
    Ok(())
}

#[test]
fn zero_capacity_zero_wait_is_always_saturated_non_blocking() -> TestResult {
    let config = BulkheadConfig::custom()
        .max_concurrent_calls(0)
        .map_err(|err| err.to_string())?
        .max_wait_duration(time::Duration::ZERO)
        .map_err(|err| err.to_string())?
        .build();
    if config.max_concurrent_calls() != 0 || !config.max_wait_duration().is_zero() {
        return Err(format!("unexpected config {config}"));
    }
    if !config.is_always_saturated() || !config.is_non_blocking() {
        return Err("expected always-saturated, non-blocking config".to_string());
    }
    Ok(())
}

#[test]
fn zero_capacity_with_positive_wait_is_permitted() -> TestResult {
    let config = BulkheadConfig::custom()
        .max_concurrent_calls(0)
        .map_err(|err| err.to_string())?
        .max_wait_duration(time::Duration::seconds(2))
        .map_err(|err| err.to_string())?
        .build();
    if config.max_wait_duration() != Duration::from_secs(2) || config.is_non_blocking() {
        return Err(format!("unexpected config {config}"));
    }
    Ok(())
}

#[test]
fn from_config_without_overrides_equals_base() -> TestResult {
    let base = common::tuned_config().map_err(|err| err.to_string())?;
    let derived = BulkheadConfig::from_config(&base).build();
    if derived != base {
        return Err(format!("derived {derived} differs from base {base}"));
    }
    Ok(())
}

#[test]
fn from_config_override_preserves_other_fields() -> TestResult {
    let base = common::tuned_config().map_err(|err| err.to_string())?;
    let derived = BulkheadConfig::from_config(&base)
        .max_concurrent_calls(99)
        .map_err(|err| err.to_string())?
        .build();
    if derived.max_concurrent_calls() != 99 {
        return Err("capacity override not applied".to_string());
    }
    if derived.max_wait_duration() != base.max_wait_duration()
        || derived.writable_stack_trace_enabled() != base.writable_stack_trace_enabled()
        || derived.fair_call_handling_enabled() != base.fair_call_handling_enabled()
    {
        return Err(format!("derived {derived} lost base fields from {base}"));
    }
    Ok(())
}

#[test]
fn build_produces_independent_snapshots() -> TestResult {
    let mut builder = BulkheadConfigBuilder::new();
    let first = builder.build();
    builder.max_concurrent_calls(1).map_err(|err| err.to_string())?;
    builder.fair_call_handling_strategy_enabled(false);
    let second = builder.build();
    if first.max_concurrent_calls() != 25 || !first.fair_call_handling_enabled() {
        return Err(format!("first snapshot changed: {first}"));
    }
    if second.max_concurrent_calls() != 1 || second.call_handling() != CallHandling::Barging {
        return Err(format!("second snapshot missing changes: {second}"));
    }
    Ok(())
}

#[test]
fn boolean_setters_round_trip() -> TestResult {
    let config = BulkheadConfig::custom()
        .writable_stack_trace_enabled(false)
        .fair_call_handling_strategy_enabled(false)
        .build();
    if config.writable_stack_trace_enabled() || config.fair_call_handling_enabled() {
        return Err(format!("boolean setters not applied: {config}"));
    }
    Ok(())
}

#[test]
fn differing_fields_are_unequal_and_render_differently() -> TestResult {
    let base = BulkheadConfig::of_defaults();
    let variants = [
        BulkheadConfig::from_config(&base)
            .max_concurrent_calls(26)
            .map_err(|err| err.to_string())?
            .build(),
        BulkheadConfig::from_config(&base)
            .max_wait_duration(time::Duration::nanoseconds(1))
            .map_err(|err| err.to_string())?
            .build(),
        BulkheadConfig::from_config(&base).writable_stack_trace_enabled(false).build(),
        BulkheadConfig::from_config(&base).fair_call_handling_strategy_enabled(false).build(),
    ];
    for variant in variants {
        if variant == base || variant.to_string() == base.to_string() {
            return Err(format!("{variant} should differ from {base}"));
        }
    }
    Ok(())
}
