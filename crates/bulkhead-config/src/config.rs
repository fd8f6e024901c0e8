// crates/bulkhead-config/src/config.rs
// ============================================================================
// Module: Bulkhead Configuration Value
// Description: Immutable bulkhead tunables with typed accessors.
// Purpose: Provide a frozen, thread-shareable config for admission engines.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! [`BulkheadConfig`] is the frozen configuration handed to a bulkhead at
//! construction time. Fields are private and there are no mutators; values
//! are produced only by [`BulkheadConfigBuilder`], so every live instance has
//! passed setter validation. Equality compares all four fields.
//!
//! Serialization uses the flat [`BulkheadConfigRecord`] shape with the wait
//! kept to the nanosecond; deserialization re-runs the builder setters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::builder::BulkheadConfigBuilder;
use crate::load::BulkheadConfigRecord;

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default maximum number of concurrent calls.
pub const DEFAULT_MAX_CONCURRENT_CALLS: u32 = 25;
/// Default maximum wait for entry (no waiting).
pub const DEFAULT_MAX_WAIT_DURATION: Duration = Duration::ZERO;
/// Default for capturing stack traces on rejection failures.
pub const DEFAULT_WRITABLE_STACK_TRACE_ENABLED: bool = true;
/// Default for first-in-first-out call handling.
pub const DEFAULT_FAIR_CALL_HANDLING_ENABLED: bool = true;

// ============================================================================
// SECTION: Call Handling
// ============================================================================

/// Admission ordering discipline requested from the bulkhead.
///
/// # Invariants
/// - Variants are stable for logging labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallHandling {
    /// Waiting callers are admitted strictly in arrival order.
    Fair,
    /// A newly arriving caller may be admitted ahead of waiting callers.
    Barging,
}

impl CallHandling {
    /// Maps the fair call handling flag to a discipline.
    #[must_use]
    pub const fn from_fair_flag(fair: bool) -> Self {
        if fair { Self::Fair } else { Self::Barging }
    }

    /// Returns true for the first-in-first-out discipline.
    #[must_use]
    pub const fn is_fair(self) -> bool {
        matches!(self, Self::Fair)
    }

    /// Returns a stable label for the discipline.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fair => "fair",
            Self::Barging => "barging",
        }
    }
}

impl fmt::Display for CallHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Configuration Value
// ============================================================================

/// Immutable bulkhead configuration.
///
/// # Invariants
/// - Fields are written once by [`BulkheadConfigBuilder::build`] and never change.
/// - `max_concurrent_calls == 0` is legal: the bulkhead is permanently saturated.
/// - `max_wait_duration == 0` means callers are admitted or rejected immediately.
/// - No cross-field constraint applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "BulkheadConfigRecord")]
pub struct BulkheadConfig {
    /// Maximum number of calls admitted at once.
    max_concurrent_calls: u32,
    /// Maximum time a caller may wait for admission.
    max_wait_duration: Duration,
    /// Whether rejection failures capture stack traces.
    writable_stack_trace_enabled: bool,
    /// Whether waiting callers are admitted in arrival order.
    fair_call_handling_enabled: bool,
}

impl BulkheadConfig {
    /// Freezes already-validated fields into a value.
    pub(crate) const fn from_parts(
        max_concurrent_calls: u32,
        max_wait_duration: Duration,
        writable_stack_trace_enabled: bool,
        fair_call_handling_enabled: bool,
    ) -> Self {
        Self {
            max_concurrent_calls,
            max_wait_duration,
            writable_stack_trace_enabled,
            fair_call_handling_enabled,
        }
    }

    /// Returns a builder seeded with the documented defaults.
    #[must_use]
    pub const fn custom() -> BulkheadConfigBuilder {
        BulkheadConfigBuilder::new()
    }

    /// Returns a builder seeded with every field of `base`.
    #[must_use]
    pub const fn from_config(base: &Self) -> BulkheadConfigBuilder {
        BulkheadConfigBuilder::from_config(base)
    }

    /// Returns the default configuration.
    #[must_use]
    pub const fn of_defaults() -> Self {
        Self::custom().build()
    }

    /// Returns the maximum number of concurrent calls.
    #[must_use]
    pub const fn max_concurrent_calls(&self) -> u32 {
        self.max_concurrent_calls
    }

    /// Returns the maximum time a caller may wait for admission.
    #[must_use]
    pub const fn max_wait_duration(&self) -> Duration {
        self.max_wait_duration
    }

    /// Returns whether rejection failures capture stack traces.
    #[must_use]
    pub const fn writable_stack_trace_enabled(&self) -> bool {
        self.writable_stack_trace_enabled
    }

    /// Returns whether waiting callers are admitted in arrival order.
    #[must_use]
    pub const fn fair_call_handling_enabled(&self) -> bool {
        self.fair_call_handling_enabled
    }

    /// Returns the admission ordering discipline.
    #[must_use]
    pub const fn call_handling(&self) -> CallHandling {
        CallHandling::from_fair_flag(self.fair_call_handling_enabled)
    }

    /// Returns true when saturated callers are rejected without waiting.
    #[must_use]
    pub const fn is_non_blocking(&self) -> bool {
        self.max_wait_duration.is_zero()
    }

    /// Returns true when no call can ever be admitted.
    #[must_use]
    pub const fn is_always_saturated(&self) -> bool {
        self.max_concurrent_calls == 0
    }
}

impl Default for BulkheadConfig {
    fn default() -> Self {
        Self::of_defaults()
    }
}

impl fmt::Display for BulkheadConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BulkheadConfig{{max_concurrent_calls={}, max_wait_duration={}, \
             writable_stack_trace_enabled={}, fair_call_handling_enabled={}}}",
            self.max_concurrent_calls,
            ExactDuration(self.max_wait_duration),
            self.writable_stack_trace_enabled,
            self.fair_call_handling_enabled,
        )
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Renders a duration without rounding: whole milliseconds as `Nms`, else `Nns`.
struct ExactDuration(Duration);

impl fmt::Display for ExactDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nanos = self.0.as_nanos();
        if nanos % 1_000_000 == 0 {
            write!(f, "{}ms", nanos / 1_000_000)
        } else {
            write!(f, "{nanos}ns")
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
