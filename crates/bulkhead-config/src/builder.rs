// crates/bulkhead-config/src/builder.rs
// ============================================================================
// Module: Bulkhead Config Builder
// Description: Mutable staging type that validates and freezes bulkhead tunables.
// Purpose: Make the validating builder the only path to a `BulkheadConfig`.
// Dependencies: time
// ============================================================================

//! ## Overview
//! [`BulkheadConfigBuilder`] starts from the documented defaults or from an
//! existing [`BulkheadConfig`]. Each setter validates its own argument
//! immediately and returns the builder for chaining; a rejected argument
//! leaves the builder exactly as it was. [`BulkheadConfigBuilder::build`]
//! copies the current fields into a new value and leaves the builder usable,
//! so repeated builds produce independent snapshots.
//!
//! A positive wait blocks the calling thread for up to that long when the
//! bulkhead is full. Callers admitted from an event-loop thread should keep the
//! wait at zero.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use crate::config::BulkheadConfig;
use crate::config::DEFAULT_FAIR_CALL_HANDLING_ENABLED;
use crate::config::DEFAULT_MAX_CONCURRENT_CALLS;
use crate::config::DEFAULT_MAX_WAIT_DURATION;
use crate::config::DEFAULT_WRITABLE_STACK_TRACE_ENABLED;
use crate::error::ConfigError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Field name reported for capacity rejections.
pub(crate) const MAX_CONCURRENT_CALLS_FIELD: &str = "max_concurrent_calls";
/// Field name reported for wait duration rejections.
pub(crate) const MAX_WAIT_DURATION_FIELD: &str = "max_wait_duration";

// ============================================================================
// SECTION: Builder
// ============================================================================

/// Builder for [`BulkheadConfig`].
///
/// # Invariants
/// - Every held field has passed its setter validation.
/// - Not intended for concurrent mutation; build, then share the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkheadConfigBuilder {
    /// Pending maximum number of concurrent calls.
    max_concurrent_calls: u32,
    /// Pending maximum wait for admission.
    max_wait_duration: Duration,
    /// Pending stack trace capture flag.
    writable_stack_trace_enabled: bool,
    /// Pending fair call handling flag.
    fair_call_handling_enabled: bool,
}

impl BulkheadConfigBuilder {
    /// Creates a builder seeded with the documented defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_concurrent_calls: DEFAULT_MAX_CONCURRENT_CALLS,
            max_wait_duration: DEFAULT_MAX_WAIT_DURATION,
            writable_stack_trace_enabled: DEFAULT_WRITABLE_STACK_TRACE_ENABLED,
            fair_call_handling_enabled: DEFAULT_FAIR_CALL_HANDLING_ENABLED,
        }
    }

    /// Creates a builder seeded by copying every field of `base`.
    #[must_use]
    pub const fn from_config(base: &BulkheadConfig) -> Self {
        Self {
            max_concurrent_calls: base.max_concurrent_calls(),
            max_wait_duration: base.max_wait_duration(),
            writable_stack_trace_enabled: base.writable_stack_trace_enabled(),
            fair_call_handling_enabled: base.fair_call_handling_enabled(),
        }
    }

    /// Sets the maximum number of calls the bulkhead admits at once.
    ///
    /// Zero is accepted and describes a permanently saturated bulkhead.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidArgument`] when `max_concurrent_calls` is
    /// negative.
    pub fn max_concurrent_calls(
        &mut self,
        max_concurrent_calls: i32,
    ) -> Result<&mut Self, ConfigError> {
        let value = u32::try_from(max_concurrent_calls).map_err(|_| {
            ConfigError::InvalidArgument {
                field: MAX_CONCURRENT_CALLS_FIELD,
                constraint: "an integer value >= 0",
            }
        })?;
        self.max_concurrent_calls = value;
        Ok(self)
    }

    /// Sets the maximum time a caller may wait to enter a full bulkhead.
    ///
    /// When capacity is available entry is immediate. Zero disables waiting:
    /// a caller that finds the bulkhead full is rejected at once.
    ///
    /// A `std::time::Duration`, such as one read back from
    /// [`BulkheadConfig::max_wait_duration`], is never negative and goes
    /// through [`Self::max_wait_duration_std`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidArgument`] when `max_wait_duration` is
    /// negative.
    pub fn max_wait_duration(
        &mut self,
        max_wait_duration: time::Duration,
    ) -> Result<&mut Self, ConfigError> {
        let value = Duration::try_from(max_wait_duration).map_err(|_| {
            ConfigError::InvalidArgument {
                field: MAX_WAIT_DURATION_FIELD,
                constraint: "a duration >= 0",
            }
        })?;
        self.max_wait_duration = value;
        Ok(self)
    }

    /// Sets the maximum wait from an unsigned duration.
    ///
    /// Cannot fail: an unsigned duration is always a valid wait.
    pub const fn max_wait_duration_std(&mut self, max_wait_duration: Duration) -> &mut Self {
        self.max_wait_duration = max_wait_duration;
        self
    }

    /// Sets whether rejection failures capture stack traces.
    ///
    /// Disabling capture avoids paying for a trace on every rejection while
    /// the bulkhead is saturated; the cause of such a failure is already known.
    pub const fn writable_stack_trace_enabled(
        &mut self,
        writable_stack_trace_enabled: bool,
    ) -> &mut Self {
        self.writable_stack_trace_enabled = writable_stack_trace_enabled;
        self
    }

    /// Sets the admission ordering discipline.
    ///
    /// `true` serves waiting callers first-in-first-out. `false` lets a newly
    /// arriving caller be admitted ahead of callers already waiting, which
    /// trades ordering for throughput under contention.
    pub const fn fair_call_handling_strategy_enabled(
        &mut self,
        fair_call_handling_enabled: bool,
    ) -> &mut Self {
        self.fair_call_handling_enabled = fair_call_handling_enabled;
        self
    }

    /// Freezes the current fields into a new [`BulkheadConfig`].
    #[must_use]
    pub const fn build(&self) -> BulkheadConfig {
        BulkheadConfig::from_parts(
            self.max_concurrent_calls,
            self.max_wait_duration,
            self.writable_stack_trace_enabled,
            self.fair_call_handling_enabled,
        )
    }
}

impl Default for BulkheadConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&BulkheadConfig> for BulkheadConfigBuilder {
    fn from(base: &BulkheadConfig) -> Self {
        Self::from_config(base)
    }
}

impl From<BulkheadConfig> for BulkheadConfigBuilder {
    fn from(base: BulkheadConfig) -> Self {
        Self::from_config(&base)
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
