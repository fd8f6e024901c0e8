// crates/bulkhead-config/src/lib.rs
// ============================================================================
// Module: Bulkhead Config Library
// Description: Immutable bulkhead configuration, validating builder, loaders.
// Purpose: Single source of truth for bulkhead admission tunables.
// Dependencies: serde, thiserror, time, toml, tracing
// ============================================================================

//! ## Overview
//! `bulkhead-config` defines the configuration consumed by a bulkhead: a
//! concurrency guard that bounds the number of in-flight calls against a
//! protected resource. A [`BulkheadConfig`] is an immutable value holding four
//! tunables (capacity, maximum wait, stack trace capture, fair call handling).
//! It can only be produced by [`BulkheadConfigBuilder`], whose setters reject
//! invalid arguments at the call site.
//!
//! Built values are `Copy` and `Sync`, so an admission engine may read them
//! from any thread without locking. Reconfiguration means building a new
//! value, optionally seeded from an existing one:
//!
//! ```
//! use bulkhead_config::BulkheadConfig;
//!
//! # fn main() -> Result<(), bulkhead_config::ConfigError> {
//! let base = BulkheadConfig::of_defaults();
//! let tuned = BulkheadConfig::from_config(&base).max_concurrent_calls(8)?.build();
//! assert_eq!(tuned.max_concurrent_calls(), 8);
//! assert_eq!(tuned.max_wait_duration(), base.max_wait_duration());
//! # Ok(())
//! # }
//! ```
//!
//! The admission engine itself is not part of this crate.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod builder;
pub mod config;
pub mod error;
pub mod examples;
pub mod load;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use builder::BulkheadConfigBuilder;
pub use config::BulkheadConfig;
pub use config::CallHandling;
pub use config::DEFAULT_FAIR_CALL_HANDLING_ENABLED;
pub use config::DEFAULT_MAX_CONCURRENT_CALLS;
pub use config::DEFAULT_MAX_WAIT_DURATION;
pub use config::DEFAULT_WRITABLE_STACK_TRACE_ENABLED;
pub use error::ConfigError;
pub use examples::config_toml_example;
pub use load::BulkheadConfigRecord;
pub use load::WaitDurationRecord;
pub use schema::config_schema;
