// crates/bulkhead-config/src/error.rs
// ============================================================================
// Module: Bulkhead Config Errors
// Description: Error taxonomy for builder validation and config loading.
// Purpose: Surface rejected arguments with the offending field and constraint.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Builder setters fail with [`ConfigError::InvalidArgument`]. The remaining
//! variants only arise when decoding a configuration from a file or record.

use thiserror::Error;

/// Bulkhead configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A builder setter received an argument outside its domain.
    #[error("invalid argument: {field} must be {constraint}")]
    InvalidArgument {
        /// Name of the rejected field.
        field: &'static str,
        /// Constraint the argument violated.
        constraint: &'static str,
    },
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML or JSON decoding error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Input rejected by a loader guard, or a value with no exact encoding.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Returns true when the error came from a builder setter.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
