// crates/bulkhead-config/src/load.rs
// ============================================================================
// Module: Bulkhead Config Loading
// Description: TOML loading and the flat record used for serialization.
// Purpose: Decode untrusted config input through the validating builder.
// Dependencies: serde, toml, tracing
// ============================================================================

//! ## Overview
//! Bulkhead configuration can be loaded from a flat TOML document:
//!
//! ```toml
//! max_concurrent_calls = 25
//! max_wait_duration_ms = 0
//! writable_stack_trace_enabled = true
//! fair_call_handling_enabled = true
//! ```
//!
//! Every key is optional and unknown keys are rejected. Numeric keys are read
//! as signed integers and passed to the builder setters, so a negative value
//! fails with [`ConfigError::InvalidArgument`] rather than a parse error.
//!
//! The wait may be written either as `max_wait_duration_ms` or exactly as a
//! `max_wait_duration = { secs, nanos }` table, but not both. The serde
//! encoding of [`BulkheadConfig`] always uses the exact table, so a decoded
//! value equals the encoded one.
//!
//! [`BulkheadConfig::load`] bounds the path and file size and requires UTF-8
//! before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use tracing::debug;
use tracing::warn;

use crate::builder::BulkheadConfigBuilder;
use crate::builder::MAX_CONCURRENT_CALLS_FIELD;
use crate::builder::MAX_WAIT_DURATION_FIELD;
use crate::config::BulkheadConfig;
use crate::error::ConfigError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File read from the working directory when neither path source is set.
const DEFAULT_CONFIG_NAME: &str = "bulkhead.toml";
/// Environment variable naming the bulkhead config file.
const CONFIG_ENV_VAR: &str = "BULKHEAD_CONFIG";
/// Largest accepted bulkhead config file, in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Longest accepted path component, in bytes.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Longest accepted path, in bytes.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Nanoseconds in one second; the exclusive bound for `nanos`.
const NANOS_PER_SECOND: i64 = 1_000_000_000;

// ============================================================================
// SECTION: Record
// ============================================================================

/// Exact wait duration: whole seconds plus a sub-second remainder.
///
/// # Invariants
/// - `nanos` must lie in `0..1_000_000_000` to be accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaitDurationRecord {
    /// Whole seconds.
    pub secs: i64,
    /// Sub-second nanoseconds.
    #[serde(default)]
    pub nanos: i64,
}

impl WaitDurationRecord {
    /// Converts to a signed duration, rejecting an out-of-range remainder.
    fn to_duration(self) -> Result<time::Duration, ConfigError> {
        if !(0..NANOS_PER_SECOND).contains(&self.nanos) {
            return Err(ConfigError::InvalidArgument {
                field: MAX_WAIT_DURATION_FIELD,
                constraint: "a duration with nanos in 0..1_000_000_000",
            });
        }
        Ok(time::Duration::seconds(self.secs) + time::Duration::nanoseconds(self.nanos))
    }
}

/// Flat, field-for-field encoding of a [`BulkheadConfig`].
///
/// # Invariants
/// - Absent fields take the documented defaults when converted.
/// - Conversion into [`BulkheadConfig`] runs every builder setter.
/// - At most one of `max_wait_duration_ms` and `max_wait_duration` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BulkheadConfigRecord {
    /// Maximum number of concurrent calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_concurrent_calls: Option<i64>,
    /// Maximum wait for admission in whole milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_wait_duration_ms: Option<i64>,
    /// Whether rejection failures capture stack traces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writable_stack_trace_enabled: Option<bool>,
    /// Whether waiting callers are admitted in arrival order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fair_call_handling_enabled: Option<bool>,
    /// Exact maximum wait for admission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_wait_duration: Option<WaitDurationRecord>,
}

impl BulkheadConfigRecord {
    /// Applies the present fields to `builder`, validating each one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidArgument`] when a field is out of range
    /// and [`ConfigError::Invalid`] when both wait forms are present.
    pub fn apply(&self, builder: &mut BulkheadConfigBuilder) -> Result<(), ConfigError> {
        if let Some(calls) = self.max_concurrent_calls {
            let calls = i32::try_from(calls)
                .map_err(|_| ConfigError::InvalidArgument {
                    field: MAX_CONCURRENT_CALLS_FIELD,
                    constraint: "an integer value >= 0 that fits in 32 bits",
                })
                .inspect_err(log_rejection)?;
            builder.max_concurrent_calls(calls).inspect_err(log_rejection)?;
        }
        let wait = match (self.max_wait_duration_ms, self.max_wait_duration) {
            (Some(_), Some(_)) => {
                let err = ConfigError::Invalid(
                    "max_wait_duration and max_wait_duration_ms are mutually exclusive"
                        .to_string(),
                );
                log_rejection(&err);
                return Err(err);
            }
            (Some(wait_ms), None) => Some(time::Duration::milliseconds(wait_ms)),
            (None, Some(exact)) => Some(exact.to_duration().inspect_err(log_rejection)?),
            (None, None) => None,
        };
        if let Some(wait) = wait {
            builder.max_wait_duration(wait).inspect_err(log_rejection)?;
        }
        if let Some(enabled) = self.writable_stack_trace_enabled {
            builder.writable_stack_trace_enabled(enabled);
        }
        if let Some(enabled) = self.fair_call_handling_enabled {
            builder.fair_call_handling_strategy_enabled(enabled);
        }
        Ok(())
    }
}

impl TryFrom<BulkheadConfigRecord> for BulkheadConfig {
    type Error = ConfigError;

    fn try_from(record: BulkheadConfigRecord) -> Result<Self, Self::Error> {
        let mut builder = BulkheadConfigBuilder::new();
        record.apply(&mut builder)?;
        Ok(builder.build())
    }
}

impl TryFrom<&BulkheadConfig> for BulkheadConfigRecord {
    type Error = ConfigError;

    /// Encodes every field exactly.
    ///
    /// Fails only for a wait set through
    /// [`BulkheadConfigBuilder::max_wait_duration_std`] beyond `i64::MAX`
    /// seconds, which has no signed encoding.
    fn try_from(config: &BulkheadConfig) -> Result<Self, Self::Error> {
        let wait = config.max_wait_duration();
        let secs = i64::try_from(wait.as_secs()).map_err(|_| {
            ConfigError::Invalid(format!(
                "max_wait_duration of {} seconds cannot be encoded",
                wait.as_secs()
            ))
        })?;
        Ok(Self {
            max_concurrent_calls: Some(i64::from(config.max_concurrent_calls())),
            max_wait_duration_ms: None,
            writable_stack_trace_enabled: Some(config.writable_stack_trace_enabled()),
            fair_call_handling_enabled: Some(config.fair_call_handling_enabled()),
            max_wait_duration: Some(WaitDurationRecord {
                secs,
                nanos: i64::from(wait.subsec_nanos()),
            }),
        })
    }
}

impl Serialize for BulkheadConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BulkheadConfigRecord::try_from(self)
            .map_err(<S::Error as serde::ser::Error>::custom)?
            .serialize(serializer)
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

/// Origin of a resolved config path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathSource {
    /// Passed by the caller.
    Explicit,
    /// Read from `BULKHEAD_CONFIG`.
    Environment,
    /// Fallback filename in the working directory.
    Default,
}

impl PathSource {
    /// Returns a stable label for logging.
    const fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Environment => "environment",
            Self::Default => "default",
        }
    }
}

impl BulkheadConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::InvalidArgument`] for out-of-range values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let record: BulkheadConfigRecord =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        let config = Self::try_from(record)?;
        debug!(config = %config, "bulkhead config accepted");
        Ok(config)
    }

    /// Loads configuration from disk.
    ///
    /// The path is taken from `path`, then the `BULKHEAD_CONFIG` environment
    /// variable, then `bulkhead.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the path is rejected, the file cannot be
    /// read, or its content fails to parse or validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, source) = resolve_path(path, env::var(CONFIG_ENV_VAR).ok())?;
        check_path_limits(&resolved)?;
        debug!(path = %resolved.display(), source = source.as_str(), "loading bulkhead config");
        let bytes = read_bounded(&resolved)?;
        let content = std::str::from_utf8(&bytes).map_err(|_| {
            ConfigError::Invalid(format!("bulkhead config {} must be utf-8", resolved.display()))
        })?;
        Self::from_toml_str(content)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Logs a rejection raised while decoding input.
fn log_rejection(err: &ConfigError) {
    warn!(error = %err, "bulkhead config input rejected");
}

/// Picks the config path: caller, then a non-empty environment value, then
/// the default filename.
fn resolve_path(
    path: Option<&Path>,
    env_path: Option<String>,
) -> Result<(PathBuf, PathSource), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), PathSource::Explicit));
    }
    match env_path.filter(|value| !value.is_empty()) {
        Some(value) if value.len() > MAX_TOTAL_PATH_LENGTH => Err(ConfigError::Invalid(format!(
            "{CONFIG_ENV_VAR} path exceeds {MAX_TOTAL_PATH_LENGTH} bytes"
        ))),
        Some(value) => Ok((PathBuf::from(value), PathSource::Environment)),
        None => Ok((PathBuf::from(DEFAULT_CONFIG_NAME), PathSource::Default)),
    }
}

/// Rejects paths whose total or per-component length is over the limits.
fn check_path_limits(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!(
            "bulkhead config path exceeds {MAX_TOTAL_PATH_LENGTH} bytes"
        )));
    }
    let oversized = path
        .components()
        .any(|component| component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH);
    if oversized {
        return Err(ConfigError::Invalid(format!(
            "bulkhead config path component exceeds {MAX_PATH_COMPONENT_LENGTH} bytes"
        )));
    }
    Ok(())
}

/// Reads at most one byte past the size limit so oversized files fail fast.
fn read_bounded(path: &Path) -> Result<Vec<u8>, ConfigError> {
    let io_error = |err: std::io::Error| ConfigError::Io(format!("{}: {err}", path.display()));
    let file = File::open(path).map_err(io_error)?;
    let limit = u64::try_from(MAX_CONFIG_FILE_SIZE).unwrap_or(u64::MAX).saturating_add(1);
    let mut bytes = Vec::new();
    file.take(limit).read_to_end(&mut bytes).map_err(io_error)?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid(format!(
            "bulkhead config {} exceeds {MAX_CONFIG_FILE_SIZE} bytes",
            path.display()
        )));
    }
    debug!(path = %path.display(), size = bytes.len(), "read bulkhead config file");
    Ok(bytes)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
