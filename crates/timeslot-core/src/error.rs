//! Core error types for timeslot-core.
//!
//! This module defines the error hierarchy using thiserror. Every fallible
//! schedule operation returns [`ScheduleError`]; conflicts carry their own
//! [`ConflictError`] so bulk insertion can wrap the first failure as a cause.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timeslot-core.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A required input is structurally invalid (negative frame, negative
    /// duration, missing comparator operand, item with end before start).
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    /// The requested insertion is not free under the active conflict policy.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// Positional mutation would break the start ordering.
    #[error("Operation '{operation}' is not supported: positional insertion would break start ordering")]
    NotSupported { operation: String },

    /// Schedule-wide accessor called on an empty schedule.
    #[error("Schedule is empty")]
    Empty,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ScheduleError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ScheduleError::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn not_supported(operation: impl Into<String>) -> Self {
        ScheduleError::NotSupported {
            operation: operation.into(),
        }
    }

    /// Returns the conflict if this error is one.
    pub fn as_conflict(&self) -> Option<&ConflictError> {
        match self {
            ScheduleError::Conflict(conflict) => Some(conflict),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ScheduleError::Conflict(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ScheduleError::InvalidArgument { .. })
    }
}

/// Signals an insertion that would violate the no-overlap invariant.
///
/// Both the message and the cause are optional. [`Schedule::add_range`]
/// wraps the first per-item conflict so that `source()` yields it.
///
/// [`Schedule::add_range`]: crate::Schedule::add_range
#[derive(Error, Debug, Default)]
#[error("{}", .message.as_deref().unwrap_or("schedule conflict"))]
pub struct ConflictError {
    message: Option<String>,
    #[source]
    source: Option<Box<ConflictError>>,
}

impl ConflictError {
    /// Conflict with neither message nor cause.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            source: None,
        }
    }

    /// Wraps an earlier conflict as the cause of this one.
    pub fn wrapping(message: impl Into<String>, cause: ConflictError) -> Self {
        Self {
            message: Some(message.into()),
            source: Some(Box::new(cause)),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The wrapped conflict, if any.
    pub fn cause(&self) -> Option<&ConflictError> {
        self.source.as_deref()
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    #[error("Failed to read configuration from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for ScheduleError
pub type Result<T, E = ScheduleError> = std::result::Result<T, E>;
