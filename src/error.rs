//! Error types for the care shift engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during scheduling, work-log
//! tracking and payroll computation.

use thiserror::Error;

/// The main error type for the care shift engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use care_shift_engine::error::EngineError;
///
/// let error = EngineError::TimeParse {
///     value: "25:61".to_string(),
/// };
/// assert_eq!(error.to_string(), "Malformed time-of-day string: '25:61' (expected HH:MM)");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A time-of-day or weekday string could not be parsed.
    ///
    /// Callers must surface this rather than silently coercing the value.
    #[error("Malformed time-of-day string: '{value}' (expected HH:MM)")]
    TimeParse {
        /// The string that failed to parse.
        value: String,
    },

    /// Input failed validation before any write occurred.
    #[error("Validation error: {message}")]
    Validation {
        /// A description of what made the input invalid.
        message: String,
    },

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of record that was looked up (e.g. "Shift").
        entity: &'static str,
        /// The identifier that was not found.
        id: String,
    },

    /// The operation conflicts with the current state of a record,
    /// e.g. approving an already-rejected work log.
    #[error("Conflict: {message}")]
    Conflict {
        /// A description of the conflicting state.
        message: String,
    },

    /// The backing store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the store failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`EngineError::Conflict`] with the given message.
    pub fn conflict(message: impl Into<String>) -> Self {
        EngineError::Conflict {
            message: message.into(),
        }
    }

    /// Shorthand for a [`EngineError::NotFound`] for the given entity and id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        EngineError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
