//! Error handling for gSender
//!
//! Provides the error types shared by the record APIs and the dispatcher:
//! - Record errors (bad request, not found, persistence failure)
//! - Controller errors (command delivery to the CNC controller)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Controller error type
///
/// Represents failures reported by the external controller collaborator
/// when a command could not be delivered or was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControllerError {
    /// Controller is not connected
    #[error("Controller not connected")]
    NotConnected,

    /// Controller operation timed out
    #[error("Controller operation timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// Command was rejected by controller
    #[error("Command rejected: {reason}")]
    CommandRejected {
        /// The reason the command was rejected.
        reason: String,
    },

    /// Generic controller error
    #[error("Controller error: {message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Main error type for gSender
///
/// The record APIs report exactly three kinds of failure: a bad request
/// (missing required field on create), an unknown id, and a persistence
/// failure. Controller failures are carried through for the dispatcher.
#[derive(Error, Debug)]
pub enum Error {
    /// A required field was missing or empty
    #[error("{0}")]
    BadRequest(String),

    /// No record with this id exists
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record that was looked up.
        entity: &'static str,
        /// The id that was not found.
        id: String,
    },

    /// Persisting the change failed; on-disk state is unknown
    #[error("{message}")]
    Internal {
        /// What was being attempted.
        message: String,
        /// The payload that failed to persist, echoed for diagnosis.
        payload: Option<serde_json::Value>,
    },

    /// Controller error
    #[error(transparent)]
    Controller(#[from] ControllerError),
}

impl Error {
    /// Create a bad request error naming the offending field
    pub fn empty_field(field: &str) -> Self {
        Error::BadRequest(format!("The \"{}\" parameter must not be empty", field))
    }

    /// Create a not found error
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Error::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create an internal error carrying the attempted payload
    pub fn internal(message: impl Into<String>, payload: Option<serde_json::Value>) -> Self {
        Error::Internal {
            message: message.into(),
            payload,
        }
    }

    /// Check if this is a bad request error
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Error::BadRequest(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    /// Check if this is an internal error
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Internal { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
