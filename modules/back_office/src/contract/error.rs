//! Contract error types for the back office
//!
//! These errors are transport-agnostic and used for inter-module communication.

/// Back office domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackOfficeError {
    /// Resource not found
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (creator, contract, payment_notice, ...)
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// State conflict (already agreed, already paid, ...)
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Validation error
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Document archive is not connected
    #[error("Document archive is not connected")]
    ArchiveUnavailable,

    /// Internal error
    #[error("Internal error")]
    Internal,
}

impl BackOfficeError {
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: id.to_string(),
        }
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict {
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Log a storage failure and collapse it into `Internal`
    pub fn internal(error: anyhow::Error) -> Self {
        tracing::error!(error = ?error, "back office storage failure");
        Self::Internal
    }
}
