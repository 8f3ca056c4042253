//! Application-level errors

use std::time::Duration;

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error, e.g. invalid event coordinates
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An operation did not finish within its deadline
    #[error("Operation timed out after {timeout_ms} ms")]
    Timeout {
        /// The deadline in milliseconds
        timeout_ms: u64,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Timeout error for the given deadline
    #[must_use]
    pub fn timeout(deadline: Duration) -> Self {
        Self::Timeout {
            timeout_ms: u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Whether a later attempt may succeed; reported in logs, never retried here
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalService(_) | Self::Timeout { .. })
    }

    /// Whether the caller supplied invalid input
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}
