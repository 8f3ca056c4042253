//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Latitude or longitude outside of the valid range
    #[error("Invalid coordinates: latitude {latitude} / longitude {longitude} out of range")]
    InvalidCoordinates {
        /// Offending latitude
        latitude: f64,
        /// Offending longitude
        longitude: f64,
    },

    /// A location was supplied without usable coordinates
    #[error("Event location must contain lat/lon coordinates: {0}")]
    MissingCoordinates(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a missing-coordinates error
    pub fn missing_coordinates(detail: impl Into<String>) -> Self {
        Self::MissingCoordinates(detail.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_coordinates_message_contains_values() {
        let err = DomainError::InvalidCoordinates {
            latitude: 91.0,
            longitude: 10.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("91"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn missing_coordinates_message() {
        let err = DomainError::missing_coordinates("no longitude");
        assert_eq!(
            err.to_string(),
            "Event location must contain lat/lon coordinates: no longitude"
        );
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("radius must be positive".to_string());
        assert_eq!(err.to_string(), "Validation failed: radius must be positive");
    }
}
