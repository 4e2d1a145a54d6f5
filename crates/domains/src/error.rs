//! # AppError
//!
//! Centralized error handling for the Commune ecosystem.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain and service operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Resource not found (e.g., Community)
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),

    /// Validation failure (e.g., missing field, unknown privacy level)
    #[error("{0}")]
    ValidationError(String),

    /// Resource already exists (e.g., duplicate community name or email)
    #[error("{0}")]
    Conflict(String),

    /// Infrastructure failure (e.g., DB down, hashing backend failure)
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A specialized Result type for Commune logic.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity_and_key() {
        let err = AppError::NotFound("community", "Readers".into());
        assert_eq!(err.to_string(), "community not found: Readers");
    }

    #[test]
    fn conflict_message_is_passed_through() {
        let err = AppError::Conflict("Community name already taken".into());
        assert_eq!(err.to_string(), "Community name already taken");
    }
}
