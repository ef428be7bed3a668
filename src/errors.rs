//! Typed error definitions for share-validation operations.
//!
//! NO PANICS in the validation path - all errors are typed and recoverable.
//! Defense-in-depth: explicit error codes for observability and debugging.

use thiserror::Error;

/// Result type alias for validator operations
pub type Result<T> = std::result::Result<T, ValidatorError>;

/// Validator errors - NEVER panic, always return typed error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidatorError {
    // ==================== INPUT-SHAPE ERRORS ====================
    #[error("Invalid data")]
    InvalidData,

    #[error("Invalid hex input: {0}")]
    InvalidHex(String),

    #[error("Invalid path buffer: {0}")]
    InvalidPath(String),

    #[error("Invalid grid size: {size} outside allowed range")]
    InvalidGridSize { size: usize },

    // ==================== VERIFICATION ERRORS ====================
    #[error("Invalid worker Hamiltonian cycle")]
    InvalidWorkerCycle,

    #[error("Invalid queen bee Hamiltonian cycle")]
    InvalidQueenCycle,

    // ==================== INTERNAL ERRORS ====================
    #[error("PRNG draw exhausted before graph generation completed")]
    PrngExhausted,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ValidatorError {
    /// Error code for monitoring and alerting
    pub fn error_code(&self) -> &'static str {
        match self {
            // Input-shape errors: 1xxx
            Self::InvalidData => "E1000",
            Self::InvalidHex(_) => "E1001",
            Self::InvalidPath(_) => "E1002",
            Self::InvalidGridSize { .. } => "E1003",

            // Verification errors: 2xxx
            Self::InvalidWorkerCycle => "E2000",
            Self::InvalidQueenCycle => "E2001",

            // Internal errors: 9xxx
            Self::PrngExhausted => "E9000",
            Self::Internal(_) => "E9001",
        }
    }

    /// Human-readable message matching the legacy failure strings (spec §4.F)
    pub fn share_message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_unique() {
        let errors = vec![
            ValidatorError::InvalidData.error_code(),
            ValidatorError::InvalidHex("x".into()).error_code(),
            ValidatorError::InvalidWorkerCycle.error_code(),
            ValidatorError::InvalidQueenCycle.error_code(),
            ValidatorError::Internal("x".into()).error_code(),
        ];

        let mut seen = std::collections::HashSet::new();
        for code in errors {
            assert!(seen.insert(code), "Duplicate error code: {}", code);
        }
    }

    #[test]
    fn test_share_message_matches_legacy_strings() {
        assert_eq!(
            ValidatorError::InvalidWorkerCycle.share_message(),
            "Invalid worker Hamiltonian cycle"
        );
        assert_eq!(
            ValidatorError::InvalidQueenCycle.share_message(),
            "Invalid queen bee Hamiltonian cycle"
        );
        assert_eq!(ValidatorError::InvalidData.share_message(), "Invalid data");
    }
}
