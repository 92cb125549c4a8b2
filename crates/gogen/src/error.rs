//! Error types for the gogen engine.
//!
//! Every variant names the operation or the offending parameter so the
//! caller can render a one-line diagnostic. Secret material (plaintext
//! passwords, key bytes) never appears in an error message.

use crate::validate::ValidationErrors;

/// Engine error types covering all operations.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("{operation}: random source failed: {reason}")]
    RandomSource {
        operation: &'static str,
        reason: String,
    },

    #[error("{operation}: invalid length {length}: {reason}")]
    InvalidLength {
        operation: &'static str,
        length: usize,
        reason: &'static str,
    },

    #[error("invalid bcrypt cost {cost}: must be between {min} and {max}")]
    InvalidCost { cost: u32, min: u32, max: u32 },

    #[error("invalid hex key: {0}")]
    Encoding(String),

    #[error("password is {length} bytes, bcrypt accepts at most {max}")]
    InputTooLong { length: usize, max: usize },

    #[error("malformed hash record: {0}")]
    MalformedHash(String),

    #[error("{algorithm} does not support {option}")]
    UnsupportedOption {
        algorithm: &'static str,
        option: &'static str,
    },

    #[error("hashing failed: {0}")]
    Hash(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, CredentialError>;
