use thiserror::Error;

use crate::key::KeyError;

/// Error type for JWT operations.
///
/// Each validation failure has its own variant so callers can log and
/// react to them separately.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Invalid signing key: {0}")]
    InvalidKey(#[from] KeyError),

    #[error("Invalid token lifetime: {0}")]
    InvalidLifetime(String),

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token algorithm mismatch: expected {expected}, found {found}")]
    AlgorithmMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is not valid yet")]
    NotYetValid,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),
}
