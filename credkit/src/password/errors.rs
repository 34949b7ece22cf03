use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Invalid cost factor {cost}: must be between {min} and {max}")]
    InvalidCost { cost: u32, min: u32, max: u32 },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password record: {0}")]
    InvalidRecord(String),
}
