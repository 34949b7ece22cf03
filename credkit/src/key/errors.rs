use thiserror::Error;

/// Error type for key generation and key validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Invalid key size: {0} bytes requested")]
    InvalidSize(usize),

    #[error("Random byte pool is empty")]
    EmptyPool,

    #[error("Invalid key length for {algorithm}: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),
}
