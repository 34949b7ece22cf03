use thiserror::Error;

/// Error type for text encoding operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Encoder is not configured")]
    EncoderNotConfigured,

    #[error("Failed to decode text: {0}")]
    Decode(String),
}
