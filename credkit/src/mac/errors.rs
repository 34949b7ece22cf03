use std::path::PathBuf;

use thiserror::Error;

use crate::key::KeyError;

/// Error type for HMAC operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MacError {
    #[error("Invalid signing key: {0}")]
    InvalidKey(#[from] KeyError),
}

/// Error type for content digests.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
