use std::fmt;

use subtle::ConstantTimeEq;
use uuid::Uuid;

use super::errors::KeyError;
use crate::algorithm::SigningAlgorithm;

/// Symmetric secret used for HMAC and token signing.
///
/// The bytes are never printed by `Debug` and are compared in constant time.
#[derive(Clone)]
pub struct Key {
    bytes: Vec<u8>,
}

impl Key {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Check that the key length matches the digest size of `algorithm`.
    ///
    /// # Errors
    /// * `InvalidKeyLength` - Key is shorter or longer than the digest
    pub fn ensure_fits(&self, algorithm: SigningAlgorithm) -> Result<(), KeyError> {
        let expected = algorithm.digest_size();
        if self.bytes.len() != expected {
            return Err(KeyError::InvalidKeyLength {
                algorithm: algorithm.as_str(),
                expected,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    /// Interpret the key as a UUID, if it is exactly 16 bytes long.
    pub fn as_uuid(&self) -> Option<Uuid> {
        Uuid::from_slice(&self.bytes).ok()
    }
}

impl From<Uuid> for Key {
    fn from(uuid: Uuid) -> Self {
        Self::from_bytes(uuid.as_bytes().to_vec())
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.bytes.ct_eq(&other.bytes).into()
    }
}

impl Eq for Key {}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
