use rand::rngs::StdRng;
use rand::Rng;
use rand::RngCore;
use rand::SeedableRng;
use uuid::Builder;
use uuid::Uuid;

use super::errors::KeyError;
use super::secret::Key;
use crate::algorithm::SigningAlgorithm;

/// Number of pre-generated bytes in the default pool.
pub const POOL_SIZE: usize = 2000;

/// Byte length of a UUID-shaped key.
pub const UUID_KEY_SIZE: usize = 16;

/// Key generator backed by a pool of pre-generated random bytes.
///
/// Keys are assembled by sampling the pool with an owned index generator.
/// The random source is injected, so a seeded RNG gives reproducible keys
/// in tests.
///
/// # Security Notes
/// - This scheme is not cryptographically reviewed; callers that need
///   cryptographic-strength keys should supply their own secret instead
/// - Generating keys mutates the index generator, so sharing a generator
///   across threads requires exclusive access
pub struct KeyMaterial<R = StdRng> {
    pool: Vec<u8>,
    rng: R,
}

impl KeyMaterial<StdRng> {
    /// Create a generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: RngCore> KeyMaterial<R> {
    /// Create a generator whose pool is filled from `rng`.
    pub fn new(mut rng: R) -> Self {
        let mut pool = vec![0u8; POOL_SIZE];
        rng.fill_bytes(&mut pool);

        Self { pool, rng }
    }

    /// Create a generator over an explicit byte pool.
    ///
    /// # Errors
    /// * `EmptyPool` - There is nothing to sample from
    pub fn with_pool(pool: Vec<u8>, rng: R) -> Result<Self, KeyError> {
        if pool.is_empty() {
            return Err(KeyError::EmptyPool);
        }
        Ok(Self { pool, rng })
    }

    /// Generate a key of `target_size` bytes.
    ///
    /// # Errors
    /// * `InvalidSize` - `target_size` is zero
    pub fn generate_key(&mut self, target_size: usize) -> Result<Key, KeyError> {
        if target_size == 0 {
            tracing::warn!(size = target_size, "Rejected key generation request");
            return Err(KeyError::InvalidSize(target_size));
        }

        let bytes: Vec<u8> = (0..target_size)
            .map(|_| self.pool[self.rng.gen_range(0..self.pool.len())])
            .collect();

        tracing::debug!(size = target_size, "Key generated");

        Ok(Key::from_bytes(bytes))
    }

    /// Generate a key sized for `algorithm`.
    pub fn generate_for(&mut self, algorithm: SigningAlgorithm) -> Result<Key, KeyError> {
        self.generate_key(algorithm.digest_size())
    }

    /// Generate a 16-byte key laid out as a version 4 UUID.
    ///
    /// # Errors
    /// * `InvalidKeyFormat` - The generated bytes do not form a UUID
    pub fn derive_uuid_key(&mut self) -> Result<Key, KeyError> {
        let raw = self.generate_key(UUID_KEY_SIZE)?;
        uuid_key_from_bytes(raw.as_bytes())
    }
}

/// Reinterpret raw bytes as a UUID key.
///
/// Input longer than 16 bytes is truncated; the version and variant bits
/// are stamped so the result is a well-formed version 4 UUID.
///
/// # Errors
/// * `InvalidKeyFormat` - Fewer than 16 bytes were supplied
pub fn uuid_key_from_bytes(bytes: &[u8]) -> Result<Key, KeyError> {
    let head = bytes.get(..UUID_KEY_SIZE).ok_or_else(|| {
        tracing::warn!(actual = bytes.len(), "Key bytes too short for a UUID");
        KeyError::InvalidKeyFormat(format!(
            "expected at least {} bytes, got {}",
            UUID_KEY_SIZE,
            bytes.len()
        ))
    })?;

    let parsed =
        Uuid::from_slice(head).map_err(|e| KeyError::InvalidKeyFormat(e.to_string()))?;
    let uuid = Builder::from_random_bytes(parsed.into_bytes()).into_uuid();

    Ok(Key::from(uuid))
}
