#![allow(dead_code)]

use credkit::Key;
use credkit::KeyMaterial;
use credkit::SigningAlgorithm;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Lowest bcrypt cost, keeps hashing tests fast
pub const TEST_COST: u32 = 4;

/// Fixed clock for token tests (2023-11-14T22:13:20Z)
pub const NOW: i64 = 1_700_000_000;

/// Deterministic key material for reproducible tests
pub fn key_material(seed: u64) -> KeyMaterial<StdRng> {
    KeyMaterial::new(StdRng::seed_from_u64(seed))
}

pub fn key_for(algorithm: SigningAlgorithm, seed: u64) -> Key {
    key_material(seed)
        .generate_for(algorithm)
        .expect("Failed to generate key")
}

/// Copy of `bytes` with a single bit flipped
pub fn flip_bit(bytes: &[u8], bit: usize) -> Vec<u8> {
    let mut flipped = bytes.to_vec();
    flipped[bit / 8] ^= 1 << (bit % 8);
    flipped
}

/// Sets an environment variable for the lifetime of the guard
pub struct EnvVarGuard {
    name: &'static str,
}

impl EnvVarGuard {
    pub fn set(name: &'static str, value: &str) -> Self {
        std::env::set_var(name, value);
        Self { name }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        std::env::remove_var(self.name);
    }
}
