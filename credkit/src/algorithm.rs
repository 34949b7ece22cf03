use serde::Deserialize;

/// HMAC signing algorithms, named after their JOSE `alg` identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum SigningAlgorithm {
    HS256,
    HS384,
    #[default]
    HS512,
}

impl SigningAlgorithm {
    /// Size in bytes of the underlying SHA-2 digest.
    ///
    /// Keys used with this algorithm must have exactly this length.
    pub fn digest_size(self) -> usize {
        match self {
            SigningAlgorithm::HS256 => 32,
            SigningAlgorithm::HS384 => 48,
            SigningAlgorithm::HS512 => 64,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SigningAlgorithm::HS256 => "HS256",
            SigningAlgorithm::HS384 => "HS384",
            SigningAlgorithm::HS512 => "HS512",
        }
    }
}

/// Unkeyed digest algorithms used for content integrity checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    pub fn digest_size(self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha512 => 64,
        }
    }
}
