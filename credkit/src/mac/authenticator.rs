use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;
use sha2::Sha384;
use sha2::Sha512;
use subtle::ConstantTimeEq;

use super::errors::MacError;
use crate::algorithm::SigningAlgorithm;
use crate::codec::Codec;
use crate::codec::CodecError;
use crate::key::Key;
use crate::key::KeyError;

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Keyed MAC state, cloned for every tag computation.
#[derive(Clone)]
enum KeyedMac {
    Sha256(HmacSha256),
    Sha384(HmacSha384),
    Sha512(HmacSha512),
}

/// HMAC tag computation and verification over byte payloads.
///
/// The key is bound at construction and must match the digest size of the
/// chosen algorithm.
#[derive(Clone)]
pub struct MessageAuthenticator {
    algorithm: SigningAlgorithm,
    keyed: KeyedMac,
}

impl MessageAuthenticator {
    /// Create an authenticator for `algorithm` keyed with `key`.
    ///
    /// # Errors
    /// * `InvalidKey` - Key length differs from the algorithm's digest size
    pub fn new(key: &Key, algorithm: SigningAlgorithm) -> Result<Self, MacError> {
        key.ensure_fits(algorithm)?;

        let bytes = key.as_bytes();
        let keyed = match algorithm {
            SigningAlgorithm::HS256 => KeyedMac::Sha256(keyed_mac(bytes)?),
            SigningAlgorithm::HS384 => KeyedMac::Sha384(keyed_mac(bytes)?),
            SigningAlgorithm::HS512 => KeyedMac::Sha512(keyed_mac(bytes)?),
        };

        Ok(Self { algorithm, keyed })
    }

    pub fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// Compute the HMAC tag of `payload`.
    ///
    /// Deterministic for a given key and payload.
    pub fn sign_payload(&self, payload: &[u8]) -> Vec<u8> {
        match &self.keyed {
            KeyedMac::Sha256(mac) => finish(mac, payload),
            KeyedMac::Sha384(mac) => finish(mac, payload),
            KeyedMac::Sha512(mac) => finish(mac, payload),
        }
    }

    /// Check `expected_tag` against the tag of `payload`.
    ///
    /// The comparison runs in constant time. Tags of the wrong length
    /// compare unequal.
    pub fn verify_tag(&self, payload: &[u8], expected_tag: &[u8]) -> bool {
        let tag = self.sign_payload(payload);
        let matches: bool = tag.as_slice().ct_eq(expected_tag).into();

        if !matches {
            tracing::debug!(
                algorithm = self.algorithm.as_str(),
                tag_len = expected_tag.len(),
                "HMAC tag mismatch"
            );
        }

        matches
    }

    /// Compute the tag of `payload` and encode it as text.
    ///
    /// # Errors
    /// * `EncoderNotConfigured` - The codec has no variant selected
    pub fn sign_encoded(&self, payload: &[u8], codec: &Codec) -> Result<String, CodecError> {
        codec.encode(&self.sign_payload(payload))
    }

    /// Verify a text-encoded tag. Undecodable text is treated as a mismatch.
    pub fn verify_encoded(&self, payload: &[u8], encoded_tag: &str, codec: &Codec) -> bool {
        match codec.decode(encoded_tag) {
            Ok(tag) => self.verify_tag(payload, &tag),
            Err(_) => false,
        }
    }
}

fn keyed_mac<M: Mac + hmac::digest::KeyInit>(key: &[u8]) -> Result<M, MacError> {
    <M as Mac>::new_from_slice(key)
        .map_err(|e| MacError::InvalidKey(KeyError::InvalidKeyFormat(e.to_string())))
}

fn finish<M: Mac + Clone>(keyed: &M, payload: &[u8]) -> Vec<u8> {
    let mut mac = keyed.clone();
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}
