use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;

use super::claims::ExpiringClaims;
use super::errors::JwtError;
use crate::algorithm::SigningAlgorithm;
use crate::key::Key;

/// The only algorithm tokens are signed and accepted with.
pub const TOKEN_ALGORITHM: SigningAlgorithm = SigningAlgorithm::HS512;

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

/// Header fields inspected before the signature is checked.
#[derive(Deserialize)]
struct DeclaredHeader {
    alg: String,
}

/// JWT issuance and validation with a fixed HS512 scheme.
///
/// Generic over the claims type to allow callers to define their own token
/// payload. Validation is stateless: a token stays valid until its `exp`
/// and cannot be revoked earlier.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    /// Create a token service with a signing key.
    ///
    /// # Errors
    /// * `InvalidKey` - Key is not exactly 64 bytes
    pub fn new(key: &Key) -> Result<Self, JwtError> {
        key.ensure_fits(TOKEN_ALGORITHM)?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
        })
    }

    /// Encode and sign claims into a compact JWT.
    ///
    /// # Errors
    /// * `SigningFailed` - Claims could not be serialized or signed
    pub fn issue<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(JWT_ALGORITHM);

        encode(&header, claims, &self.encoding_key).map_err(|e| {
            tracing::warn!(error = %e, "Failed to sign token");
            JwtError::SigningFailed(e.to_string())
        })
    }

    /// Validate a token against the current time.
    ///
    /// See [`TokenService::validate_at`].
    pub fn validate<T>(&self, token: &str) -> Result<T, JwtError>
    where
        T: DeserializeOwned + ExpiringClaims,
    {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate a token at `now` (Unix timestamp, seconds).
    ///
    /// Checks run in order: structure, declared algorithm, signature,
    /// expiration, not-before.
    ///
    /// # Errors
    /// * `Malformed` - Token is not three base64url segments of JSON
    /// * `AlgorithmMismatch` - Header declares anything other than HS512
    /// * `SignatureInvalid` - Signature does not match the key
    /// * `MissingClaim` - `exp` is absent
    /// * `TokenExpired` - `now` is at or past `exp`
    /// * `NotYetValid` - `now` is before `nbf`
    pub fn validate_at<T>(&self, token: &str, now: i64) -> Result<T, JwtError>
    where
        T: DeserializeOwned + ExpiringClaims,
    {
        let declared = declared_algorithm(token)?;
        if declared != TOKEN_ALGORITHM.as_str() {
            tracing::warn!(
                expected = TOKEN_ALGORITHM.as_str(),
                found = %declared,
                "Rejected token with unexpected algorithm"
            );
            return Err(JwtError::AlgorithmMismatch {
                expected: TOKEN_ALGORITHM.as_str(),
                found: declared,
            });
        }

        let mut validation = Validation::new(JWT_ALGORITHM);
        // Time-based checks are done below against the supplied clock
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        let token_data = decode::<serde_json::Value>(token, &self.decoding_key, &validation)
            .map_err(|e| map_decode_error(e, &declared))?;

        let claims: T = serde_json::from_value(token_data.claims)
            .map_err(|e| JwtError::Malformed(e.to_string()))?;

        if now >= claims.expires_at() {
            tracing::debug!(exp = claims.expires_at(), now, "Rejected expired token");
            return Err(JwtError::TokenExpired);
        }

        if claims.not_before().is_some_and(|nbf| now < nbf) {
            tracing::debug!(now, "Rejected token before its nbf");
            return Err(JwtError::NotYetValid);
        }

        Ok(claims)
    }

    /// Decode token without validation (for inspection only).
    ///
    /// # Security Warning
    /// This does NOT validate the signature or the expiration. Never trust
    /// claims from this method for authorization decisions.
    pub fn decode_unverified<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<T>(token, &self.decoding_key, &validation)
            .map_err(|e| JwtError::Malformed(e.to_string()))?;

        Ok(token_data.claims)
    }
}

/// Read the `alg` a token declares, without trusting anything else in it.
fn declared_algorithm(token: &str) -> Result<String, JwtError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(JwtError::Malformed(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }

    let header_bytes = URL_SAFE_NO_PAD
        .decode(segments[0])
        .map_err(|e| JwtError::Malformed(format!("header: {}", e)))?;
    let header: DeclaredHeader = serde_json::from_slice(&header_bytes)
        .map_err(|e| JwtError::Malformed(format!("header: {}", e)))?;

    Ok(header.alg)
}

fn map_decode_error(error: jsonwebtoken::errors::Error, declared: &str) -> JwtError {
    match error.kind() {
        ErrorKind::InvalidSignature => {
            tracing::warn!("Rejected token with invalid signature");
            JwtError::SignatureInvalid
        }
        ErrorKind::InvalidAlgorithm => JwtError::AlgorithmMismatch {
            expected: TOKEN_ALGORITHM.as_str(),
            found: declared.to_string(),
        },
        ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
        ErrorKind::ExpiredSignature => JwtError::TokenExpired,
        ErrorKind::ImmatureSignature => JwtError::NotYetValid,
        _ => JwtError::Malformed(error.to_string()),
    }
}
