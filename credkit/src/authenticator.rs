use std::path::Path;

use chrono::Duration;
use chrono::Utc;
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::algorithm::DigestAlgorithm;
use crate::algorithm::SigningAlgorithm;
use crate::codec::Codec;
use crate::codec::CodecError;
use crate::codec::CodecVariant;
use crate::config::Config;
use crate::jwt::Claims;
use crate::jwt::ExpiringClaims;
use crate::jwt::JwtError;
use crate::jwt::TokenService;
use crate::jwt::TOKEN_ALGORITHM;
use crate::key::Key;
use crate::key::KeyError;
use crate::key::KeyMaterial;
use crate::mac;
use crate::mac::DigestError;
use crate::mac::MacError;
use crate::mac::MessageAuthenticator;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::password::PasswordRecord;

/// Authentication coordinator combining password verification, token
/// handling, and message authentication.
///
/// Built once from a [`Config`] and then shared read-only.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
    message_authenticator: MessageAuthenticator,
    codec: Codec,
    digest_algorithm: DigestAlgorithm,
    token_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,

    /// Whether the stored record was hashed at a different cost than configured
    pub needs_rehash: bool,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token lifetime: {0} minutes")]
    InvalidTokenLifetime(i64),

    #[error("Key error: {0}")]
    KeyError(#[from] KeyError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error("MAC error: {0}")]
    MacError(#[from] MacError),

    #[error("Codec error: {0}")]
    CodecError(#[from] CodecError),

    #[error("Digest error: {0}")]
    DigestError(#[from] DigestError),
}

impl Authenticator {
    /// Create an authenticator from configuration.
    ///
    /// Secrets missing from the configuration are generated with OS-seeded
    /// key material.
    ///
    /// # Errors
    /// * `CodecError` - A configured secret is not valid base64
    /// * `KeyError` - A configured secret has the wrong length
    /// * `PasswordError` - The cost factor is out of range
    /// * `InvalidTokenLifetime` - `ttl_minutes` is not positive or too large
    pub fn from_config(config: &Config) -> Result<Self, AuthenticationError> {
        Self::from_config_with(config, &mut KeyMaterial::from_entropy())
    }

    /// Create an authenticator, generating missing secrets with `material`.
    pub fn from_config_with<R: RngCore>(
        config: &Config,
        material: &mut KeyMaterial<R>,
    ) -> Result<Self, AuthenticationError> {
        let token_ttl = token_lifetime(config.token.ttl_minutes)?;
        let token_key = resolve_key(config.token.secret.as_deref(), TOKEN_ALGORITHM, material)?;
        let mac_key = resolve_key(config.mac.secret.as_deref(), config.mac.algorithm, material)?;

        let codec = config
            .codec
            .variant
            .map(Codec::with_variant)
            .unwrap_or_default();

        tracing::info!(
            cost = config.password.cost,
            mac_algorithm = config.mac.algorithm.as_str(),
            token_ttl_minutes = config.token.ttl_minutes,
            codec = ?codec.variant(),
            "Authenticator configured"
        );

        Ok(Self {
            password_hasher: PasswordHasher::new(config.password.cost)?,
            token_service: TokenService::new(&token_key)?,
            message_authenticator: MessageAuthenticator::new(&mac_key, config.mac.algorithm)?,
            codec,
            digest_algorithm: config.digest.algorithm,
            token_ttl,
        })
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<PasswordRecord, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate JWT token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_record` - Stored password record
    /// * `claims` - JWT claims to encode in token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored record is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate<T: Serialize>(
        &self,
        password: &str,
        stored_record: &str,
        claims: &T,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let record = PasswordRecord::parse(stored_record)?;
        let is_valid = self.password_hasher.verify_record(password, &record)?;

        if !is_valid {
            tracing::debug!("Password did not match stored record");
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(claims)?;

        Ok(AuthenticationResult {
            access_token,
            needs_rehash: self.password_hasher.needs_rehash(&record),
        })
    }

    /// Issue a token for `subject` using the configured lifetime.
    ///
    /// # Errors
    /// * `InvalidLifetime` - The expiry no longer fits the date range
    /// * `SigningFailed` - Token could not be signed
    pub fn issue_for(&self, subject: impl ToString) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, self.token_ttl)?;
        self.token_service.issue(&claims)
    }

    /// Generate JWT token without password verification.
    ///
    /// Useful for token refresh flows or when authentication
    /// has already been verified by other means.
    pub fn generate_token<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        self.token_service.issue(claims)
    }

    /// Validate and decode JWT token.
    pub fn validate_token<T>(&self, token: &str) -> Result<T, JwtError>
    where
        T: DeserializeOwned + ExpiringClaims,
    {
        self.token_service.validate(token)
    }

    pub fn sign_message(&self, payload: &[u8]) -> Vec<u8> {
        self.message_authenticator.sign_payload(payload)
    }

    pub fn verify_message(&self, payload: &[u8], tag: &[u8]) -> bool {
        self.message_authenticator.verify_tag(payload, tag)
    }

    /// Sign a message and encode the tag with the configured codec.
    ///
    /// # Errors
    /// * `EncoderNotConfigured` - No codec variant is configured
    pub fn sign_message_encoded(&self, payload: &[u8]) -> Result<String, CodecError> {
        self.message_authenticator.sign_encoded(payload, &self.codec)
    }

    pub fn verify_message_encoded(&self, payload: &[u8], encoded_tag: &str) -> bool {
        self.message_authenticator
            .verify_encoded(payload, encoded_tag, &self.codec)
    }

    /// Digest a file with the configured algorithm.
    pub fn digest_file(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, DigestError> {
        mac::digest_file(path, self.digest_algorithm)
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }
}

/// Convert the configured lifetime, rejecting values that cannot produce
/// a live token.
fn token_lifetime(minutes: i64) -> Result<Duration, AuthenticationError> {
    let ttl = Some(minutes)
        .filter(|minutes| *minutes > 0)
        .and_then(Duration::try_minutes)
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some());

    ttl.ok_or_else(|| {
        tracing::warn!(ttl_minutes = minutes, "Rejected token lifetime");
        AuthenticationError::InvalidTokenLifetime(minutes)
    })
}

/// Decode a configured secret, or generate one sized for `algorithm`.
fn resolve_key<R: RngCore>(
    secret: Option<&str>,
    algorithm: SigningAlgorithm,
    material: &mut KeyMaterial<R>,
) -> Result<Key, AuthenticationError> {
    match secret {
        Some(encoded) => {
            let key = Key::from_bytes(Codec::with_variant(CodecVariant::Standard).decode(encoded)?);
            key.ensure_fits(algorithm)?;
            Ok(key)
        }
        None => {
            tracing::info!(
                algorithm = algorithm.as_str(),
                "No secret configured, generating key"
            );
            Ok(material.generate_for(algorithm)?)
        }
    }
}
