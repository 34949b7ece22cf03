//! Credential utilities library
//!
//! Thin, typed wrappers around established primitives:
//! - Password hashing (bcrypt)
//! - HMAC message tags and SHA-2 content digests
//! - JWT issuance and validation (HS512 only)
//! - Key generation from an injected random source
//! - Base64 text encoding
//!
//! Every operation is synchronous and returns a typed error. No state is
//! kept between calls beyond what the caller owns.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use credkit::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(4).unwrap();
//! let record = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", record.as_str()).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## JWT Tokens
//! ```
//! use credkit::{Claims, KeyMaterial, TokenService, TOKEN_ALGORITHM};
//!
//! let key = KeyMaterial::from_entropy().generate_for(TOKEN_ALGORITHM).unwrap();
//! let service = TokenService::new(&key).unwrap();
//!
//! let claims = Claims::for_subject("user123", chrono::Duration::hours(1)).unwrap();
//! let token = service.issue(&claims).unwrap();
//! let decoded: Claims = service.validate(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("user123"));
//! ```
//!
//! ## Message Authentication
//! ```
//! use credkit::{KeyMaterial, MessageAuthenticator, SigningAlgorithm};
//!
//! let key = KeyMaterial::from_entropy()
//!     .generate_for(SigningAlgorithm::HS256)
//!     .unwrap();
//! let authenticator = MessageAuthenticator::new(&key, SigningAlgorithm::HS256).unwrap();
//!
//! let tag = authenticator.sign_payload(b"payload");
//! assert!(authenticator.verify_tag(b"payload", &tag));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use credkit::{Authenticator, Claims, Config};
//!
//! let config = Config::from_toml("[password]\ncost = 4").unwrap();
//! let auth = Authenticator::from_config(&config).unwrap();
//!
//! // Register: hash password
//! let record = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let claims = Claims::for_subject("user123", chrono::Duration::hours(24)).unwrap();
//! let result = auth.authenticate("password123", record.as_str(), &claims).unwrap();
//!
//! // Validate token
//! let decoded: Claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("user123"));
//! ```

pub mod algorithm;
pub mod authenticator;
pub mod codec;
pub mod config;
pub mod jwt;
pub mod key;
pub mod mac;
pub mod password;

// Re-export commonly used items
pub use algorithm::DigestAlgorithm;
pub use algorithm::SigningAlgorithm;
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use codec::Codec;
pub use codec::CodecError;
pub use codec::CodecVariant;
pub use self::config::Config;
pub use jwt::Claims;
pub use jwt::ExpiringClaims;
pub use jwt::JwtError;
pub use jwt::TokenService;
pub use jwt::TOKEN_ALGORITHM;
pub use key::Key;
pub use key::KeyError;
pub use key::KeyMaterial;
pub use mac::digest_file;
pub use mac::DigestError;
pub use mac::MacError;
pub use mac::MessageAuthenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::PasswordRecord;
