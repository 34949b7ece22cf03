use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::ser::Error as _;
use serde::ser::SerializeMap;
use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;

use super::errors::JwtError;

/// Claim names held by the named fields of [`Claims`].
pub const REGISTERED_CLAIMS: [&str; 7] = ["exp", "sub", "iat", "nbf", "iss", "aud", "jti"];

/// Claims payloads that carry an expiration time.
///
/// Token validation reads these timestamps after the signature check.
pub trait ExpiringClaims {
    /// Expiration time (Unix timestamp, seconds).
    fn expires_at(&self) -> i64;

    /// Not-before time (Unix timestamp, seconds), if any.
    fn not_before(&self) -> Option<i64> {
        None
    }
}

/// JWT claims structure.
///
/// `exp` is mandatory; the other RFC 7519 claims are optional, and
/// application fields travel in `extra`, flattened into the payload.
/// Serialization fails when an `extra` name shadows a registered claim.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Claims {
    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Subject (user/entity identifier)
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    pub iat: Option<i64>,

    /// Not before (Unix timestamp)
    pub nbf: Option<i64>,

    pub iss: Option<String>,

    pub aud: Option<String>,

    /// JWT ID (unique token identifier)
    pub jti: Option<String>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims expiring at `exp` (Unix timestamp, seconds).
    pub fn expiring_at(exp: i64) -> Self {
        Self {
            exp,
            sub: None,
            iat: None,
            nbf: None,
            iss: None,
            aud: None,
            jti: None,
            extra: HashMap::new(),
        }
    }

    /// Create claims issued now and expiring after `ttl`.
    ///
    /// # Errors
    /// * `InvalidLifetime` - `ttl` is under one second, or the expiry is
    ///   past the representable date range
    pub fn expiring_in(ttl: Duration) -> Result<Self, JwtError> {
        if ttl.num_seconds() < 1 {
            return Err(JwtError::InvalidLifetime(format!(
                "{} seconds is not a positive lifetime",
                ttl.num_seconds()
            )));
        }

        let now = Utc::now();
        let exp = now.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::InvalidLifetime(format!(
                "{} seconds overflows the expiration date",
                ttl.num_seconds()
            ))
        })?;

        Ok(Self::expiring_at(exp.timestamp()).with_issued_at(now.timestamp()))
    }

    /// Create claims for an authenticated subject.
    ///
    /// # Arguments
    /// * `subject` - Unique user/entity identifier
    /// * `ttl` - Lifetime of the token
    ///
    /// # Returns
    /// Claims with sub, exp, and iat set
    ///
    /// # Errors
    /// * `InvalidLifetime` - See [`Claims::expiring_in`]
    pub fn for_subject(subject: impl ToString, ttl: Duration) -> Result<Self, JwtError> {
        Ok(Self::expiring_in(ttl)?.with_subject(subject))
    }

    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    pub fn with_issuer(mut self, iss: impl ToString) -> Self {
        self.iss = Some(iss.to_string());
        self
    }

    pub fn with_audience(mut self, aud: impl ToString) -> Self {
        self.aud = Some(aud.to_string());
        self
    }

    pub fn with_token_id(mut self, jti: impl ToString) -> Self {
        self.jti = Some(jti.to_string());
        self
    }

    /// Add a custom field. Values that fail to serialize are skipped.
    ///
    /// Names from [`REGISTERED_CLAIMS`] are kept here but make the claims
    /// fail to serialize, so a token is never issued with them.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(json_value) => {
                self.extra.insert(key.to_string(), json_value);
            }
            Err(e) => {
                tracing::warn!(field = %key.to_string(), error = %e, "Skipped unserializable claim");
            }
        }
        self
    }

    pub fn extra(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }

    /// Whether the claims are expired at `current_timestamp`.
    ///
    /// A token is expired from the expiration second onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}

impl Serialize for Claims {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Some(name) = self
            .extra
            .keys()
            .find(|name| REGISTERED_CLAIMS.contains(&name.as_str()))
        {
            return Err(S::Error::custom(format!(
                "custom claim `{name}` shadows a registered claim"
            )));
        }

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("exp", &self.exp)?;
        if let Some(sub) = &self.sub {
            map.serialize_entry("sub", sub)?;
        }
        if let Some(iat) = &self.iat {
            map.serialize_entry("iat", iat)?;
        }
        if let Some(nbf) = &self.nbf {
            map.serialize_entry("nbf", nbf)?;
        }
        if let Some(iss) = &self.iss {
            map.serialize_entry("iss", iss)?;
        }
        if let Some(aud) = &self.aud {
            map.serialize_entry("aud", aud)?;
        }
        if let Some(jti) = &self.jti {
            map.serialize_entry("jti", jti)?;
        }
        for (name, value) in &self.extra {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl ExpiringClaims for Claims {
    fn expires_at(&self) -> i64 {
        self.exp
    }

    fn not_before(&self) -> Option<i64> {
        self.nbf
    }
}
