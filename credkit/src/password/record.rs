use std::fmt;
use std::str::FromStr;

use bcrypt::HashParts;

use super::errors::PasswordError;

/// Stored password hash in bcrypt modular crypt format (`$2b$12$...`).
///
/// Interoperable with any standard bcrypt verifier.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordRecord {
    encoded: String,
    cost: u32,
}

impl PasswordRecord {
    /// Parse a stored record.
    ///
    /// # Errors
    /// * `InvalidRecord` - Text is not a bcrypt hash string
    pub fn parse(encoded: &str) -> Result<Self, PasswordError> {
        let parts = HashParts::from_str(encoded)
            .map_err(|e| PasswordError::InvalidRecord(e.to_string()))?;

        Ok(Self {
            encoded: encoded.to_string(),
            cost: parts.get_cost(),
        })
    }

    /// Cost factor the record was hashed with.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn as_str(&self) -> &str {
        &self.encoded
    }

    pub fn into_string(self) -> String {
        self.encoded
    }
}

impl FromStr for PasswordRecord {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for PasswordRecord {
    fn as_ref(&self) -> &str {
        &self.encoded
    }
}

impl fmt::Display for PasswordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encoded)
    }
}

impl fmt::Debug for PasswordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordRecord")
            .field("cost", &self.cost)
            .finish_non_exhaustive()
    }
}
