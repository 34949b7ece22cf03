use super::errors::PasswordError;
use super::record::PasswordRecord;

/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Highest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Password hashing implementation.
///
/// Provides adaptive, salted password hashing (internally uses bcrypt).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with the given work factor.
    ///
    /// # Arguments
    /// * `cost` - bcrypt cost factor, between 4 and 31
    ///
    /// # Errors
    /// * `InvalidCost` - Cost is outside the accepted range
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        validate_cost(cost)?;
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is generated for every call.
    ///
    /// # Returns
    /// Record in modular crypt format (includes version, cost, salt, and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<PasswordRecord, PasswordError> {
        hash_with_cost(password, self.cost)
    }

    /// Verify a password against a stored record.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `record` - Stored record in modular crypt format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidRecord` - Record format is invalid
    pub fn verify(&self, password: &str, record: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordRecord::parse(record).map_err(|e| {
            tracing::warn!(error = %e, "Rejected malformed password record");
            e
        })?;

        self.verify_record(password, &parsed)
    }

    /// Verify a password against an already parsed record.
    pub fn verify_record(
        &self,
        password: &str,
        record: &PasswordRecord,
    ) -> Result<bool, PasswordError> {
        bcrypt::verify(password, record.as_str())
            .map_err(|e| PasswordError::InvalidRecord(e.to_string()))
    }

    /// Whether a record was hashed with a different cost than this hasher uses.
    pub fn needs_rehash(&self, record: &PasswordRecord) -> bool {
        record.cost() != self.cost
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Hash a password at an explicit cost.
///
/// # Errors
/// * `InvalidCost` - Cost is outside the accepted range
/// * `HashingFailed` - The bcrypt primitive failed
pub fn hash_with_cost(password: &str, cost: u32) -> Result<PasswordRecord, PasswordError> {
    validate_cost(cost)?;

    let encoded = bcrypt::hash(password, cost).map_err(|e| {
        tracing::warn!(cost, error = %e, "Password hashing failed");
        PasswordError::HashingFailed(e.to_string())
    })?;

    tracing::debug!(cost, "Password hashed");

    PasswordRecord::parse(&encoded)
}

fn validate_cost(cost: u32) -> Result<(), PasswordError> {
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        return Err(PasswordError::InvalidCost {
            cost,
            min: MIN_COST,
            max: MAX_COST,
        });
    }
    Ok(())
}
