pub mod bcrypt;
pub mod errors;
pub mod record;

pub use self::bcrypt::hash_with_cost;
pub use self::bcrypt::PasswordHasher;
pub use errors::PasswordError;
pub use record::PasswordRecord;
