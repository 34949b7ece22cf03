pub mod claims;
pub mod errors;
pub mod service;

pub use claims::Claims;
pub use claims::ExpiringClaims;
pub use claims::REGISTERED_CLAIMS;
pub use errors::JwtError;
pub use service::TokenService;
pub use service::TOKEN_ALGORITHM;
