pub mod authenticator;
pub mod digest;
pub mod errors;

pub use authenticator::MessageAuthenticator;
pub use digest::digest_bytes;
pub use digest::digest_file;
pub use digest::digest_reader;
pub use errors::DigestError;
pub use errors::MacError;
