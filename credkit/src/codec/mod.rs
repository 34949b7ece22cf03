pub mod base64;
pub mod errors;

pub use self::base64::Codec;
pub use self::base64::CodecVariant;
pub use errors::CodecError;
