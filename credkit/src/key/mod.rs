pub mod errors;
pub mod material;
pub mod secret;

pub use errors::KeyError;
pub use material::uuid_key_from_bytes;
pub use material::KeyMaterial;
pub use secret::Key;
