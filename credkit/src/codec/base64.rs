use base64::engine::general_purpose::STANDARD;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::engine::general_purpose::URL_SAFE;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::engine::GeneralPurpose;
use base64::Engine;
use serde::Deserialize;

use super::errors::CodecError;

/// Base64 alphabet and padding combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecVariant {
    Standard,
    StandardNoPad,
    UrlSafe,
    UrlSafeNoPad,
}

impl CodecVariant {
    fn engine(self) -> &'static GeneralPurpose {
        match self {
            CodecVariant::Standard => &STANDARD,
            CodecVariant::StandardNoPad => &STANDARD_NO_PAD,
            CodecVariant::UrlSafe => &URL_SAFE,
            CodecVariant::UrlSafeNoPad => &URL_SAFE_NO_PAD,
        }
    }
}

/// Text-safe encoding for byte payloads.
///
/// The variant is chosen once and reused by every later call. Decoding
/// before a variant is chosen is an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    variant: Option<CodecVariant>,
}

impl Codec {
    /// Create a codec with no variant selected.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_variant(variant: CodecVariant) -> Self {
        Self {
            variant: Some(variant),
        }
    }

    pub fn select(&mut self, variant: CodecVariant) {
        self.variant = Some(variant);
    }

    pub fn variant(&self) -> Option<CodecVariant> {
        self.variant
    }

    /// Select `variant` and encode `bytes` with it.
    pub fn encode_with(&mut self, variant: CodecVariant, bytes: &[u8]) -> String {
        self.select(variant);
        variant.engine().encode(bytes)
    }

    /// Encode with the selected variant.
    ///
    /// # Errors
    /// * `EncoderNotConfigured` - No variant has been selected
    pub fn encode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        Ok(self.engine()?.encode(bytes))
    }

    /// Decode with the selected variant.
    ///
    /// # Errors
    /// * `EncoderNotConfigured` - No variant has been selected
    /// * `Decode` - Text is not valid for the selected variant
    pub fn decode(&self, text: &str) -> Result<Vec<u8>, CodecError> {
        self.engine()?.decode(text).map_err(|e| {
            tracing::debug!(error = %e, "Failed to decode text");
            CodecError::Decode(e.to_string())
        })
    }

    fn engine(&self) -> Result<&'static GeneralPurpose, CodecError> {
        self.variant
            .map(CodecVariant::engine)
            .ok_or(CodecError::EncoderNotConfigured)
    }
}
