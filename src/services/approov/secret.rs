use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::config::{APPROOV_SECRET_ENV, ConfigError};

// Standard alphabet; padding is accepted but not required.
const SECRET_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Shared HMAC secret used to verify Approov tokens.
///
/// - Decoded once at startup and never mutated afterwards.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct ApproovSecret {
    bytes: Vec<u8>,
}

impl std::fmt::Debug for ApproovSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApproovSecret")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl ApproovSecret {
    pub fn from_base64(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::Missing(APPROOV_SECRET_ENV));
        }

        let bytes = SECRET_ENGINE
            .decode(value)
            .map_err(|_| ConfigError::Invalid(APPROOV_SECRET_ENV))?;

        if bytes.is_empty() {
            return Err(ConfigError::Invalid(APPROOV_SECRET_ENV));
        }

        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
impl ApproovSecret {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }
}
