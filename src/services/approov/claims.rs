use serde::Deserialize;
use serde_json::{Map, Value};

/// Claims of a verified Approov token.
///
/// Holds the full decoded payload. Only `TokenVerifier` builds one, so holding
/// an `ApproovClaims` means the signature, algorithm and `exp` checks passed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ApproovClaims(Map<String, Value>);

impl ApproovClaims {
    /// Expiration (whole seconds since epoch). A fractional `exp` is truncated.
    pub fn exp(&self) -> Option<u64> {
        let exp = self.0.get("exp")?;
        exp.as_u64().or_else(|| {
            exp.as_f64()
                .filter(|secs| secs.is_finite() && *secs >= 0.0)
                .map(|secs| secs as u64)
        })
    }

    /// Expiration as sent, fractional part included.
    pub(crate) fn exp_seconds(&self) -> Option<f64> {
        self.0.get("exp").and_then(Value::as_f64)
    }

    /// Token binding claim: base64(SHA-256(binding header)).
    pub fn pay(&self) -> Option<&Value> {
        self.0.get("pay")
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    #[cfg(test)]
    pub(crate) fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}
