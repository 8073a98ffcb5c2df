use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AttestationStatus {
    pub attested: bool,
    // true when the token carries a `pay` claim
    pub token_bound: bool,
    pub token_expires_at: DateTime<Utc>,
}
