//! Fixtures for minting Approov tokens in tests.

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn mint(secret: &[u8], claims: &Value) -> String {
    mint_with_alg(Algorithm::HS256, secret, claims)
}

pub fn mint_with_alg(alg: Algorithm, secret: &[u8], claims: &Value) -> String {
    let mut header = Header::new(alg);
    header.typ = Some("JWT".to_string());
    jsonwebtoken::encode(&header, claims, &EncodingKey::from_secret(secret))
        .expect("sign test token")
}
