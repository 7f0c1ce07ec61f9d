//! Local inspection of the bearer token's expiry claim.
//!
//! The server issues JWTs; the client never validates the signature, it only
//! reads the `exp` claim to decide whether re-authentication is needed before
//! wasting a round trip. Any ambiguity is treated as expired.

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Check whether a token's `exp` claim has passed.
/// Returns true on any parse failure - a token we cannot read is a token
/// we must not trust.
pub fn token_expired(token: &str) -> bool {
    token_expired_at(token, Utc::now())
}

/// Expiry check against an explicit clock, used by tests
pub fn token_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    match expiry_timestamp(token) {
        Some(exp) => now.timestamp() >= exp,
        None => true,
    }
}

/// Decode the payload segment and extract `exp` as a Unix timestamp
fn expiry_timestamp(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;

    // JWT payloads are URL-safe base64 without padding; pad back out to a
    // multiple of 4 before decoding.
    let mut padded = payload.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }

    let bytes = URL_SAFE.decode(padded).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    let exp = claims.get("exp")?;
    exp.as_i64()
        .or_else(|| exp.as_f64().map(|exp| exp.floor() as i64))
}
