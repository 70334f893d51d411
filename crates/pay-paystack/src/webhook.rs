//! # Paystack Webhook Handling
//!
//! Paystack signs each event with `x-paystack-signature`: the hex
//! HMAC-SHA512 of the raw body keyed with the account secret key.

use crate::config::PaystackConfig;
use pay_core::{RelayError, RelayResult};
use serde::Deserialize;

/// Header carrying the event signature
pub const SIGNATURE_HEADER: &str = "x-paystack-signature";

/// A verified Paystack event
#[derive(Debug, Clone, Deserialize)]
pub struct PaystackEvent {
    /// Event type, e.g. `charge.success`
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl PaystackEvent {
    pub fn reference(&self) -> Option<&str> {
        self.data.get("reference").and_then(|v| v.as_str())
    }

    pub fn status(&self) -> Option<&str> {
        self.data.get("status").and_then(|v| v.as_str())
    }

    /// Amount in minor units
    pub fn amount(&self) -> Option<i64> {
        self.data.get("amount").and_then(|v| v.as_i64())
    }
}

/// Verify the signature and parse the event.
///
/// A signature mismatch is reported as `AuthFailure` with status 401.
pub fn verify_webhook(
    config: &PaystackConfig,
    payload: &[u8],
    signature: &str,
) -> RelayResult<PaystackEvent> {
    let expected = compute_hmac_sha512(&config.secret_key, payload);

    if !constant_time_compare(&signature.to_ascii_lowercase(), &expected) {
        return Err(RelayError::AuthFailure {
            provider: crate::PROVIDER.to_string(),
            status: 401,
            body: "Signature mismatch".to_string(),
        });
    }

    serde_json::from_slice(payload).map_err(|e| RelayError::ParseFailure {
        provider: crate::PROVIDER.to_string(),
        message: format!("Failed to parse webhook: {}", e),
        raw: String::from_utf8_lossy(payload).into_owned(),
    })
}

/// Hex HMAC-SHA512 of a payload
pub fn compute_hmac_sha512(secret: &str, payload: &[u8]) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha512;

    type HmacSha512 = Hmac<Sha512>;

    // HMAC accepts keys of any length, so this never fails.
    let mut mac = match HmacSha512::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0, |acc, (x, y)| acc | (x ^ y))
        == 0
}
