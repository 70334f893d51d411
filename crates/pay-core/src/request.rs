//! # Relay Request Types
//!
//! Transient request/response shapes for the relay endpoints.
//! Nothing here outlives a single HTTP request.

use crate::error::{RelayError, RelayResult};
use serde::{Deserialize, Serialize};

/// Multiplier from major to minor currency units (cents, kobo)
pub const MINOR_UNITS_PER_MAJOR: f64 = 100.0;

/// Mobile-money push request from a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushPaymentRequest {
    /// Customer MSISDN, forwarded as-is
    pub phone: String,
    /// Amount, forwarded as the JSON number the client sent
    pub amount: serde_json::Number,
}

/// Card-payment initialization request from a client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardPaymentInitRequest {
    /// Customer email
    pub email: String,
    /// Amount in major currency units
    pub amount: f64,
}

impl CardPaymentInitRequest {
    /// Convert the major-unit amount to the gateway's minor unit.
    pub fn amount_minor(&self) -> RelayResult<i64> {
        to_minor_units(self.amount)
    }
}

/// Convert a decimal major-unit amount to minor units
pub fn to_minor_units(amount: f64) -> RelayResult<i64> {
    if !amount.is_finite() {
        return Err(RelayError::InvalidRequest(
            "amount must be a finite number".to_string(),
        ));
    }
    if amount < 0.0 {
        return Err(RelayError::InvalidRequest(
            "amount must not be negative".to_string(),
        ));
    }
    Ok((amount * MINOR_UNITS_PER_MAJOR).round() as i64)
}

/// A gateway reply whose body parsed as JSON
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    /// Upstream HTTP status
    pub status: u16,
    /// Upstream body, unmodified
    pub body: serde_json::Value,
}

impl GatewayResponse {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minor_units() {
        assert_eq!(to_minor_units(100.0).unwrap(), 10000);
        assert_eq!(to_minor_units(0.0).unwrap(), 0);
        assert_eq!(to_minor_units(19.99).unwrap(), 1999);
    }

    #[test]
    fn test_minor_units_rejects_bad_amounts() {
        assert!(matches!(
            to_minor_units(-1.0),
            Err(RelayError::InvalidRequest(_))
        ));
        assert!(to_minor_units(f64::NAN).is_err());
        assert!(to_minor_units(f64::INFINITY).is_err());
    }

    #[test]
    fn test_push_request_keeps_amount_number() {
        let req: PushPaymentRequest =
            serde_json::from_value(json!({"phone": "254708374149", "amount": 1})).unwrap();
        assert_eq!(req.phone, "254708374149");
        assert_eq!(serde_json::to_value(&req.amount).unwrap(), json!(1));
    }

    #[test]
    fn test_push_request_requires_fields() {
        let result: Result<PushPaymentRequest, _> =
            serde_json::from_value(json!({"phone": "254708374149"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_card_init_request() {
        let req: CardPaymentInitRequest =
            serde_json::from_value(json!({"email": "a@b.co", "amount": 100})).unwrap();
        assert_eq!(req.amount_minor().unwrap(), 10000);
    }

    #[test]
    fn test_gateway_response_success() {
        assert!(GatewayResponse::new(200, json!({})).is_success());
        assert!(!GatewayResponse::new(400, json!({})).is_success());
    }
}
