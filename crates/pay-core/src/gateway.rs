//! # Gateway Traits
//!
//! Seams between the HTTP layer and the upstream payment gateways.
//! Implementations: M-Pesa (push payments), Paystack (card payments).
//!
//! ```text
//! ┌──────────────────────────────┐   ┌──────────────────────────────┐
//! │  PushPaymentGateway (trait)  │   │  CardPaymentGateway (trait)  │
//! │  └── push_payment()          │   │  ├── initialize()            │
//! │                              │   │  └── verify()                │
//! └──────────────▲───────────────┘   └──────────────▲───────────────┘
//!                │                                  │
//!        ┌───────┴───────┐                  ┌───────┴───────┐
//!        │  MpesaClient  │                  │PaystackClient │
//!        └───────────────┘                  └───────────────┘
//! ```

use crate::error::RelayResult;
use crate::request::{CardPaymentInitRequest, GatewayResponse, PushPaymentRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Mobile-money gateway that can prompt a customer's phone for payment.
#[async_trait]
pub trait PushPaymentGateway: Send + Sync {
    /// Acquire credentials and issue one push-payment request.
    ///
    /// Returns the gateway's JSON reply unmodified. Fails with
    /// `AuthFailure` before any push is attempted if credentials are refused.
    async fn push_payment(&self, request: &PushPaymentRequest) -> RelayResult<GatewayResponse>;

    /// Get the provider name (for logging and error envelopes).
    fn provider_name(&self) -> &'static str;
}

/// Card-payment gateway with hosted initialization and verification.
#[async_trait]
pub trait CardPaymentGateway: Send + Sync {
    /// Initialize a transaction. The amount is converted to minor units.
    async fn initialize(&self, request: &CardPaymentInitRequest) -> RelayResult<GatewayResponse>;

    /// Verify a transaction by its reference.
    async fn verify(&self, reference: &str) -> RelayResult<GatewayResponse>;

    /// Get the provider name (for logging and error envelopes).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared push-payment gateway (dynamic dispatch)
pub type BoxedPushGateway = Arc<dyn PushPaymentGateway>;

/// Type alias for a shared card-payment gateway (dynamic dispatch)
pub type BoxedCardGateway = Arc<dyn CardPaymentGateway>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoGateway;

    #[async_trait]
    impl PushPaymentGateway for EchoGateway {
        async fn push_payment(
            &self,
            request: &PushPaymentRequest,
        ) -> RelayResult<GatewayResponse> {
            Ok(GatewayResponse::new(200, json!({ "phone": request.phone })))
        }

        fn provider_name(&self) -> &'static str {
            "echo"
        }
    }

    #[tokio::test]
    async fn test_boxed_gateway_dispatch() {
        let gateway: BoxedPushGateway = Arc::new(EchoGateway);
        let request = PushPaymentRequest {
            phone: "254700000000".into(),
            amount: 5u64.into(),
        };

        let response = gateway.push_payment(&request).await.unwrap();
        assert_eq!(response.body["phone"], "254700000000");
        assert_eq!(gateway.provider_name(), "echo");
    }
}
