//! # Paystack Transactions
//!
//! Relay for the transaction initialize and verify endpoints.

use crate::config::PaystackConfig;
use crate::PROVIDER;
use async_trait::async_trait;
use pay_core::{
    CardPaymentGateway, CardPaymentInitRequest, GatewayResponse, RelayError, RelayResult,
};
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use tracing::{debug, error, info, instrument};

/// Upstream initialize body (amount already in minor units)
#[derive(Debug, Serialize)]
struct InitializeBody<'a> {
    email: &'a str,
    amount: i64,
}

/// Paystack client implementing the card-payment relay
pub struct PaystackClient {
    config: PaystackConfig,
    client: Client,
}

impl PaystackClient {
    /// Create a new client. No request timeout is set.
    pub fn new(config: PaystackConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| RelayError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> RelayResult<Self> {
        Self::new(PaystackConfig::from_env()?)
    }

    pub fn config(&self) -> &PaystackConfig {
        &self.config
    }

    /// Build the verify URL with the reference as one encoded path segment
    fn verify_url(&self, reference: &str) -> RelayResult<Url> {
        let mut url = Url::parse(&self.config.verify_base_url())
            .map_err(|e| RelayError::Configuration(format!("Invalid Paystack base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| RelayError::Configuration("Paystack base URL cannot be a base".to_string()))?
            .push(reference);
        Ok(url)
    }

    /// Send a request and relay the JSON body
    async fn relay(&self, request: RequestBuilder) -> RelayResult<GatewayResponse> {
        let response = request
            .header("Authorization", self.config.auth_header())
            .send()
            .await
            .map_err(|e| RelayError::upstream(PROVIDER, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RelayError::upstream(PROVIDER, e))?;

        if !status.is_success() {
            error!("Paystack API error: status={}, body={}", status, text);
        } else {
            debug!("Paystack response: status={}, body={}", status, text);
        }

        serde_json::from_str(&text)
            .map(|body| GatewayResponse::new(status.as_u16(), body))
            .map_err(|e| RelayError::ParseFailure {
                provider: PROVIDER.to_string(),
                message: e.to_string(),
                raw: text,
            })
    }
}

#[async_trait]
impl CardPaymentGateway for PaystackClient {
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn initialize(&self, request: &CardPaymentInitRequest) -> RelayResult<GatewayResponse> {
        let amount = request.amount_minor()?;
        info!("Initializing transaction: amount={} (minor units)", amount);

        let body = InitializeBody {
            email: &request.email,
            amount,
        };

        self.relay(self.client.post(self.config.initialize_url()).json(&body))
            .await
    }

    #[instrument(skip(self))]
    async fn verify(&self, reference: &str) -> RelayResult<GatewayResponse> {
        if reference.is_empty() {
            return Err(RelayError::InvalidRequest(
                "reference must not be empty".to_string(),
            ));
        }

        let url = self.verify_url(reference)?;
        info!("Verifying transaction");

        self.relay(self.client.get(url)).await
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
