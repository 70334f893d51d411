//! # STK Push
//!
//! Lipa na M-Pesa Online (STK push) request construction and relay.

use crate::auth::fetch_access_token;
use crate::config::MpesaConfig;
use crate::PROVIDER;
use async_trait::async_trait;
use base64::{prelude::BASE64_STANDARD, Engine};
use chrono::{DateTime, Utc};
use pay_core::{GatewayResponse, PushPaymentGateway, PushPaymentRequest, RelayError, RelayResult};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error, info, instrument};

/// Transaction type for paybill STK pushes
pub const TRANSACTION_TYPE: &str = "CustomerPayBillOnline";

/// Format an instant as the 14-digit `YYYYMMDDHHMMSS` Daraja timestamp (UTC).
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d%H%M%S").to_string()
}

/// Derive the request password: `base64(shortcode + passkey + timestamp)`.
pub fn stk_password(shortcode: &str, passkey: &str, timestamp: &str) -> String {
    BASE64_STANDARD.encode(format!("{}{}{}", shortcode, passkey, timestamp))
}

/// Upstream STK push body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct StkPushPayload {
    pub business_short_code: String,
    pub password: String,
    pub timestamp: String,
    pub transaction_type: &'static str,
    pub amount: serde_json::Number,
    #[serde(rename = "PartyA")]
    pub party_a: String,
    #[serde(rename = "PartyB")]
    pub party_b: String,
    pub phone_number: String,
    #[serde(rename = "CallBackURL")]
    pub callback_url: String,
    pub account_reference: String,
    pub transaction_desc: String,
}

impl StkPushPayload {
    /// Build the payload for a request at the given instant
    pub fn build(config: &MpesaConfig, request: &PushPaymentRequest, at: DateTime<Utc>) -> Self {
        let timestamp = format_timestamp(at);
        let password = stk_password(&config.shortcode, &config.passkey, &timestamp);

        Self {
            business_short_code: config.shortcode.clone(),
            password,
            timestamp,
            transaction_type: TRANSACTION_TYPE,
            amount: request.amount.clone(),
            party_a: request.phone.clone(),
            party_b: config.shortcode.clone(),
            phone_number: request.phone.clone(),
            callback_url: config.callback_url.clone(),
            account_reference: config.account_reference.clone(),
            transaction_desc: config.transaction_desc.clone(),
        }
    }
}

/// Daraja client implementing the push-payment relay
pub struct MpesaClient {
    config: MpesaConfig,
    client: Client,
}

impl MpesaClient {
    /// Create a new client. No request timeout is set.
    pub fn new(config: MpesaConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| RelayError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> RelayResult<Self> {
        Self::new(MpesaConfig::from_env()?)
    }

    pub fn config(&self) -> &MpesaConfig {
        &self.config
    }
}

#[async_trait]
impl PushPaymentGateway for MpesaClient {
    #[instrument(skip(self, request), fields(phone = %request.phone, amount = %request.amount))]
    async fn push_payment(&self, request: &PushPaymentRequest) -> RelayResult<GatewayResponse> {
        info!("Received STK push request");

        let token = fetch_access_token(&self.client, &self.config).await?;
        let payload = StkPushPayload::build(&self.config, request, Utc::now());

        let response = self
            .client
            .post(self.config.stk_push_url())
            .bearer_auth(&token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::upstream(PROVIDER, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RelayError::upstream(PROVIDER, e))?;

        debug!("Raw STK push response: status={}, body={}", status, text);

        match serde_json::from_str(&text) {
            Ok(body) => Ok(GatewayResponse::new(status.as_u16(), body)),
            Err(e) => {
                error!("Failed to parse STK push response as JSON: {}", e);
                Err(RelayError::ParseFailure {
                    provider: PROVIDER.to_string(),
                    message: e.to_string(),
                    raw: text,
                })
            }
        }
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
