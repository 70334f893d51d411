//! # M-Pesa Configuration
//!
//! Configuration management for the Daraja (M-Pesa) integration.
//! All secrets are loaded from environment variables.

use base64::{prelude::BASE64_STANDARD, Engine};
use pay_core::RelayError;
use std::env;

/// Daraja sandbox host
pub const DEFAULT_API_BASE_URL: &str = "https://sandbox.safaricom.co.ke";

const DEFAULT_ACCOUNT_REFERENCE: &str = "OnlineTasks";
const DEFAULT_TRANSACTION_DESC: &str = "Account activation payment";

/// Daraja API configuration
#[derive(Debug, Clone)]
pub struct MpesaConfig {
    /// App consumer key
    pub consumer_key: String,

    /// App consumer secret
    pub consumer_secret: String,

    /// Business shortcode (till / paybill)
    pub shortcode: String,

    /// Lipa na M-Pesa Online passkey
    pub passkey: String,

    /// Public URL the gateway posts results to
    pub callback_url: String,

    /// Account reference shown to the customer
    pub account_reference: String,

    /// Transaction description
    pub transaction_desc: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,
}

impl MpesaConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `CONSUMER_KEY`
    /// - `CONSUMER_SECRET`
    /// - `SHORTCODE`
    /// - `PASSKEY`
    /// - `CALLBACK_URL`
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let config = Self {
            consumer_key: required("CONSUMER_KEY")?,
            consumer_secret: required("CONSUMER_SECRET")?,
            shortcode: required("SHORTCODE")?,
            passkey: required("PASSKEY")?,
            callback_url: required("CALLBACK_URL")?,
            account_reference: env::var("MPESA_ACCOUNT_REFERENCE")
                .unwrap_or_else(|_| DEFAULT_ACCOUNT_REFERENCE.to_string()),
            transaction_desc: env::var("MPESA_TRANSACTION_DESC")
                .unwrap_or_else(|_| DEFAULT_TRANSACTION_DESC.to_string()),
            api_base_url: env::var("MPESA_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// The gateway must be able to reach the callback, so it has to be absolute.
    pub fn validate(&self) -> Result<(), RelayError> {
        if !self.callback_url.starts_with("http://") && !self.callback_url.starts_with("https://") {
            return Err(RelayError::Configuration(
                "CALLBACK_URL must be an absolute http(s) URL".to_string(),
            ));
        }
        Ok(())
    }

    /// Create config with explicit values (for testing)
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        shortcode: impl Into<String>,
        passkey: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            shortcode: shortcode.into(),
            passkey: passkey.into(),
            callback_url: callback_url.into(),
            account_reference: DEFAULT_ACCOUNT_REFERENCE.to_string(),
            transaction_desc: DEFAULT_TRANSACTION_DESC.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Basic authorization header value for the OAuth endpoint
    pub fn basic_auth_header(&self) -> String {
        let credentials = format!("{}:{}", self.consumer_key, self.consumer_secret);
        format!("Basic {}", BASE64_STANDARD.encode(credentials))
    }

    /// OAuth token endpoint
    pub fn token_url(&self) -> String {
        format!(
            "{}/oauth/v1/generate?grant_type=client_credentials",
            self.api_base_url.trim_end_matches('/')
        )
    }

    /// STK push endpoint
    pub fn stk_push_url(&self) -> String {
        format!(
            "{}/mpesa/stkpush/v1/processrequest",
            self.api_base_url.trim_end_matches('/')
        )
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set account reference and description
    pub fn with_account(mut self, reference: impl Into<String>, desc: impl Into<String>) -> Self {
        self.account_reference = reference.into();
        self.transaction_desc = desc.into();
        self
    }
}

fn required(key: &str) -> Result<String, RelayError> {
    env::var(key).map_err(|_| RelayError::Configuration(format!("{} not set", key)))
}
