//! # Application State
//!
//! Shared state for the Axum application.
//! Built once at startup and cloned into every handler; never mutated.

use pay_core::{BoxedCardGateway, BoxedPushGateway};
use pay_mpesa::{LoggingStkCallbackHandler, MpesaClient, MpesaConfig, StkCallbackHandler};
use pay_paystack::{PaystackClient, PaystackConfig};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "development".to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Mobile-money push gateway
    pub push_gateway: BoxedPushGateway,
    /// Card-payment gateway
    pub card_gateway: BoxedCardGateway,
    /// Receives STK result callbacks
    pub callback_handler: Arc<dyn StkCallbackHandler>,
    /// Card gateway config (webhook signing key)
    pub paystack: PaystackConfig,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with gateways configured from the environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let mpesa_config = MpesaConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize M-Pesa: {}", e))?;
        let paystack_config = PaystackConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Paystack: {}", e))?;

        Self::from_configs(config, mpesa_config, paystack_config)
    }

    /// Create an AppState from explicit configuration
    pub fn from_configs(
        config: AppConfig,
        mpesa: MpesaConfig,
        paystack: PaystackConfig,
    ) -> anyhow::Result<Self> {
        let mpesa_client =
            MpesaClient::new(mpesa).map_err(|e| anyhow::anyhow!("M-Pesa client: {}", e))?;
        let paystack_client = PaystackClient::new(paystack.clone())
            .map_err(|e| anyhow::anyhow!("Paystack client: {}", e))?;

        Ok(Self::with_gateways(
            config,
            Arc::new(mpesa_client),
            Arc::new(paystack_client),
            paystack,
        ))
    }

    /// Assemble state from already-built gateways
    pub fn with_gateways(
        config: AppConfig,
        push_gateway: BoxedPushGateway,
        card_gateway: BoxedCardGateway,
        paystack: PaystackConfig,
    ) -> Self {
        Self {
            push_gateway,
            card_gateway,
            callback_handler: Arc::new(LoggingStkCallbackHandler),
            paystack,
            config,
        }
    }

    /// Builder: replace the STK callback handler
    pub fn with_callback_handler(mut self, handler: Arc<dyn StkCallbackHandler>) -> Self {
        self.callback_handler = handler;
        self
    }
}
