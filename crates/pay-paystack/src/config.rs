//! # Paystack Configuration
//!
//! All secrets are loaded from environment variables.

use pay_core::RelayError;
use std::env;

pub const DEFAULT_API_BASE_URL: &str = "https://api.paystack.co";

/// Paystack API configuration
#[derive(Debug, Clone)]
pub struct PaystackConfig {
    /// Secret API key (sk_test_... or sk_live_...), also the webhook signing key
    pub secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,
}

impl PaystackConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAYSTACK_SECRET_KEY`
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("PAYSTACK_SECRET_KEY").map_err(|_| {
            RelayError::Configuration("PAYSTACK_SECRET_KEY not set".to_string())
        })?;

        let config = Self {
            secret_key,
            api_base_url: env::var("PAYSTACK_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Secret keys are `sk_test_...` or `sk_live_...`; public keys are refused.
    pub fn validate(&self) -> Result<(), RelayError> {
        if !self.is_test_mode() && !self.is_live_mode() {
            return Err(RelayError::Configuration(
                "PAYSTACK_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }
        Ok(())
    }

    /// Create config with an explicit key (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    pub fn is_live_mode(&self) -> bool {
        self.secret_key.starts_with("sk_live_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    pub fn initialize_url(&self) -> String {
        format!(
            "{}/transaction/initialize",
            self.api_base_url.trim_end_matches('/')
        )
    }

    /// Verify endpoint without the reference segment
    pub fn verify_base_url(&self) -> String {
        format!("{}/transaction/verify", self.api_base_url.trim_end_matches('/'))
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes() {
        let config = PaystackConfig::new("sk_test_abc123");
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());

        let config = PaystackConfig::new("sk_live_abc123");
        assert!(config.is_live_mode());
    }

    #[test]
    fn test_auth_header() {
        let config = PaystackConfig::new("sk_test_abc123");
        assert_eq!(config.auth_header(), "Bearer sk_test_abc123");
    }

    #[test]
    fn test_urls() {
        let config = PaystackConfig::new("sk_test_x").with_api_base_url("http://localhost:4000/");
        assert_eq!(
            config.initialize_url(),
            "http://localhost:4000/transaction/initialize"
        );
        assert_eq!(
            config.verify_base_url(),
            "http://localhost:4000/transaction/verify"
        );
    }

    #[test]
    fn test_validate_secret_key_prefix() {
        assert!(PaystackConfig::new("sk_test_abc123").validate().is_ok());
        assert!(PaystackConfig::new("sk_live_abc123").validate().is_ok());

        for bad in ["pk_test_abc123", "sk_abc123", "abc", ""] {
            assert!(
                matches!(
                    PaystackConfig::new(bad).validate(),
                    Err(RelayError::Configuration(_))
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn test_from_env_missing_key() {
        env::remove_var("PAYSTACK_SECRET_KEY");

        let result = PaystackConfig::from_env();
        assert!(result.is_err());
    }
}
