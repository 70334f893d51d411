//! # pay-paystack
//!
//! Paystack card payment gateway for paygate-relay.
//!
//! - `PaystackClient::initialize`: POST `/transaction/initialize` with the
//!   amount converted to minor units (kobo, cents)
//! - `PaystackClient::verify`: GET `/transaction/verify/{reference}`
//! - `verify_webhook`: HMAC-SHA512 signature check for inbound events
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_paystack::PaystackClient;
//! use pay_core::CardPaymentGateway;
//!
//! let client = PaystackClient::from_env()?;
//! let response = client.verify("7PVGX8MEk85tgeEpVDtD").await?;
//! ```

pub mod config;
pub mod transaction;
pub mod webhook;

/// Provider name used in logs and error envelopes
pub const PROVIDER: &str = "paystack";

// Re-exports
pub use config::PaystackConfig;
pub use transaction::PaystackClient;
pub use webhook::{compute_hmac_sha512, verify_webhook, PaystackEvent, SIGNATURE_HEADER};
