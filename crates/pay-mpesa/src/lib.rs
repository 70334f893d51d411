//! # pay-mpesa
//!
//! M-Pesa (Daraja) STK push gateway for paygate-relay.
//!
//! The push flow is a fixed sequence:
//!
//! 1. Fetch a bearer token with HTTP Basic `consumer_key:consumer_secret`
//! 2. Derive the timestamp (`YYYYMMDDHHMMSS`, UTC) and password
//!    (`base64(shortcode + passkey + timestamp)`)
//! 3. POST the STK payload with the bearer token
//! 4. Relay the gateway's JSON reply
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_mpesa::MpesaClient;
//! use pay_core::{PushPaymentGateway, PushPaymentRequest};
//!
//! let client = MpesaClient::from_env()?;
//! let response = client.push_payment(&request).await?;
//! ```
//!
//! ## Callback Handling
//!
//! ```rust,ignore
//! use pay_mpesa::{dispatch_stk_callback, LoggingStkCallbackHandler};
//!
//! // In your callback endpoint:
//! dispatch_stk_callback(&LoggingStkCallbackHandler, &body)?;
//! ```

pub mod auth;
pub mod callback;
pub mod config;
pub mod stk;

/// Provider name used in logs and error envelopes
pub const PROVIDER: &str = "mpesa";

// Re-exports
pub use auth::fetch_access_token;
pub use callback::{
    dispatch_stk_callback, render_callback, LoggingStkCallbackHandler, StkCallback,
    StkCallbackHandler,
};
pub use config::MpesaConfig;
pub use stk::{format_timestamp, stk_password, MpesaClient, StkPushPayload};
