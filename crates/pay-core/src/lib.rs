//! # pay-core
//!
//! Core types and traits for the paygate-relay payment relay.
//!
//! This crate provides:
//! - `PushPaymentGateway` and `CardPaymentGateway` traits for upstream providers
//! - `PushPaymentRequest` and `CardPaymentInitRequest` for client payloads
//! - `GatewayResponse` for relayed upstream replies
//! - `RelayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{PushPaymentGateway, PushPaymentRequest};
//!
//! let request = PushPaymentRequest { phone: "254708374149".into(), amount: 1.into() };
//! let response = gateway.push_payment(&request).await?;
//!
//! // Relay response.body to the caller unchanged
//! ```

pub mod error;
pub mod gateway;
pub mod request;

// Re-exports for convenience
pub use error::{RelayError, RelayResult};
pub use gateway::{BoxedCardGateway, BoxedPushGateway, CardPaymentGateway, PushPaymentGateway};
pub use request::{
    to_minor_units, CardPaymentInitRequest, GatewayResponse, PushPaymentRequest,
    MINOR_UNITS_PER_MAJOR,
};
