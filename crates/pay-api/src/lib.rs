//! # pay-api
//!
//! HTTP relay layer for paygate-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Relay endpoints for M-Pesa STK push and Paystack transactions
//! - Callback and webhook receivers
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/stkpush` | Relay STK push |
//! | POST | `/callback` | STK result callback |
//! | POST | `/paystack/init` | Initialize card transaction |
//! | GET | `/paystack/verify/:reference` | Verify card transaction |
//! | POST | `/paystack/webhook` | Paystack webhook |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
