//! # paygate-relay
//!
//! Stateless relay in front of the M-Pesa and Paystack APIs.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export CONSUMER_KEY=...
//! export CONSUMER_SECRET=...
//! export SHORTCODE=174379
//! export PASSKEY=...
//! export CALLBACK_URL=https://relay.example.com/callback
//! export PAYSTACK_SECRET_KEY=sk_test_...
//!
//! # Run the server
//! paygate-relay
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Gateways: push={}, card={}",
        state.push_gateway.provider_name(),
        state.card_gateway.provider_name()
    );

    let app = routes::create_router(state);

    info!("Server running on http://{}", addr);

    if !is_prod {
        info!("STK push: POST http://{}/stkpush", addr);
        info!("Paystack: POST http://{}/paystack/init", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
