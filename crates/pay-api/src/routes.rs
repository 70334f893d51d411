//! # Routes
//!
//! Axum router configuration for the payment relay.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Mobile money:
///   - POST /stkpush - Relay an STK push
///   - POST /callback - STK result callback (always 200)
///
/// - Card payments:
///   - POST /paystack/init - Initialize a transaction
///   - GET  /paystack/verify/{reference} - Verify a transaction
///   - POST /paystack/webhook - Signed Paystack events
///
/// - Health:
///   - GET /health, GET /
pub fn create_router(state: AppState) -> Router {
    // Browser frontends are hosted elsewhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mpesa_routes = Router::new()
        .route("/stkpush", post(handlers::stk_push))
        .route("/callback", post(handlers::stk_callback));

    let paystack_routes = Router::new()
        .route("/init", post(handlers::paystack_init))
        .route("/verify/{reference}", get(handlers::paystack_verify))
        .route("/webhook", post(handlers::paystack_webhook));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .merge(mpesa_routes)
        .nest("/paystack", paystack_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
