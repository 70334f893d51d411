//! # Request Handlers
//!
//! Axum request handlers for the payment relay.
//! Each relay handler makes exactly one gateway call and passes the
//! upstream JSON through, or answers with an `ErrorResponse` envelope.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use pay_core::{CardPaymentInitRequest, GatewayResponse, PushPaymentRequest, RelayError};
use pay_mpesa::dispatch_stk_callback;
use pay_paystack::{verify_webhook, SIGNATURE_HEADER};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

// =============================================================================
// Response Types
// =============================================================================

/// Error envelope returned on any relay failure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Operation summary, e.g. "STK Push failed"
    pub message: String,
    /// Error display text
    pub error: String,
    /// Stable error tag
    pub kind: String,
    /// Raw upstream text, when the gateway sent something unusable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, err: &RelayError) -> Self {
        Self {
            message: message.into(),
            error: err.to_string(),
            kind: err.kind().to_string(),
            raw: err.raw().map(String::from),
        }
    }
}

type ApiError = (StatusCode, Json<ErrorResponse>);
type RelayReply = Result<(StatusCode, Json<serde_json::Value>), ApiError>;

fn relay_error_to_response(message: &str, err: RelayError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(message, &err)))
}

fn rejection_to_response(message: &str, rejection: JsonRejection) -> ApiError {
    warn!("Rejected request body: {}", rejection.body_text());
    relay_error_to_response(message, RelayError::InvalidRequest(rejection.body_text()))
}

/// Any JSON body from the gateway is relayed with 200, whatever its upstream status.
fn relay_success(response: GatewayResponse) -> (StatusCode, Json<serde_json::Value>) {
    if !response.is_success() {
        warn!("Relaying gateway reply with upstream status {}", response.status);
    }
    (StatusCode::OK, Json(response.body))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "paygate-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Relay an STK push to the mobile-money gateway
#[instrument(skip(state, payload))]
pub async fn stk_push(
    State(state): State<AppState>,
    payload: Result<Json<PushPaymentRequest>, JsonRejection>,
) -> RelayReply {
    let Json(request) = payload.map_err(|e| rejection_to_response("STK Push failed", e))?;

    state
        .push_gateway
        .push_payment(&request)
        .await
        .map(relay_success)
        .map_err(|e| {
            error!("Error during STK push: {}", e);
            relay_error_to_response("STK Push failed", e)
        })
}

/// Acknowledge an STK result callback. Always 200.
#[instrument(skip(state, body), fields(len = body.len()))]
pub async fn stk_callback(State(state): State<AppState>, body: Bytes) -> StatusCode {
    if let Err(e) = dispatch_stk_callback(state.callback_handler.as_ref(), &body) {
        warn!("Callback handler error: {}", e);
    }
    StatusCode::OK
}

/// Relay a card transaction initialization
#[instrument(skip(state, payload))]
pub async fn paystack_init(
    State(state): State<AppState>,
    payload: Result<Json<CardPaymentInitRequest>, JsonRejection>,
) -> RelayReply {
    let Json(request) =
        payload.map_err(|e| rejection_to_response("Paystack initialization failed", e))?;

    state
        .card_gateway
        .initialize(&request)
        .await
        .map(relay_success)
        .map_err(|e| {
            error!("Paystack initialization failed: {}", e);
            relay_error_to_response("Paystack initialization failed", e)
        })
}

/// Relay a card transaction verification
#[instrument(skip(state))]
pub async fn paystack_verify(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> RelayReply {
    state
        .card_gateway
        .verify(&reference)
        .await
        .map(relay_success)
        .map_err(|e| {
            error!("Paystack verification failed: {}", e);
            relay_error_to_response("Paystack verification failed", e)
        })
}

/// Handle a signed Paystack event
#[instrument(skip(state, headers, body))]
pub async fn paystack_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            let err = RelayError::InvalidRequest(format!("Missing {} header", SIGNATURE_HEADER));
            relay_error_to_response("Webhook rejected", err)
        })?;

    let event = verify_webhook(&state.paystack, &body, signature).map_err(|e| {
        warn!("Webhook verification failed: {}", e);
        let status = match e {
            RelayError::AuthFailure { .. } => StatusCode::UNAUTHORIZED,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, Json(ErrorResponse::new("Webhook rejected", &e)))
    })?;

    info!(
        "Received Paystack event: type={}, reference={:?}, status={:?}, amount={:?}",
        event.event,
        event.reference(),
        event.status(),
        event.amount()
    );

    Ok(StatusCode::OK)
}
