//! # Access Token Acquisition
//!
//! Daraja issues short-lived bearer tokens from an OAuth-style endpoint
//! authenticated with HTTP Basic credentials. A token is fetched per push
//! request; nothing is cached.

use crate::config::MpesaConfig;
use crate::PROVIDER;
use pay_core::{RelayError, RelayResult};
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info, instrument};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    // Daraja sends this as a string ("3599")
    #[serde(default)]
    expires_in: Option<serde_json::Value>,
}

/// Fetch a bearer token. Any non-2xx reply is an `AuthFailure`.
#[instrument(skip_all)]
pub async fn fetch_access_token(client: &Client, config: &MpesaConfig) -> RelayResult<String> {
    let response = client
        .get(config.token_url())
        .header("Authorization", config.basic_auth_header())
        .send()
        .await
        .map_err(|e| RelayError::upstream(PROVIDER, e))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| RelayError::upstream(PROVIDER, e))?;

    if !status.is_success() {
        error!("Failed to get access token: status={}, body={}", status, body);
        return Err(RelayError::AuthFailure {
            provider: PROVIDER.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    let token: TokenResponse = match serde_json::from_str(&body) {
        Ok(token) => token,
        Err(e) => {
            error!("Malformed access token response: {}: {}", e, body);
            return Err(RelayError::AuthFailure {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                body,
            });
        }
    };

    info!("Access token received (expires_in={:?})", token.expires_in);
    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn config_for(server: &MockServer) -> MpesaConfig {
        MpesaConfig::new("key", "secret", "174379", "pk", "https://example.com/cb")
            .with_api_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_fetch_token_sends_basic_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oauth/v1/generate"))
            .and(query_param("grant_type", "client_credentials"))
            .and(header("Authorization", "Basic a2V5OnNlY3JldA=="))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"access_token": "tok123", "expires_in": "3599"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let token = fetch_access_token(&Client::new(), &config_for(&server).await)
            .await
            .unwrap();
        assert_eq!(token, "tok123");
    }

    #[tokio::test]
    async fn test_fetch_token_non_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oauth/v1/generate"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request"))
            .mount(&server)
            .await;

        let err = fetch_access_token(&Client::new(), &config_for(&server).await)
            .await
            .unwrap_err();
        match err {
            RelayError::AuthFailure { status, body, .. } => {
                assert_eq!(status, 400);
                assert_eq!(body, "Bad Request");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_token_missing_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oauth/v1/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"expires_in": "3599"})))
            .mount(&server)
            .await;

        let err = fetch_access_token(&Client::new(), &config_for(&server).await)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "auth_failure");
    }
}
