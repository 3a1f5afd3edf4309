//! HTTP implementation of the transaction API client

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, error};
use url::Url;

use ks_types::{ApiErrorResponse, FlowError, SuccessResponse};

use crate::client::{ApiResult, AuthApi, PrimaryAuthRequest};

const AUTHN_PATH: &str = "api/v1/authn";

/// reqwest-backed [`AuthApi`] implementation.
pub struct HttpAuthApi {
    base_url: Url,
    client: Client,
}

impl HttpAuthApi {
    /// Create a client for the given server base URL.
    pub fn new(base_url: Url) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client reusing an existing connection pool.
    pub fn with_client(base_url: Url, client: Client) -> Self {
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// POST a JSON body and decode the response.
    ///
    /// Non-2xx responses are decoded into the server's structured error body
    /// where possible; network and decode failures surface as opaque
    /// transport errors.
    async fn post(&self, path: &str, body: &serde_json::Value) -> ApiResult {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| FlowError::Transport(format!("Invalid request URL: {}", e)))?;

        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| FlowError::Transport(format!("Failed to send authn request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Authn request failed with status {}: {}", status, body);
            return match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(err) => Err(FlowError::Server(err)),
                Err(_) => Err(FlowError::Transport(format!(
                    "Server returned status {}: {}",
                    status, body
                ))),
            };
        }

        response
            .json::<SuccessResponse>()
            .await
            .map_err(|e| FlowError::Transport(format!("Failed to decode authn response: {}", e)))
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn primary_authentication(&self, request: PrimaryAuthRequest) -> ApiResult {
        let body = serde_json::to_value(&request)
            .map_err(|e| FlowError::Transport(format!("Failed to encode authn request: {}", e)))?;
        self.post(AUTHN_PATH, &body).await
    }

    async fn poll_transaction(&self, state_token: &str) -> ApiResult {
        self.post(AUTHN_PATH, &json!({ "stateToken": state_token }))
            .await
    }

    async fn cancel_transaction(&self, state_token: &str) -> ApiResult {
        self.post(
            &format!("{}/cancel", AUTHN_PATH),
            &json!({ "stateToken": state_token }),
        )
        .await
    }

    async fn verify_factor(
        &self,
        factor_id: &str,
        state_token: &str,
        pass_code: Option<&str>,
    ) -> ApiResult {
        let mut body = json!({ "stateToken": state_token });
        if let Some(pass_code) = pass_code {
            body["passCode"] = json!(pass_code);
        }
        self.post(
            &format!("{}/factors/{}/verify", AUTHN_PATH, factor_id),
            &body,
        )
        .await
    }
}
