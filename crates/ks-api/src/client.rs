//! The `AuthApi` trait and request types

use async_trait::async_trait;
use serde::Serialize;

use ks_types::{FlowError, SuccessResponse};

/// Outcome of a single transaction API exchange: either the decoded response
/// model or an opaque error distinct from the status taxonomy.
pub type ApiResult = Result<SuccessResponse, FlowError>;

/// Body of a primary authentication request.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryAuthRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relay_state: Option<String>,
    pub options: AuthRequestOptions,
}

impl PrimaryAuthRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Default::default()
        }
    }
}

/// Behavior toggles sent alongside primary authentication.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRequestOptions {
    pub multi_optional_factor_enroll: bool,
    pub warn_before_password_expired: bool,
}

/// Transaction API operations the flow core relies on.
///
/// Implementations must be shareable across tasks; the flow holds the client
/// as `Arc<dyn AuthApi>` and re-invokes it from rescheduled poll timers.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Start a new transaction with username/password credentials.
    async fn primary_authentication(&self, request: PrimaryAuthRequest) -> ApiResult;

    /// Re-check the state of an in-progress transaction.
    async fn poll_transaction(&self, state_token: &str) -> ApiResult;

    /// Abandon an in-progress transaction.
    async fn cancel_transaction(&self, state_token: &str) -> ApiResult;

    /// Submit a factor verification (pass code, or empty for push factors).
    async fn verify_factor(
        &self,
        factor_id: &str,
        state_token: &str,
        pass_code: Option<&str>,
    ) -> ApiResult;
}
