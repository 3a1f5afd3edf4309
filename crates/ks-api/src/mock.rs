//! Canned-response API client for tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use ks_types::{FlowError, SuccessResponse};

use crate::client::{ApiResult, AuthApi, PrimaryAuthRequest};

/// [`AuthApi`] implementation that pops pre-queued results.
///
/// Every trait method consumes the next queued result in order, regardless
/// of which operation was invoked, mirroring how the server drives the flow
/// one response at a time. An exhausted queue yields a transport error so a
/// test that over-polls fails loudly instead of hanging.
#[derive(Default)]
pub struct MockAuthApi {
    results: Mutex<VecDeque<ApiResult>>,
    calls: AtomicUsize,
}

impl MockAuthApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw result.
    pub fn push(&self, result: ApiResult) {
        self.results.lock().push_back(result);
    }

    /// Queue a successful response decoded from a JSON literal.
    ///
    /// Panics on malformed JSON; mock fixtures are test code.
    pub fn push_json(&self, json: &str) {
        let response: SuccessResponse =
            serde_json::from_str(json).expect("malformed mock response JSON");
        self.push(Ok(response));
    }

    /// Queue an error result.
    pub fn push_error(&self, error: FlowError) {
        self.push(Err(error));
    }

    /// How many API calls have been served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn next(&self) -> ApiResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(FlowError::Transport("mock result queue exhausted".into())))
    }
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn primary_authentication(&self, _request: PrimaryAuthRequest) -> ApiResult {
        self.next()
    }

    async fn poll_transaction(&self, _state_token: &str) -> ApiResult {
        self.next()
    }

    async fn cancel_transaction(&self, _state_token: &str) -> ApiResult {
        self.next()
    }

    async fn verify_factor(
        &self,
        _factor_id: &str,
        _state_token: &str,
        _pass_code: Option<&str>,
    ) -> ApiResult {
        self.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_results_in_order() {
        let mock = MockAuthApi::new();
        mock.push_json(r#"{ "status": "MFA_REQUIRED" }"#);
        mock.push_error(FlowError::InvalidResponse);

        let first = mock.poll_transaction("tok").await.unwrap();
        assert_eq!(first.status.as_deref(), Some("MFA_REQUIRED"));

        let second = mock.poll_transaction("tok").await;
        assert!(matches!(second, Err(FlowError::InvalidResponse)));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_queue_fails_loudly() {
        let mock = MockAuthApi::new();
        let result = mock.poll_transaction("tok").await;
        assert!(matches!(result, Err(FlowError::Transport(_))));
    }
}
