//! Root configuration shared by every node in a flow chain

use std::sync::Arc;

use url::Url;

use ks_api::AuthApi;

use crate::handler::ResponseHandler;

/// Endpoint, transport handle, and response handler for one flow.
///
/// Carried forward unchanged from node to node; derived statuses never get
/// their own copy. The handler is shared so the whole chain observes the
/// same single poll-timer slot.
pub struct FlowConfig {
    base_url: Url,
    api: Arc<dyn AuthApi>,
    handler: Arc<ResponseHandler>,
}

impl FlowConfig {
    /// Create a configuration with the default poll interval.
    pub fn new(base_url: Url, api: Arc<dyn AuthApi>) -> Arc<Self> {
        Self::with_handler(base_url, api, Arc::new(ResponseHandler::default()))
    }

    /// Create a configuration with a caller-constructed handler, e.g. to set
    /// a custom poll interval.
    pub fn with_handler(
        base_url: Url,
        api: Arc<dyn AuthApi>,
        handler: Arc<ResponseHandler>,
    ) -> Arc<Self> {
        Arc::new(Self {
            base_url,
            api,
            handler,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api(&self) -> &Arc<dyn AuthApi> {
        &self.api
    }

    pub fn handler(&self) -> &Arc<ResponseHandler> {
        &self.handler
    }
}
