//! Flow entry points

use std::sync::Arc;

use tracing::info;

use ks_api::PrimaryAuthRequest;

use crate::config::FlowConfig;
use crate::delegate::FlowDelegate;
use crate::status::AuthStatus;

/// Start a new flow with primary credentials.
///
/// Builds the unauthenticated root node, issues the authentication request,
/// and hands the outcome to the delegate: the next status on success, an
/// error otherwise.
pub async fn authenticate(
    config: &Arc<FlowConfig>,
    request: PrimaryAuthRequest,
    delegate: &Arc<dyn FlowDelegate>,
) {
    info!("Starting primary authentication against {}", config.base_url());
    let root = AuthStatus::unauthenticated(Arc::clone(config));
    let result = config.api().primary_authentication(request).await;
    config.handler().handle(result, &root, delegate);
}

/// Resume a flow from a previously issued state token.
///
/// Fetches the transaction's current state and hands the outcome to the
/// delegate, exactly as if the flow had just reached that step.
pub async fn resume(
    config: &Arc<FlowConfig>,
    state_token: &str,
    delegate: &Arc<dyn FlowDelegate>,
) {
    info!("Resuming transaction against {}", config.base_url());
    let root = AuthStatus::unauthenticated(Arc::clone(config));
    let result = config.api().poll_transaction(state_token).await;
    config.handler().handle(result, &root, delegate);
}
