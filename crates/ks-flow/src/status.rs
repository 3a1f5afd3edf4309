//! Status nodes: one immutable point in an authentication flow

use std::sync::{Arc, Weak};

use tracing::{debug, info};

use ks_types::{FlowError, FlowResult, SuccessResponse, TransactionState};

use crate::config::FlowConfig;
use crate::delegate::FlowDelegate;

/// One point in an authentication flow.
///
/// Immutable after construction: transitions never mutate a node in place,
/// they always produce a new one through [`AuthStatus::derive`]. The chain
/// is therefore safe to share across tasks.
pub struct AuthStatus {
    kind: TransactionState,
    model: SuccessResponse,
    config: Arc<FlowConfig>,
    /// Back-reference to the superseded node, traceability only. Weak so a
    /// superseded node is never kept alive by its successor.
    previous: Option<Weak<AuthStatus>>,
}

impl std::fmt::Debug for AuthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStatus")
            .field("kind", &self.kind)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl AuthStatus {
    /// Root node for a flow that has not exchanged anything yet.
    pub fn unauthenticated(config: Arc<FlowConfig>) -> Arc<Self> {
        Arc::new(Self {
            kind: TransactionState::Unauthenticated,
            model: SuccessResponse::default(),
            config,
            previous: None,
        })
    }

    /// Root node from an initial exchange.
    ///
    /// Fails with `InvalidResponse` when the model carries no status field
    /// and `UnknownStatus` when it carries one outside the closed table. Any
    /// known state is legal as a root, including `UNAUTHENTICATED`.
    pub fn root(config: Arc<FlowConfig>, model: SuccessResponse) -> FlowResult<Arc<Self>> {
        let raw = model.status.as_deref().ok_or(FlowError::InvalidResponse)?;
        let Some(kind) = TransactionState::from_wire(raw) else {
            return Err(FlowError::UnknownStatus(Box::new(model)));
        };

        Ok(Arc::new(Self {
            kind,
            model,
            config,
            previous: None,
        }))
    }

    /// Derive the next node from `(previous, new model)`.
    ///
    /// This is the transition dispatch: the model's raw status picks the
    /// produced state, `UNAUTHENTICATED` is rejected as a transition target,
    /// and anything outside the table fails with the full model attached.
    /// Configuration is carried forward from `previous`.
    pub fn derive(previous: &Arc<AuthStatus>, model: SuccessResponse) -> FlowResult<Arc<Self>> {
        let raw = model.status.as_deref().ok_or(FlowError::InvalidResponse)?;

        let kind = match TransactionState::from_wire(raw) {
            Some(TransactionState::Unauthenticated) => {
                return Err(FlowError::WrongStatus(
                    "transaction reverted to UNAUTHENTICATED".into(),
                ))
            }
            Some(kind) => kind,
            None => return Err(FlowError::UnknownStatus(Box::new(model))),
        };

        debug!("Transition {} -> {}", previous.kind, kind);

        Ok(Arc::new(Self {
            kind,
            model,
            config: Arc::clone(&previous.config),
            previous: Some(Arc::downgrade(previous)),
        }))
    }

    pub fn kind(&self) -> TransactionState {
        self.kind
    }

    pub fn model(&self) -> &SuccessResponse {
        &self.model
    }

    pub fn config(&self) -> &Arc<FlowConfig> {
        &self.config
    }

    /// The superseded node, if it is still alive.
    pub fn previous(&self) -> Option<Arc<AuthStatus>> {
        self.previous.as_ref().and_then(Weak::upgrade)
    }

    /// Whether this status supports re-checking an in-flight factor.
    pub fn can_poll(&self) -> bool {
        matches!(
            self.kind,
            TransactionState::FactorChallenge | TransactionState::FactorEnrollActivate
        )
    }

    /// Whether the transaction behind this status can still be abandoned.
    pub fn can_cancel(&self) -> bool {
        self.model.state_token.is_some() && self.kind != TransactionState::Success
    }

    /// Re-check the transaction state and funnel the result through the
    /// flow's response handler.
    ///
    /// This is the re-entry point for rescheduled polls: a `WAITING` factor
    /// result with an unchanged status makes the handler schedule another
    /// call to this method after its poll interval.
    pub async fn poll(self: Arc<Self>, delegate: &Arc<dyn FlowDelegate>) {
        let Some(token) = self.model.state_token.clone() else {
            delegate.on_error(FlowError::WrongStatus(
                "status holds no state token to poll".into(),
            ));
            return;
        };

        debug!("Polling transaction in state {}", self.kind);
        let result = self.config.api().poll_transaction(&token).await;
        let handler = Arc::clone(self.config.handler());
        handler.handle(result, &self, delegate);
    }

    /// Submit a factor verification and funnel the result through the flow's
    /// response handler. Push-style factors take no pass code.
    pub async fn verify_factor(
        self: Arc<Self>,
        factor_id: &str,
        pass_code: Option<&str>,
        delegate: &Arc<dyn FlowDelegate>,
    ) {
        let Some(token) = self.model.state_token.clone() else {
            delegate.on_error(FlowError::WrongStatus(
                "status holds no state token to verify a factor against".into(),
            ));
            return;
        };

        info!("Verifying factor {} in state {}", factor_id, self.kind);
        let result = self
            .config
            .api()
            .verify_factor(factor_id, &token, pass_code)
            .await;
        let handler = Arc::clone(self.config.handler());
        handler.handle(result, &self, delegate);
    }

    /// Abandon the transaction. Stops any pending poll first, then reports
    /// the server's response model.
    pub async fn cancel_transaction(&self) -> FlowResult<SuccessResponse> {
        let Some(token) = self.model.state_token.clone() else {
            return Err(FlowError::WrongStatus(
                "status holds no state token to cancel".into(),
            ));
        };

        info!("Cancelling transaction in state {}", self.kind);
        self.config.handler().cancel();
        self.config.api().cancel_transaction(&token).await
    }
}
