//! Caller-facing callback surface

use std::sync::Arc;

use ks_types::{FactorResult, FlowError};

use crate::status::AuthStatus;

/// Observer for flow progress.
///
/// Exactly one of `on_status_changed`/`on_error` fires per handled response
/// that does not result in a poll reschedule. `on_factor_status_update` is an
/// independent observer signal: it fires whenever a response carries a factor
/// result — including on the reschedule path — and never changes which of
/// the other two callbacks is invoked. The default no-op body makes it
/// optional for implementors.
pub trait FlowDelegate: Send + Sync {
    /// The flow advanced to a new status.
    fn on_status_changed(&self, new_status: Arc<AuthStatus>);

    /// The exchange failed; no state transition occurred.
    fn on_error(&self, error: FlowError);

    /// A factor result was reported, side-effect only.
    fn on_factor_status_update(&self, _result: FactorResult) {}
}
