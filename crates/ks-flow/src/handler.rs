//! Response handling and single-flight poll scheduling

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use ks_api::ApiResult;

use crate::delegate::FlowDelegate;
use crate::status::AuthStatus;

/// Default delay before a rescheduled poll fires.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// The single chokepoint between server responses and flow transitions.
///
/// Every handled response resolves to exactly one of: an error surfaced, a
/// poll rescheduled, or a new status surfaced. The handler owns the one poll
/// timer slot for its flow; starting a new timer always aborts and replaces
/// the previous one, so no two re-checks can ever be in flight at once.
pub struct ResponseHandler {
    poll_interval: Duration,
    /// Single timer slot. All mutation happens under this lock, which is the
    /// ownership discipline that keeps scheduling race-free regardless of
    /// which task triggers it.
    poll_timer: Mutex<Option<JoinHandle<()>>>,
}

impl Default for ResponseHandler {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl ResponseHandler {
    /// Create a handler with the given delay between rescheduled polls.
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            poll_timer: Mutex::new(None),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Process one server exchange for `current`.
    ///
    /// 1. Transport/server errors go straight to `on_error`; no timer state
    ///    is touched.
    /// 2. A factor result, when present, is reported to
    ///    `on_factor_status_update` before anything else is decided.
    /// 3. If the reported status still maps to `current`'s state and the
    ///    factor result is `WAITING`, a single-shot poll is scheduled
    ///    (replacing any pending one) and control returns to the caller.
    /// 4. Otherwise the next status is derived and surfaced through
    ///    `on_status_changed`, or the classification failure through
    ///    `on_error`.
    pub fn handle(
        &self,
        result: ApiResult,
        current: &Arc<AuthStatus>,
        delegate: &Arc<dyn FlowDelegate>,
    ) {
        let model = match result {
            Ok(model) => model,
            Err(error) => {
                warn!("Transaction exchange failed: {}", error);
                delegate.on_error(error);
                return;
            }
        };

        if let Some(factor_result) = model.factor_result {
            delegate.on_factor_status_update(factor_result);

            if model.transaction_state() == Some(current.kind()) && factor_result.is_waiting() {
                self.start_poll_timer(current, delegate);
                return;
            }
        }

        match AuthStatus::derive(current, model) {
            Ok(next) => delegate.on_status_changed(next),
            Err(error) => delegate.on_error(error),
        }
    }

    /// Abort and drop any pending poll. Idempotent; a no-op when no timer is
    /// pending.
    pub fn cancel(&self) {
        let mut slot = self.poll_timer.lock();
        if let Some(timer) = slot.take() {
            debug!("Cancelling pending poll timer");
            timer.abort();
        }
    }

    /// Whether a rescheduled poll is currently pending.
    pub fn has_pending_poll(&self) -> bool {
        self.poll_timer
            .lock()
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    /// Schedule a single-shot re-check of `current`, replacing any pending
    /// one. The fired timer re-enters this handler through
    /// [`AuthStatus::poll`].
    fn start_poll_timer(&self, current: &Arc<AuthStatus>, delegate: &Arc<dyn FlowDelegate>) {
        let status = Arc::clone(current);
        let delegate = Arc::clone(delegate);
        let interval = self.poll_interval;

        debug!(
            "Factor still pending, polling again in {} ms",
            interval.as_millis()
        );

        let timer = tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            status.poll(&delegate).await;
        });

        let mut slot = self.poll_timer.lock();
        if let Some(previous) = slot.replace(timer) {
            previous.abort();
        }
    }
}
