use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use rwcommon::SessionId;
use rwengine::{EngineError, EngineOperationHooks};
use rwsession::{PipelineHooks, RejectReason, SessionObserver, SessionSnapshot};

pub struct SafeEngineHooks<H> {
    inner: H,
}

impl<H> SafeEngineHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> EngineOperationHooks for SafeEngineHooks<H>
where
    H: EngineOperationHooks,
{
    fn on_attempt_start(&self, operation: &str, attempt: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_attempt_start(operation, attempt)
        }));
    }

    fn on_retry_scheduled(
        &self,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &EngineError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_retry_scheduled(operation, attempt, delay, error)
        }));
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(operation, attempts)
        }));
    }

    fn on_failure(&self, operation: &str, attempts: u32, error: &EngineError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(operation, attempts, error)
        }));
    }
}

pub struct SafePipelineHooks<H> {
    inner: H,
}

impl<H> SafePipelineHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> PipelineHooks for SafePipelineHooks<H>
where
    H: PipelineHooks,
{
    fn on_submit_rejected(&self, session_id: &SessionId, reason: RejectReason) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_submit_rejected(session_id, reason)
        }));
    }

    fn on_exchange_start(&self, session_id: &SessionId, turn_index: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_exchange_start(session_id, turn_index)
        }));
    }

    fn on_exchange_success(&self, session_id: &SessionId, reply_count: usize, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_exchange_success(session_id, reply_count, elapsed)
        }));
    }

    fn on_exchange_failure(&self, session_id: &SessionId, error: &EngineError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_exchange_failure(session_id, error, elapsed)
        }));
    }
}

/// Renderer callbacks come from application code; a panicking observer must
/// not take the submit pipeline down with it.
pub struct SafeSessionObserver<H> {
    inner: H,
}

impl<H> SafeSessionObserver<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> SessionObserver for SafeSessionObserver<H>
where
    H: SessionObserver,
{
    fn on_state_change(&self, session_id: &SessionId, snapshot: &SessionSnapshot) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_state_change(session_id, snapshot)
        }));
    }
}
