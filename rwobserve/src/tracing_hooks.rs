//! Tracing-based observability hooks for engine operations and pipeline phases.
//!
//! ```rust
//! use rwobserve::TracingObservabilityHooks;
//! use rwsession::PipelineHooks;
//!
//! fn accepts_pipeline_hooks(_hooks: &dyn PipelineHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_pipeline_hooks(&hooks);
//! ```

use std::time::Duration;

use rwcommon::SessionId;
use rwengine::{EngineError, EngineOperationHooks};
use rwsession::{PipelineHooks, RejectReason, SessionObserver, SessionSnapshot};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl EngineOperationHooks for TracingObservabilityHooks {
    fn on_attempt_start(&self, operation: &str, attempt: u32) {
        tracing::info!(phase = "engine", event = "attempt_start", operation, attempt);
    }

    fn on_retry_scheduled(
        &self,
        operation: &str,
        attempt: u32,
        delay: Duration,
        error: &EngineError,
    ) {
        tracing::warn!(
            phase = "engine",
            event = "retry_scheduled",
            operation,
            attempt,
            delay_ms = delay.as_millis() as u64,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        tracing::info!(phase = "engine", event = "success", operation, attempts);
    }

    fn on_failure(&self, operation: &str, attempts: u32, error: &EngineError) {
        tracing::error!(
            phase = "engine",
            event = "failure",
            operation,
            attempts,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }
}

impl PipelineHooks for TracingObservabilityHooks {
    fn on_submit_rejected(&self, session_id: &SessionId, reason: RejectReason) {
        tracing::debug!(
            phase = "pipeline",
            event = "submit_rejected",
            session_id = %session_id,
            reason = ?reason
        );
    }

    fn on_exchange_start(&self, session_id: &SessionId, turn_index: usize) {
        tracing::info!(
            phase = "pipeline",
            event = "exchange_start",
            session_id = %session_id,
            turn_index
        );
    }

    fn on_exchange_success(&self, session_id: &SessionId, reply_count: usize, elapsed: Duration) {
        tracing::info!(
            phase = "pipeline",
            event = "exchange_success",
            session_id = %session_id,
            reply_count,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_exchange_failure(&self, session_id: &SessionId, error: &EngineError, elapsed: Duration) {
        tracing::error!(
            phase = "pipeline",
            event = "exchange_failure",
            session_id = %session_id,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }
}

impl SessionObserver for TracingObservabilityHooks {
    fn on_state_change(&self, session_id: &SessionId, snapshot: &SessionSnapshot) {
        tracing::debug!(
            phase = "session",
            event = "state_change",
            session_id = %session_id,
            turn_count = snapshot.turns.len(),
            draft_len = snapshot.draft.len(),
            sending = snapshot.sending
        );
    }
}
