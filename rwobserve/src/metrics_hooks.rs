//! Metrics-based observability hooks for engine operations and pipeline phases.
//!
//! ```rust
//! use rwobserve::MetricsObservabilityHooks;
//! use rwengine::EngineOperationHooks;
//!
//! fn accepts_engine_hooks(_hooks: &dyn EngineOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_engine_hooks(&hooks);
//! ```

use std::time::Duration;

use rwcommon::SessionId;
use rwengine::{EngineError, EngineOperationHooks};
use rwsession::{PipelineHooks, RejectReason, SessionObserver, SessionSnapshot};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl EngineOperationHooks for MetricsObservabilityHooks {
    fn on_attempt_start(&self, operation: &str, _attempt: u32) {
        metrics::counter!(
            "ruleweave_engine_attempt_start_total",
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_retry_scheduled(
        &self,
        operation: &str,
        _attempt: u32,
        delay: Duration,
        error: &EngineError,
    ) {
        metrics::counter!(
            "ruleweave_engine_retry_scheduled_total",
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "ruleweave_engine_retry_delay_seconds",
            "operation" => operation.to_string()
        )
        .record(delay.as_secs_f64());
    }

    fn on_success(&self, operation: &str, attempts: u32) {
        metrics::counter!(
            "ruleweave_engine_success_total",
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "ruleweave_engine_attempts_per_success",
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }

    fn on_failure(&self, operation: &str, attempts: u32, error: &EngineError) {
        metrics::counter!(
            "ruleweave_engine_failure_total",
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "ruleweave_engine_attempts_per_failure",
            "operation" => operation.to_string()
        )
        .record(attempts as f64);
    }
}

impl PipelineHooks for MetricsObservabilityHooks {
    fn on_submit_rejected(&self, _session_id: &SessionId, reason: RejectReason) {
        metrics::counter!(
            "ruleweave_pipeline_submit_rejected_total",
            "reason" => format!("{reason:?}")
        )
        .increment(1);
    }

    fn on_exchange_start(&self, _session_id: &SessionId, _turn_index: usize) {
        metrics::counter!("ruleweave_pipeline_exchange_start_total").increment(1);
    }

    fn on_exchange_success(&self, _session_id: &SessionId, reply_count: usize, elapsed: Duration) {
        metrics::counter!("ruleweave_pipeline_exchange_success_total").increment(1);
        metrics::histogram!(
            "ruleweave_pipeline_exchange_duration_seconds",
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
        metrics::histogram!("ruleweave_pipeline_replies_per_exchange").record(reply_count as f64);
    }

    fn on_exchange_failure(&self, _session_id: &SessionId, error: &EngineError, elapsed: Duration) {
        metrics::counter!(
            "ruleweave_pipeline_exchange_failure_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "ruleweave_pipeline_exchange_duration_seconds",
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl SessionObserver for MetricsObservabilityHooks {
    fn on_state_change(&self, _session_id: &SessionId, snapshot: &SessionSnapshot) {
        metrics::counter!(
            "ruleweave_session_state_change_total",
            "sending" => if snapshot.sending { "true" } else { "false" }
        )
        .increment(1);
    }
}
