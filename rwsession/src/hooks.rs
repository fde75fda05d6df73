//! Pipeline hook and renderer observer contracts.
//!
//! ```rust
//! use rwsession::{NoopPipelineHooks, PipelineHooks};
//!
//! fn accepts_hooks(_hooks: &dyn PipelineHooks) {}
//!
//! let hooks = NoopPipelineHooks;
//! accepts_hooks(&hooks);
//! ```

use std::time::Duration;

use rwcommon::SessionId;
use rwengine::EngineError;

use crate::{RejectReason, SessionSnapshot};

pub trait PipelineHooks: Send + Sync {
    fn on_submit_rejected(&self, _session_id: &SessionId, _reason: RejectReason) {}

    fn on_exchange_start(&self, _session_id: &SessionId, _turn_index: usize) {}

    fn on_exchange_success(
        &self,
        _session_id: &SessionId,
        _reply_count: usize,
        _elapsed: Duration,
    ) {
    }

    fn on_exchange_failure(
        &self,
        _session_id: &SessionId,
        _error: &EngineError,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPipelineHooks;

impl PipelineHooks for NoopPipelineHooks {}

/// Render-trigger seam: fired with a fresh snapshot after every state
/// mutation, replacing a UI framework's implicit re-render-on-change.
pub trait SessionObserver: Send + Sync {
    fn on_state_change(&self, _session_id: &SessionId, _snapshot: &SessionSnapshot) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionObserver;

impl SessionObserver for NoopSessionObserver {}
