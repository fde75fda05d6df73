//! Common imports for most Ruleweave applications.

pub use crate::{
    assistant_turn, build_session, build_session_with, build_session_with_retry, draft_request,
    parse_role, user_turn,
};
pub use crate::{rw_turn, rw_turns};
pub use crate::{
    BoxFuture, ChatTurn, EngineError, EngineErrorKind, EngineOperationHooks, InputBuffer,
    IntegrationId, LoadingGate, MessageLog, MetricsObservabilityHooks, NoopPipelineHooks,
    NoopSessionGateway, NoopSessionObserver, PipelineHooks, RejectReason, RetryPolicy,
    RetryingClient, Role, RuleEngineClient, RuleEngineRequest, SendPipeline, SendPipelineBuilder,
    SessionError, SessionGateway, SessionId, SessionObserver, SessionRuntime, SessionSnapshot,
    SubmitOutcome, SubmitReceipt, TracingObservabilityHooks,
};

#[cfg(feature = "http-client")]
pub use crate::HttpRuleEngineClient;
