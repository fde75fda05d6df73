//! Unified facade over the Ruleweave workspace crates.
//!
//! This crate is designed to be the single dependency for most applications.
//! It re-exports the session core, the engine client layer, and the
//! observability hooks, and provides convenience utilities and macros for
//! common setup and turn-building flows.

mod macros;

pub mod prelude;
pub mod runtime;
pub mod util;

pub use rwcommon;
pub use rwengine;
pub use rwobserve;
pub use rwsession;

pub use rwcommon::{BoxFuture, SessionId};
pub use rwengine::{
    ChatTurn, EngineError, EngineErrorKind, EngineFuture, EngineOperationHooks, IntegrationId,
    NoopOperationHooks, RetryPolicy, RetryingClient, Role, RuleEngineClient, RuleEngineRequest,
    RuleEngineRequestBuilder, execute_with_retry,
};
pub use rwobserve::{
    MetricsObservabilityHooks, SafeEngineHooks, SafePipelineHooks, SafeSessionObserver,
    TracingObservabilityHooks,
};
pub use rwsession::{
    InputBuffer, LoadingGate, MessageLog, NoopPipelineHooks, NoopSessionGateway,
    NoopSessionObserver, PipelineHooks, RejectReason, SendPipeline, SendPipelineBuilder,
    SessionError, SessionErrorKind, SessionGateway, SessionObserver, SessionSnapshot,
    SubmitOutcome, SubmitReceipt,
};

#[cfg(feature = "http-client")]
pub use rwengine::HttpRuleEngineClient;

pub use runtime::{SessionRuntime, build_session, build_session_with, build_session_with_retry};
pub use util::{assistant_turn, draft_request, parse_role, user_turn};
