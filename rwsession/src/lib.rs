//! Conversation session core: transcript, draft input, send gating, and the
//! submit pipeline.

mod error;
mod gate;
mod gateway;
mod hooks;
mod input;
mod log;
mod pipeline;
mod types;

pub mod prelude {
    pub use crate::{
        InputBuffer, LoadingGate, MessageLog, NoopPipelineHooks, NoopSessionGateway,
        NoopSessionObserver, PipelineHooks, RejectReason, SendPipeline, SendPipelineBuilder,
        SessionError, SessionErrorKind, SessionGateway, SessionObserver, SessionSnapshot,
        SubmitOutcome, SubmitReceipt,
    };
    pub use rwcommon::{BoxFuture, SessionId};
    pub use rwengine::{
        ChatTurn, EngineError, EngineErrorKind, IntegrationId, Role, RuleEngineClient,
        RuleEngineRequest,
    };
}

pub use error::{SessionError, SessionErrorKind};
pub use gate::LoadingGate;
pub use gateway::{NoopSessionGateway, SessionGateway};
pub use hooks::{NoopPipelineHooks, NoopSessionObserver, PipelineHooks, SessionObserver};
pub use input::InputBuffer;
pub use log::MessageLog;
pub use pipeline::{SendPipeline, SendPipelineBuilder};
pub use types::{RejectReason, SessionSnapshot, SubmitOutcome, SubmitReceipt};

pub use rwcommon::{BoxFuture, SessionId};
pub use rwengine::{
    ChatTurn, EngineError, EngineErrorKind, IntegrationId, Role, RuleEngineClient,
    RuleEngineRequest,
};
