//! Rule-generation service contract, wire model, and client adapters.

mod client;
mod error;
mod model;
mod resilience;

#[cfg(feature = "http-client")]
mod http;

pub mod prelude {
    pub use crate::{
        ChatTurn, EngineError, EngineErrorKind, EngineFuture, EngineOperationHooks, IntegrationId,
        NoopOperationHooks, RetryPolicy, RetryingClient, Role, RuleEngineClient, RuleEngineRequest,
        RuleEngineRequestBuilder, execute_with_retry,
    };

    #[cfg(feature = "http-client")]
    pub use crate::HttpRuleEngineClient;
}

pub use client::{EngineFuture, RuleEngineClient};
pub use error::{EngineError, EngineErrorKind};
pub use model::{ChatTurn, IntegrationId, Role, RuleEngineRequest, RuleEngineRequestBuilder};
pub use resilience::{
    EngineOperationHooks, NoopOperationHooks, RetryPolicy, RetryingClient, execute_with_retry,
};

#[cfg(feature = "http-client")]
pub use http::HttpRuleEngineClient;
