//! Runtime wiring helpers for session usage.

use std::sync::Arc;

use crate::{
    EngineOperationHooks, IntegrationId, NoopSessionGateway, PipelineHooks, RetryPolicy,
    RetryingClient, RuleEngineClient, SendPipeline, SessionGateway, SessionId, SessionObserver,
    TracingObservabilityHooks,
};

/// A fully wired conversation session plus its sign-out collaborator.
#[derive(Clone)]
pub struct SessionRuntime {
    pub pipeline: Arc<SendPipeline>,
    pub gateway: Arc<dyn SessionGateway>,
}

pub fn build_session(client: Arc<dyn RuleEngineClient>) -> SessionRuntime {
    build_session_with(client, "dashboard", IntegrationId::new(0), None, None)
}

pub fn build_session_with_retry(
    client: Arc<dyn RuleEngineClient>,
    retry_policy: RetryPolicy,
) -> SessionRuntime {
    build_session_with(
        client,
        "dashboard",
        IntegrationId::new(0),
        Some(retry_policy),
        None,
    )
}

pub fn build_session_with(
    client: Arc<dyn RuleEngineClient>,
    session_id: impl Into<SessionId>,
    integration_id: IntegrationId,
    retry_policy: Option<RetryPolicy>,
    gateway: Option<Arc<dyn SessionGateway>>,
) -> SessionRuntime {
    let hooks = Arc::new(TracingObservabilityHooks);

    let client = match retry_policy {
        Some(policy) => {
            let retrying = RetryingClient::new(client, policy)
                .with_hooks(Arc::clone(&hooks) as Arc<dyn EngineOperationHooks>);
            Arc::new(retrying) as Arc<dyn RuleEngineClient>
        }
        None => client,
    };

    let pipeline = Arc::new(
        SendPipeline::builder(client)
            .session_id(session_id)
            .integration_id(integration_id)
            .hooks(Arc::clone(&hooks) as Arc<dyn PipelineHooks>)
            .observer(hooks as Arc<dyn SessionObserver>)
            .build(),
    );

    SessionRuntime {
        pipeline,
        gateway: gateway.unwrap_or_else(|| Arc::new(NoopSessionGateway)),
    }
}
