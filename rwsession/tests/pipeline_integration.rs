use std::sync::{Arc, Mutex};

use rwsession::prelude::*;
use rwengine::EngineFuture;

struct ReplayClient {
    outcomes: Mutex<Vec<Result<Vec<ChatTurn>, EngineError>>>,
}

impl ReplayClient {
    fn new(outcomes: Vec<Result<Vec<ChatTurn>, EngineError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
        }
    }
}

impl RuleEngineClient for ReplayClient {
    fn generate<'a>(
        &'a self,
        _request: RuleEngineRequest,
    ) -> EngineFuture<'a, Result<Vec<ChatTurn>, EngineError>> {
        Box::pin(async move {
            let mut outcomes = self.outcomes.lock().expect("outcomes lock");
            if outcomes.is_empty() {
                return Err(EngineError::other("no scripted outcome left"));
            }

            outcomes.remove(0)
        })
    }
}

#[tokio::test]
async fn conversation_accumulates_across_successive_turns() {
    let client = Arc::new(ReplayClient::new(vec![
        Ok(vec![ChatTurn::new(
            Role::Assistant,
            "Rule Chain is generated successfully with name Lux Guard",
        )]),
        Ok(vec![ChatTurn::new(
            Role::Assistant,
            "Updated Lux Guard to trigger at night only",
        )]),
    ]));
    let pipeline = SendPipeline::builder(client)
        .session_id("integration-1")
        .integration_id(IntegrationId::new(2))
        .build();

    let first = pipeline
        .submit("Create a rule that dims the hallway light")
        .await
        .expect("first submit should not error");
    assert!(!first.is_rejected());

    let second = pipeline
        .submit("Only at night please")
        .await
        .expect("second submit should not error");
    assert!(!second.is_rejected());

    let turns = pipeline.transcript().expect("transcript should read");
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[0].role, Role::User);
    assert_eq!(turns[1].role, Role::Assistant);
    assert_eq!(turns[2].role, Role::User);
    assert_eq!(turns[3].role, Role::Assistant);
    assert!(!pipeline.is_sending());
}

#[tokio::test]
async fn failed_turn_recovers_and_the_session_stays_usable() {
    let client = Arc::new(ReplayClient::new(vec![
        Err(EngineError::timeout("generation timed out")),
        Ok(vec![ChatTurn::new(Role::Assistant, "Here is your rule...")]),
    ]));
    let pipeline = SendPipeline::builder(client).build();

    let failed = pipeline
        .submit("Create a discount rule")
        .await
        .expect("submit should not error");
    let receipt = failed.receipt().expect("submission should complete");
    assert!(receipt.engine_error.is_some());
    assert!(!pipeline.is_sending());

    // The gate released, so the retry goes straight through.
    let retried = pipeline
        .submit("Create a discount rule")
        .await
        .expect("retry should not error");
    let receipt = retried.receipt().expect("retry should complete");
    assert!(receipt.engine_error.is_none());

    let turns = pipeline.transcript().expect("transcript should read");
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[3].content, "Here is your rule...");
}

#[tokio::test]
async fn logout_seam_resolves_without_touching_the_session() {
    let client = Arc::new(ReplayClient::new(Vec::new()));
    let pipeline = SendPipeline::builder(client).build();
    let gateway = NoopSessionGateway;

    gateway.logout().await.expect("logout should resolve");
    assert!(pipeline.transcript().expect("transcript should read").is_empty());
}
