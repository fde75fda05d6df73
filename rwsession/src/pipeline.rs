//! Submit pipeline: the session state machine around one in-flight send.

use std::sync::Arc;
use std::time::Instant;

use rwcommon::SessionId;
use rwengine::{ChatTurn, EngineError, IntegrationId, Role, RuleEngineClient, RuleEngineRequest};

use crate::{
    InputBuffer, LoadingGate, MessageLog, NoopPipelineHooks, NoopSessionObserver, PipelineHooks,
    RejectReason, SessionError, SessionObserver, SessionSnapshot, SubmitOutcome, SubmitReceipt,
};

const DEFAULT_FALLBACK_REPLY: &str = "I could not reach the rule engine for that request. \
     Your message is still in the conversation, so feel free to try again.";

/// Owns the transcript, the draft input, and the send gate for one session,
/// and orchestrates the round trip to the rule-generation service.
///
/// The pipeline is reusable across turns and shares freely behind an `Arc`;
/// renderers may read `transcript`/`input`/`is_sending` at any point,
/// including between acceptance and settlement.
pub struct SendPipeline {
    session_id: SessionId,
    integration_id: IntegrationId,
    client: Arc<dyn RuleEngineClient>,
    log: MessageLog,
    input: InputBuffer,
    gate: LoadingGate,
    hooks: Arc<dyn PipelineHooks>,
    observer: Arc<dyn SessionObserver>,
    fallback_reply: String,
}

impl SendPipeline {
    pub fn builder(client: Arc<dyn RuleEngineClient>) -> SendPipelineBuilder {
        SendPipelineBuilder::new(client)
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Keystroke-level draft edit; no validation happens here.
    pub fn set_input(&self, text: impl Into<String>) -> Result<(), SessionError> {
        self.input.set_text(text)?;
        self.notify()
    }

    pub fn clear_input(&self) -> Result<(), SessionError> {
        self.input.clear()?;
        self.notify()
    }

    pub fn input(&self) -> Result<String, SessionError> {
        self.input.text()
    }

    pub fn transcript(&self) -> Result<Vec<ChatTurn>, SessionError> {
        self.log.snapshot()
    }

    pub fn is_sending(&self) -> bool {
        self.gate.is_held()
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        Ok(SessionSnapshot {
            turns: self.log.snapshot()?,
            draft: self.input.text()?,
            sending: self.gate.is_held(),
        })
    }

    /// Runs one submission to settlement.
    ///
    /// Blank input and an already-held gate are outcomes, not errors: state
    /// is untouched and the typed draft survives for a retry. An accepted
    /// submission appends the user turn, clears the draft, and holds the
    /// gate until the engine call settles; on engine failure the fallback
    /// reply is appended so the transcript always gains a terminal turn.
    pub async fn submit(
        &self,
        raw_input: impl Into<String>,
    ) -> Result<SubmitOutcome, SessionError> {
        let raw_input = raw_input.into();
        if raw_input.trim().is_empty() {
            self.hooks
                .on_submit_rejected(&self.session_id, RejectReason::EmptyInput);
            return Ok(SubmitOutcome::Rejected(RejectReason::EmptyInput));
        }

        if !self.gate.try_acquire() {
            self.hooks
                .on_submit_rejected(&self.session_id, RejectReason::AlreadySending);
            return Ok(SubmitOutcome::Rejected(RejectReason::AlreadySending));
        }

        let exchange = self.run_exchange(raw_input).await;

        // Every exit path after acquisition runs through here.
        self.gate.release();

        let receipt = exchange?;
        self.notify()?;
        Ok(SubmitOutcome::Completed(receipt))
    }

    async fn run_exchange(&self, raw_input: String) -> Result<SubmitReceipt, SessionError> {
        // History is snapshotted before the new user turn lands, so the
        // request never carries the prompt it asks about.
        let history = self.log.snapshot()?;
        let turn_index = history.len();

        let user_turn = ChatTurn::new(Role::User, raw_input.clone());
        self.log.append(user_turn.clone())?;
        self.input.clear()?;
        self.notify()?;
        self.hooks.on_exchange_start(&self.session_id, turn_index);

        let request = RuleEngineRequest::builder(raw_input)
            .chat_history(history)
            .integration_id(self.integration_id)
            .build()
            .map_err(|error| SessionError::state(format!("request build failed: {error}")))?;

        let started = Instant::now();
        match self.client.generate(request).await {
            Ok(replies) if !replies.is_empty() => {
                let elapsed = started.elapsed();
                self.log.extend(replies.clone())?;
                self.hooks
                    .on_exchange_success(&self.session_id, replies.len(), elapsed);
                Ok(SubmitReceipt {
                    user_turn,
                    replies,
                    engine_error: None,
                    elapsed,
                })
            }
            Ok(_) => {
                let error = EngineError::decode("rule engine returned no assistant turns");
                self.recover(user_turn, error, started)
            }
            Err(error) => self.recover(user_turn, error, started),
        }
    }

    fn recover(
        &self,
        user_turn: ChatTurn,
        error: EngineError,
        started: Instant,
    ) -> Result<SubmitReceipt, SessionError> {
        let elapsed = started.elapsed();
        self.hooks
            .on_exchange_failure(&self.session_id, &error, elapsed);

        let fallback = ChatTurn::new(Role::Assistant, self.fallback_reply.clone());
        self.log.append(fallback.clone())?;

        Ok(SubmitReceipt {
            user_turn,
            replies: vec![fallback],
            engine_error: Some(error),
            elapsed,
        })
    }

    fn notify(&self) -> Result<(), SessionError> {
        let snapshot = self.snapshot()?;
        self.observer.on_state_change(&self.session_id, &snapshot);
        Ok(())
    }
}

pub struct SendPipelineBuilder {
    client: Arc<dyn RuleEngineClient>,
    session_id: SessionId,
    integration_id: IntegrationId,
    hooks: Arc<dyn PipelineHooks>,
    observer: Arc<dyn SessionObserver>,
    fallback_reply: String,
}

impl SendPipelineBuilder {
    pub fn new(client: Arc<dyn RuleEngineClient>) -> Self {
        Self {
            client,
            session_id: SessionId::from("dashboard"),
            integration_id: IntegrationId::new(0),
            hooks: Arc::new(NoopPipelineHooks),
            observer: Arc::new(NoopSessionObserver),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
        }
    }

    pub fn session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn integration_id(mut self, integration_id: IntegrationId) -> Self {
        self.integration_id = integration_id;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn PipelineHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn fallback_reply(mut self, fallback_reply: impl Into<String>) -> Self {
        self.fallback_reply = fallback_reply.into();
        self
    }

    pub fn build(self) -> SendPipeline {
        SendPipeline {
            client: self.client,
            session_id: self.session_id,
            integration_id: self.integration_id,
            log: MessageLog::new(),
            input: InputBuffer::new(),
            gate: LoadingGate::new(),
            hooks: self.hooks,
            observer: self.observer,
            fallback_reply: self.fallback_reply,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use rwcommon::SessionId;
    use rwengine::{
        ChatTurn, EngineError, EngineErrorKind, EngineFuture, IntegrationId, Role,
        RuleEngineClient, RuleEngineRequest,
    };

    use super::SendPipeline;
    use crate::{PipelineHooks, RejectReason, SessionObserver, SessionSnapshot, SubmitOutcome};

    struct ScriptedClient {
        requests: Mutex<Vec<RuleEngineRequest>>,
        replies: Vec<ChatTurn>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<ChatTurn>) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                replies,
            }
        }
    }

    impl RuleEngineClient for ScriptedClient {
        fn generate<'a>(
            &'a self,
            request: RuleEngineRequest,
        ) -> EngineFuture<'a, Result<Vec<ChatTurn>, EngineError>> {
            Box::pin(async move {
                self.requests.lock().expect("requests lock").push(request);
                Ok(self.replies.clone())
            })
        }
    }

    struct FailingClient;

    impl RuleEngineClient for FailingClient {
        fn generate<'a>(
            &'a self,
            _request: RuleEngineRequest,
        ) -> EngineFuture<'a, Result<Vec<ChatTurn>, EngineError>> {
            Box::pin(async { Err(EngineError::unavailable("rule engine offline")) })
        }
    }

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl PipelineHooks for RecordingHooks {
        fn on_submit_rejected(&self, _session_id: &SessionId, reason: RejectReason) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("rejected:{reason:?}"));
        }

        fn on_exchange_start(&self, _session_id: &SessionId, turn_index: usize) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{turn_index}"));
        }

        fn on_exchange_success(
            &self,
            _session_id: &SessionId,
            reply_count: usize,
            _elapsed: Duration,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{reply_count}"));
        }

        fn on_exchange_failure(
            &self,
            _session_id: &SessionId,
            error: &EngineError,
            _elapsed: Duration,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{:?}", error.kind));
        }
    }

    #[derive(Default)]
    struct RecordingObserver {
        snapshots: Mutex<Vec<SessionSnapshot>>,
    }

    impl SessionObserver for RecordingObserver {
        fn on_state_change(&self, _session_id: &SessionId, snapshot: &SessionSnapshot) {
            self.snapshots
                .lock()
                .expect("snapshots lock")
                .push(snapshot.clone());
        }
    }

    #[tokio::test]
    async fn submit_appends_user_turn_then_assistant_replies() {
        let client = Arc::new(ScriptedClient::new(vec![ChatTurn::new(
            Role::Assistant,
            "Here is your rule...",
        )]));
        let pipeline = SendPipeline::builder(client).build();

        pipeline
            .set_input("Create a discount rule")
            .expect("set should work");
        let outcome = pipeline
            .submit("Create a discount rule")
            .await
            .expect("submit should not error");

        let receipt = outcome.receipt().expect("submission should complete");
        assert_eq!(receipt.user_turn.content, "Create a discount rule");
        assert_eq!(receipt.replies.len(), 1);
        assert!(receipt.engine_error.is_none());

        let turns = pipeline.transcript().expect("transcript should read");
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0], ChatTurn::new(Role::User, "Create a discount rule"));
        assert_eq!(turns[1], ChatTurn::new(Role::Assistant, "Here is your rule..."));
        assert_eq!(pipeline.input().expect("input should read"), "");
        assert!(!pipeline.is_sending());
    }

    #[tokio::test]
    async fn blank_submit_touches_no_state() {
        let client = Arc::new(ScriptedClient::new(Vec::new()));
        let hooks = Arc::new(RecordingHooks::default());
        let pipeline = SendPipeline::builder(client.clone())
            .hooks(hooks.clone())
            .build();

        pipeline.set_input("draft").expect("set should work");

        for raw in ["", "   ", "\t\n"] {
            let outcome = pipeline.submit(raw).await.expect("submit should not error");
            assert_eq!(outcome, SubmitOutcome::Rejected(RejectReason::EmptyInput));
        }

        assert!(pipeline.transcript().expect("transcript should read").is_empty());
        assert_eq!(pipeline.input().expect("input should read"), "draft");
        assert!(!pipeline.is_sending());
        assert!(client.requests.lock().expect("requests lock").is_empty());

        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|event| event == "rejected:EmptyInput"));
    }

    #[tokio::test]
    async fn request_history_excludes_the_turn_being_submitted() {
        let client = Arc::new(ScriptedClient::new(vec![ChatTurn::new(
            Role::Assistant,
            "Rule Chain is generated",
        )]));
        let pipeline = SendPipeline::builder(client.clone())
            .integration_id(IntegrationId::new(4))
            .build();

        pipeline
            .submit("create a light rule")
            .await
            .expect("first submit should not error");
        pipeline
            .submit("and turn it off at night")
            .await
            .expect("second submit should not error");

        let requests = client.requests.lock().expect("requests lock");
        assert_eq!(requests.len(), 2);

        assert!(requests[0].chat_history.is_empty());
        assert_eq!(requests[0].user_prompt, "create a light rule");
        assert_eq!(requests[0].integration_id, IntegrationId::new(4));
        assert!(!requests[0].is_generated);

        assert_eq!(requests[1].user_prompt, "and turn it off at night");
        assert_eq!(requests[1].chat_history.len(), 2);
        assert!(
            requests[1]
                .chat_history
                .iter()
                .all(|turn| turn.content != "and turn it off at night")
        );
    }

    #[tokio::test]
    async fn engine_failure_appends_fallback_and_releases_gate() {
        let hooks = Arc::new(RecordingHooks::default());
        let pipeline = SendPipeline::builder(Arc::new(FailingClient))
            .hooks(hooks.clone())
            .fallback_reply("The rule engine is unavailable right now.")
            .build();

        let outcome = pipeline
            .submit("Create a discount rule")
            .await
            .expect("submit should not error");

        let receipt = outcome.receipt().expect("submission should complete");
        let engine_error = receipt.engine_error.as_ref().expect("failure should be carried");
        assert_eq!(engine_error.kind, EngineErrorKind::Unavailable);

        let turns = pipeline.transcript().expect("transcript should read");
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, Role::Assistant);
        assert_eq!(turns[1].content, "The rule engine is unavailable right now.");
        assert!(!pipeline.is_sending());

        let events = hooks.events.lock().expect("events lock").clone();
        assert_eq!(events, vec!["start:0", "failure:Unavailable"]);
    }

    #[tokio::test]
    async fn empty_reply_vector_takes_the_failure_path() {
        let pipeline = SendPipeline::builder(Arc::new(ScriptedClient::new(Vec::new()))).build();

        let outcome = pipeline
            .submit("Create a discount rule")
            .await
            .expect("submit should not error");

        let receipt = outcome.receipt().expect("submission should complete");
        let engine_error = receipt.engine_error.as_ref().expect("breach should be carried");
        assert_eq!(engine_error.kind, EngineErrorKind::Decode);

        let turns = pipeline.transcript().expect("transcript should read");
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, Role::Assistant);
    }

    #[tokio::test]
    async fn observer_sees_pending_user_turn_before_the_reply_lands() {
        let observer = Arc::new(RecordingObserver::default());
        let client = Arc::new(ScriptedClient::new(vec![ChatTurn::new(
            Role::Assistant,
            "Here is your rule...",
        )]));
        let pipeline = SendPipeline::builder(client)
            .observer(observer.clone())
            .build();

        pipeline
            .set_input("Create a discount rule")
            .expect("set should work");
        pipeline
            .submit("Create a discount rule")
            .await
            .expect("submit should not error");

        let snapshots = observer.snapshots.lock().expect("snapshots lock").clone();
        assert_eq!(snapshots.len(), 3);

        assert_eq!(snapshots[0].draft, "Create a discount rule");
        assert!(snapshots[0].turns.is_empty());

        // Accepted but not yet settled: the user turn shows immediately.
        assert!(snapshots[1].sending);
        assert_eq!(snapshots[1].draft, "");
        assert_eq!(snapshots[1].turns.len(), 1);
        assert_eq!(snapshots[1].turns[0].role, Role::User);

        assert!(!snapshots[2].sending);
        assert_eq!(snapshots[2].turns.len(), 2);
    }

    #[test]
    fn clear_input_resets_the_draft() {
        let pipeline = SendPipeline::builder(Arc::new(ScriptedClient::new(Vec::new()))).build();

        pipeline.set_input("draft").expect("set should work");
        pipeline.clear_input().expect("clear should work");
        assert_eq!(pipeline.input().expect("input should read"), "");
    }

    struct PendingClient {
        gate: Mutex<Option<tokio::sync::oneshot::Receiver<Vec<ChatTurn>>>>,
    }

    impl RuleEngineClient for PendingClient {
        fn generate<'a>(
            &'a self,
            _request: RuleEngineRequest,
        ) -> EngineFuture<'a, Result<Vec<ChatTurn>, EngineError>> {
            Box::pin(async move {
                let receiver = self
                    .gate
                    .lock()
                    .expect("gate lock")
                    .take()
                    .expect("generate should be called once");
                let replies = receiver.await.expect("sender should stay alive");
                Ok(replies)
            })
        }
    }

    #[tokio::test]
    async fn in_flight_submission_drops_the_second_and_preserves_the_draft() {
        let (sender, receiver) = tokio::sync::oneshot::channel();
        let client = Arc::new(PendingClient {
            gate: Mutex::new(Some(receiver)),
        });
        let pipeline = Arc::new(SendPipeline::builder(client).build());

        let first = {
            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move { pipeline.submit("a").await })
        };

        while !pipeline.is_sending() {
            tokio::task::yield_now().await;
        }

        pipeline.set_input("b").expect("set should work");
        let second = pipeline.submit("b").await.expect("submit should not error");
        assert_eq!(second, SubmitOutcome::Rejected(RejectReason::AlreadySending));
        assert_eq!(pipeline.input().expect("input should read"), "b");
        assert_eq!(pipeline.transcript().expect("transcript should read").len(), 1);

        sender
            .send(vec![ChatTurn::new(Role::Assistant, "done")])
            .expect("receiver should be waiting");

        let outcome = first
            .await
            .expect("task should join")
            .expect("submit should not error");
        assert!(!outcome.is_rejected());
        assert!(!pipeline.is_sending());

        let turns = pipeline.transcript().expect("transcript should read");
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].content, "a");
        assert_eq!(turns[1].content, "done");
    }
}
