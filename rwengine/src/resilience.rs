//! Standard retry/backoff policy, operational hook contracts, and a retrying
//! client decorator.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures_timer::Delay;

use crate::{ChatTurn, EngineError, EngineFuture, RuleEngineClient, RuleEngineRequest};

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(5),
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    pub fn should_retry(&self, attempt: u32, error: &EngineError) -> bool {
        error.retryable && attempt < self.max_attempts
    }

    pub fn backoff_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = (attempt.saturating_sub(1)) as i32;
        let unbounded = self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Duration::from_secs_f64(unbounded.min(self.max_backoff.as_secs_f64()))
    }
}

pub trait EngineOperationHooks: Send + Sync {
    fn on_attempt_start(&self, _operation: &str, _attempt: u32) {}

    fn on_retry_scheduled(
        &self,
        _operation: &str,
        _attempt: u32,
        _delay: Duration,
        _error: &EngineError,
    ) {
    }

    fn on_success(&self, _operation: &str, _attempts: u32) {}

    fn on_failure(&self, _operation: &str, _attempts: u32, _error: &EngineError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl EngineOperationHooks for NoopOperationHooks {}

pub async fn execute_with_retry<T, Op, OpFuture, Sleep, SleepFuture>(
    operation: &str,
    policy: &RetryPolicy,
    hooks: &dyn EngineOperationHooks,
    mut execute: Op,
    mut sleep: Sleep,
) -> Result<T, EngineError>
where
    Op: FnMut(u32) -> OpFuture,
    OpFuture: Future<Output = Result<T, EngineError>>,
    Sleep: FnMut(Duration) -> SleepFuture,
    SleepFuture: Future<Output = ()>,
{
    let mut attempt = 1;

    loop {
        hooks.on_attempt_start(operation, attempt);

        match execute(attempt).await {
            Ok(value) => {
                hooks.on_success(operation, attempt);
                return Ok(value);
            }
            Err(error) => {
                if policy.should_retry(attempt, &error) {
                    let delay = policy.backoff_for_attempt(attempt);
                    hooks.on_retry_scheduled(operation, attempt, delay, &error);
                    sleep(delay).await;
                    attempt += 1;
                    continue;
                }

                hooks.on_failure(operation, attempt, &error);
                return Err(error);
            }
        }
    }
}

/// Decorates any [`RuleEngineClient`] with the retry policy. Retries stay in
/// the client layer; the conversation pipeline never retries on its own.
pub struct RetryingClient {
    inner: Arc<dyn RuleEngineClient>,
    policy: RetryPolicy,
    hooks: Arc<dyn EngineOperationHooks>,
}

impl RetryingClient {
    pub fn new(inner: Arc<dyn RuleEngineClient>, policy: RetryPolicy) -> Self {
        Self {
            inner,
            policy,
            hooks: Arc::new(NoopOperationHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn EngineOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }
}

impl RuleEngineClient for RetryingClient {
    fn generate<'a>(
        &'a self,
        request: RuleEngineRequest,
    ) -> EngineFuture<'a, Result<Vec<ChatTurn>, EngineError>> {
        Box::pin(async move {
            execute_with_retry(
                "generate",
                &self.policy,
                self.hooks.as_ref(),
                |_attempt| self.inner.generate(request.clone()),
                |delay| Delay::new(delay),
            )
            .await
        })
    }
}
