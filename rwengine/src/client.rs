use std::future::Future;
use std::pin::Pin;

use crate::{ChatTurn, EngineError, RuleEngineRequest};

pub type EngineFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Contract for the rule-generation round trip.
///
/// Implementations must not mutate the request, may take arbitrary time, and
/// resolve with one or more assistant turns or a classified [`EngineError`].
pub trait RuleEngineClient: Send + Sync {
    fn generate<'a>(
        &'a self,
        request: RuleEngineRequest,
    ) -> EngineFuture<'a, Result<Vec<ChatTurn>, EngineError>>;
}
