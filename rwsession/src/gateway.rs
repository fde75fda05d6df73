//! Sign-out seam owned by the hosting application.

use rwcommon::BoxFuture;

use crate::SessionError;

/// External auth collaborator. The core invokes `logout` on user intent and
/// consumes nothing from it beyond completion.
pub trait SessionGateway: Send + Sync {
    fn logout<'a>(&'a self) -> BoxFuture<'a, Result<(), SessionError>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionGateway;

impl SessionGateway for NoopSessionGateway {
    fn logout<'a>(&'a self) -> BoxFuture<'a, Result<(), SessionError>> {
        Box::pin(async { Ok(()) })
    }
}
