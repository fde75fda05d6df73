//! Session snapshot and submit outcome types.

use std::time::Duration;

use rwengine::{ChatTurn, EngineError};

/// Point-in-time view of the session handed to renderers. The copies are
/// deliberate: later mutations cannot reach into an already-published view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub turns: Vec<ChatTurn>,
    pub draft: String,
    pub sending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmptyInput,
    AlreadySending,
}

/// What a settled submission left behind. `engine_error` is `Some` exactly
/// when the fallback reply was appended instead of real engine output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub user_turn: ChatTurn,
    pub replies: Vec<ChatTurn>,
    pub engine_error: Option<EngineError>,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(RejectReason),
    Completed(SubmitReceipt),
}

impl SubmitOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn receipt(&self) -> Option<&SubmitReceipt> {
        match self {
            Self::Completed(receipt) => Some(receipt),
            Self::Rejected(_) => None,
        }
    }
}
