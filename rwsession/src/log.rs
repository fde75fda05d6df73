//! Append-only conversation transcript.

use std::sync::Mutex;

use rwengine::ChatTurn;

use crate::SessionError;

/// Ordered chat turns for one session. Turns are only ever appended; the
/// transcript lives and dies with the session that owns it.
#[derive(Debug, Default)]
pub struct MessageLog {
    turns: Mutex<Vec<ChatTurn>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, turn: ChatTurn) -> Result<(), SessionError> {
        self.lock()?.push(turn);
        Ok(())
    }

    pub fn extend(&self, turns: Vec<ChatTurn>) -> Result<(), SessionError> {
        self.lock()?.extend(turns);
        Ok(())
    }

    /// Defensive copy: appends made after the snapshot cannot retroactively
    /// mutate a request payload built from it.
    pub fn snapshot(&self) -> Result<Vec<ChatTurn>, SessionError> {
        Ok(self.lock()?.clone())
    }

    pub fn len(&self) -> Result<usize, SessionError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<ChatTurn>>, SessionError> {
        self.turns
            .lock()
            .map_err(|_| SessionError::state("message log lock poisoned"))
    }
}
