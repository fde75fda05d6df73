//! Draft input buffer.

use std::sync::Mutex;

use crate::SessionError;

/// The user's in-progress, uncommitted text. Keystrokes replace the value
/// unconditionally; validation happens at submit time, never here.
#[derive(Debug, Default)]
pub struct InputBuffer {
    text: Mutex<String>,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&self, text: impl Into<String>) -> Result<(), SessionError> {
        *self.lock()? = text.into();
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        self.lock()?.clear();
        Ok(())
    }

    pub fn text(&self) -> Result<String, SessionError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, String>, SessionError> {
        self.text
            .lock()
            .map_err(|_| SessionError::state("input buffer lock poisoned"))
    }
}
