//! Single-permit send gate.

use std::sync::atomic::{AtomicBool, Ordering};

/// One permit, one holder. Held from the moment a send is accepted until the
/// engine call settles; while held, new sends are rejected rather than
/// queued.
#[derive(Debug, Default)]
pub struct LoadingGate {
    held: AtomicBool,
}

impl LoadingGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> bool {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn release(&self) {
        self.held.store(false, Ordering::Release);
    }

    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }
}
