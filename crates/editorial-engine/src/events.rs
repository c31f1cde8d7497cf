//! Domain event sinks
//!
//! The engine emits events after its writes commit; notification and
//! analytics collaborators subscribe through this trait. The engine
//! never sends email or writes analytics itself, which keeps every
//! transition synchronous and independently testable.

use editorial_types::{CorrectionApplied, TransitionOccurred};
use std::sync::Mutex;

/// A subscriber to the engine's domain events.
///
/// Implementations must be cheap and non-blocking; anything slow belongs
/// behind the subscriber's own queue.
pub trait EventSink: Send + Sync {
    fn transition_occurred(&self, _event: &TransitionOccurred) {}

    fn correction_applied(&self, _event: &CorrectionApplied) {}
}

/// Test double that records every event it receives
#[derive(Default)]
pub struct RecordingSink {
    transitions: Mutex<Vec<TransitionOccurred>>,
    corrections: Mutex<Vec<CorrectionApplied>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transitions(&self) -> Vec<TransitionOccurred> {
        self.transitions.lock().expect("sink lock").clone()
    }

    pub fn corrections(&self) -> Vec<CorrectionApplied> {
        self.corrections.lock().expect("sink lock").clone()
    }
}

impl EventSink for RecordingSink {
    fn transition_occurred(&self, event: &TransitionOccurred) {
        self.transitions.lock().expect("sink lock").push(event.clone());
    }

    fn correction_applied(&self, event: &CorrectionApplied) {
        self.corrections.lock().expect("sink lock").push(event.clone());
    }
}
