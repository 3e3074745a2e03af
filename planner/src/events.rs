//! Change notifications for the presentation layer.
//!
//! The core emits an event after every successful mutation; the UI layer
//! subscribes and re-renders from the read accessors. The core never calls
//! back into any UI toolkit.

use tokio::sync::broadcast;

/// Something the presentation layer may want to re-render for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerEvent {
    /// The vote snapshot changed; tallies and per-participant views are stale.
    TallyChanged,
    /// The schedule grid changed (manual edit, clear, or auto-schedule).
    ScheduleChanged,
}

/// Event broadcaster shared by the ledger and the scheduler.
#[derive(Debug, Clone)]
pub struct PlannerEvents {
    tx: broadcast::Sender<PlannerEvent>,
}

impl PlannerEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(32);
        Self { tx }
    }

    /// Subscribe to change events.
    pub fn subscribe(&self) -> broadcast::Receiver<PlannerEvent> {
        self.tx.subscribe()
    }

    /// Broadcast an event to all subscribers.
    pub(crate) fn emit(&self, event: PlannerEvent) {
        // Ignore send errors (no subscribers is OK)
        let _ = self.tx.send(event);
    }
}

impl Default for PlannerEvents {
    fn default() -> Self {
        Self::new()
    }
}
