use tokio::sync::mpsc;
use tracing::warn;

use crate::models::{AppointmentId, Interview};

/// Persistence work published by UI interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleEvent {
    SaveRequested {
        appointment_id: AppointmentId,
        interview: Interview,
        is_new: bool,
    },
    DeleteRequested {
        appointment_id: AppointmentId,
    },
}

impl ScheduleEvent {
    pub fn appointment_id(&self) -> AppointmentId {
        match self {
            ScheduleEvent::SaveRequested { appointment_id, .. }
            | ScheduleEvent::DeleteRequested { appointment_id } => *appointment_id,
        }
    }
}

/// UI events fire synchronously, so the bus is unbounded and `emit` never waits.
#[derive(Clone)]
pub struct EventBus {
    tx: mpsc::UnboundedSender<ScheduleEvent>,
}

impl EventBus {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ScheduleEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Hands the event back when the worker is gone so the caller can fail the slot.
    pub fn emit(&self, event: ScheduleEvent) -> Result<(), ScheduleEvent> {
        self.tx.send(event).map_err(|err| {
            warn!(event = ?err.0, "Event bus closed");
            err.0
        })
    }
}
