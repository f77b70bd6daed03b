use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::info;

use crate::clients::SchedulerApi;
use crate::error::PersistenceError;
use crate::events::queue::ScheduleEvent;
use crate::handlers::application::ApplicationState;
use crate::models::{AppointmentId, Interview};
use crate::service::scheduler_service::SchedulerService;

/// Settles in-flight saves and deletes: calls the API, commits to the store on success,
/// then moves the slot out of its transient mode.
pub struct PersistenceEngine {
    state: Arc<Mutex<ApplicationState>>,
    api: Arc<dyn SchedulerApi>,
    settled: Arc<watch::Sender<u64>>,
}

impl PersistenceEngine {
    pub fn new(
        state: Arc<Mutex<ApplicationState>>,
        api: Arc<dyn SchedulerApi>,
        settled: Arc<watch::Sender<u64>>,
    ) -> Self {
        Self { state, api, settled }
    }

    pub async fn handle_event(&self, event: ScheduleEvent) {
        match event {
            ScheduleEvent::SaveRequested {
                appointment_id,
                interview,
                is_new,
            } => {
                let persisted = SchedulerService::persist_booking(
                    self.api.as_ref(),
                    appointment_id,
                    &interview,
                )
                .await;
                if self.settle_save(appointment_id, interview, persisted) {
                    info!(appointment_id, is_new, "Interview saved");
                }
            }
            ScheduleEvent::DeleteRequested { appointment_id } => {
                let persisted =
                    SchedulerService::persist_cancellation(self.api.as_ref(), appointment_id)
                        .await;
                if self.settle_delete(appointment_id, persisted) {
                    info!(appointment_id, "Interview deleted");
                }
            }
        }
        self.settled.send_modify(|generation| *generation += 1);
    }

    fn settle_save(
        &self,
        id: AppointmentId,
        interview: Interview,
        persisted: Result<(), PersistenceError>,
    ) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let committed =
            SchedulerService::commit_booking(&mut state.store, id, interview, persisted).is_ok();
        if let Some(slot) = state.slots.get_mut(&id) {
            slot.settle_save(committed);
        }
        state.sync_slots();
        committed
    }

    fn settle_delete(&self, id: AppointmentId, persisted: Result<(), PersistenceError>) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let committed =
            SchedulerService::commit_cancellation(&mut state.store, id, persisted).is_ok();
        if let Some(slot) = state.slots.get_mut(&id) {
            slot.settle_delete(committed);
        }
        state.sync_slots();
        committed
    }
}
