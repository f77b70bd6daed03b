use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::clients::SchedulerApi;
use crate::error::{InteractionError, PersistenceError, ValidationError};
use crate::events::queue::{EventBus, ScheduleEvent};
use crate::events::worker::run_event_worker;
use crate::handlers::appointment::AppointmentSlot;
use crate::handlers::persistence::PersistenceEngine;
use crate::handlers::view::Element;
use crate::handlers::visual_mode::Mode;
use crate::models::{AppointmentId, Interviewer, InterviewerId};
use crate::service::scheduler_service::SchedulerService;
use crate::service::selectors::{
    appointments_for_day, format_spots, interview_details, interviewers_for_day,
};
use crate::service::store::ScheduleStore;

pub const DEFAULT_DAY: &str = "Monday";

/// Everything the page shows: the committed store, the selected day and per-slot UI state.
#[derive(Debug)]
pub struct ApplicationState {
    pub day: String,
    pub store: ScheduleStore,
    pub slots: BTreeMap<AppointmentId, AppointmentSlot>,
}

impl ApplicationState {
    pub fn new(store: ScheduleStore) -> Self {
        let day = store
            .day(DEFAULT_DAY)
            .or_else(|| store.days().first())
            .map(|day| day.name.clone())
            .unwrap_or_default();
        let slots = store
            .appointments()
            .values()
            .map(|appointment| (appointment.id, AppointmentSlot::new(appointment)))
            .collect();
        Self { day, store, slots }
    }

    pub fn slot_mut(
        &mut self,
        id: AppointmentId,
    ) -> Result<&mut AppointmentSlot, InteractionError> {
        self.slots
            .get_mut(&id)
            .ok_or(InteractionError::UnknownAppointment(id))
    }

    /// Brings every slot in line with the committed appointments.
    pub fn sync_slots(&mut self) {
        for appointment in self.store.appointments().values() {
            self.slots
                .entry(appointment.id)
                .or_insert_with(|| AppointmentSlot::new(appointment))
                .sync(!appointment.is_empty());
        }
    }

    pub fn replace_store(&mut self, store: ScheduleStore) {
        self.store = store;
        if self.store.day(&self.day).is_none() {
            if let Some(first) = self.store.days().first() {
                self.day = first.name.clone();
            }
        }
        self.sync_slots();
    }

    fn interviewers_for(&self, id: AppointmentId) -> Vec<Interviewer> {
        self.store
            .day_of(id)
            .map(|day| interviewers_for_day(&self.store, &day.name))
            .unwrap_or_default()
    }

    pub fn render(&self) -> Element {
        let days = self
            .store
            .days()
            .iter()
            .map(|day| {
                Element::tagged(
                    "day",
                    day.id,
                    vec![
                        Element::text(day.name.clone()),
                        Element::text(format_spots(day.spots)),
                    ],
                )
            })
            .collect();

        let appointments = appointments_for_day(&self.store, &self.day)
            .into_iter()
            .filter_map(|appointment| {
                let slot = self.slots.get(&appointment.id)?;
                let details = interview_details(&self.store, appointment.interview.as_ref());
                Some(slot.render(appointment, details.as_ref()))
            })
            .collect();

        Element::group(vec![Element::group(days), Element::group(appointments)])
    }
}

/// Cloneable handle on the page. Interactions are synchronous; save and delete hand
/// their persistence work to the event worker.
#[derive(Clone)]
pub struct Application {
    state: Arc<Mutex<ApplicationState>>,
    bus: EventBus,
    settled: Arc<watch::Sender<u64>>,
}

impl Application {
    pub fn new(store: ScheduleStore, bus: EventBus) -> Self {
        let (settled, _) = watch::channel(0);
        Self {
            state: Arc::new(Mutex::new(ApplicationState::new(store))),
            bus,
            settled: Arc::new(settled),
        }
    }

    /// Builds the application and spawns its event worker on the current runtime.
    pub fn start(store: ScheduleStore, api: Arc<dyn SchedulerApi>) -> (Self, JoinHandle<()>) {
        let (bus, rx) = EventBus::new();
        let app = Self::new(store, bus);
        let engine = app.engine(api);
        let worker = tokio::spawn(run_event_worker(rx, engine));
        (app, worker)
    }

    pub async fn load(
        api: Arc<dyn SchedulerApi>,
    ) -> Result<(Self, JoinHandle<()>), PersistenceError> {
        let store = SchedulerService::load(api.as_ref()).await?;
        Ok(Self::start(store, api))
    }

    pub fn engine(&self, api: Arc<dyn SchedulerApi>) -> PersistenceEngine {
        PersistenceEngine::new(self.state.clone(), api, self.settled.clone())
    }

    fn lock(&self) -> MutexGuard<'_, ApplicationState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn render(&self) -> Element {
        self.lock().render()
    }

    pub fn day(&self) -> String {
        self.lock().day.clone()
    }

    pub fn mode(&self, id: AppointmentId) -> Option<Mode> {
        self.lock().slots.get(&id).map(AppointmentSlot::mode)
    }

    pub fn validation_error(&self, id: AppointmentId) -> Option<ValidationError> {
        self.lock().slots.get(&id)?.form()?.error()
    }

    /// Current name and interviewer of the slot's open form.
    pub fn form_values(&self, id: AppointmentId) -> Option<(String, Option<InterviewerId>)> {
        let state = self.lock();
        let form = state.slots.get(&id)?.form()?;
        Some((form.name().to_string(), form.interviewer()))
    }

    pub fn with_store<R>(&self, f: impl FnOnce(&ScheduleStore) -> R) -> R {
        f(&self.lock().store)
    }

    pub fn spots(&self, day_name: &str) -> Option<usize> {
        self.with_store(|store| store.day(day_name).map(|day| day.spots))
    }

    pub fn select_day(&self, name: &str) -> Result<(), InteractionError> {
        let mut state = self.lock();
        if state.store.day(name).is_none() {
            return Err(InteractionError::UnknownDay(name.to_string()));
        }
        debug!(day = name, "Selected day");
        state.day = name.to_string();
        Ok(())
    }

    pub fn add(&self, id: AppointmentId) -> Result<(), InteractionError> {
        let mut state = self.lock();
        let interviewers = state.interviewers_for(id);
        state.slot_mut(id)?.add(interviewers)
    }

    pub fn edit(&self, id: AppointmentId) -> Result<(), InteractionError> {
        let mut state = self.lock();
        let interviewers = state.interviewers_for(id);
        let interview = state
            .store
            .appointment(id)
            .and_then(|appointment| appointment.interview.clone());
        let slot = state.slot_mut(id)?;
        match interview {
            Some(interview) => slot.edit(&interview, interviewers),
            None => Err(InteractionError::Unavailable {
                id,
                action: "edit",
                mode: slot.mode(),
            }),
        }
    }

    pub fn delete(&self, id: AppointmentId) -> Result<(), InteractionError> {
        self.lock().slot_mut(id)?.delete()
    }

    pub fn cancel_confirm(&self, id: AppointmentId) -> Result<(), InteractionError> {
        self.lock().slot_mut(id)?.cancel_confirm()
    }

    /// Shows Deleting right away; the worker settles the slot once the API answers.
    pub fn confirm(&self, id: AppointmentId) -> Result<(), InteractionError> {
        let event = self.lock().slot_mut(id)?.confirm()?;
        info!(appointment_id = id, "Delete requested");
        self.publish(event);
        Ok(())
    }

    pub fn change_name(&self, id: AppointmentId, value: &str) -> Result<(), InteractionError> {
        self.lock().slot_mut(id)?.change_name(value)
    }

    pub fn select_interviewer(
        &self,
        id: AppointmentId,
        name: &str,
    ) -> Result<(), InteractionError> {
        self.lock().slot_mut(id)?.select_interviewer(name)
    }

    pub fn cancel(&self, id: AppointmentId) -> Result<(), InteractionError> {
        self.lock().slot_mut(id)?.cancel()
    }

    /// Returns false when validation failed; nothing is sent then.
    pub fn save(&self, id: AppointmentId) -> Result<bool, InteractionError> {
        let Some(event) = self.lock().slot_mut(id)?.save()? else {
            return Ok(false);
        };
        info!(appointment_id = id, "Save requested");
        self.publish(event);
        Ok(true)
    }

    /// An event the worker can never receive fails its slot right away.
    fn publish(&self, event: ScheduleEvent) {
        let Err(unsent) = self.bus.emit(event) else {
            return;
        };
        {
            let mut state = self.lock();
            if let Some(slot) = state.slots.get_mut(&unsent.appointment_id()) {
                match unsent {
                    ScheduleEvent::SaveRequested { .. } => slot.settle_save(false),
                    ScheduleEvent::DeleteRequested { .. } => slot.settle_delete(false),
                }
            }
        }
        self.settled.send_modify(|generation| *generation += 1);
    }

    pub fn submit(&self, id: AppointmentId) -> Result<(), InteractionError> {
        self.lock().slot_mut(id)?.submit()
    }

    pub fn close_error(&self, id: AppointmentId) -> Result<(), InteractionError> {
        self.lock().slot_mut(id)?.close_error()
    }

    /// Waits until the slot leaves Saving/Deleting and returns the mode it landed in.
    pub async fn settled(&self, id: AppointmentId) -> Option<Mode> {
        let mut rx = self.settled.subscribe();
        loop {
            let mode = self.mode(id)?;
            if !mode.is_transient() {
                return Some(mode);
            }
            if rx.changed().await.is_err() {
                return self.mode(id);
            }
        }
    }

    /// Refetches the schedule; slots resync against the new data.
    pub async fn reload<A: SchedulerApi + ?Sized>(&self, api: &A) -> Result<(), PersistenceError> {
        let store = SchedulerService::load(api).await?;
        self.lock().replace_store(store);
        Ok(())
    }
}
