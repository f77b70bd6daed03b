use std::collections::BTreeMap;
use std::sync::Arc;

use interviewScheduler::clients::SchedulerApi;
use interviewScheduler::error::PersistenceError;
use interviewScheduler::events::queue::EventBus;
use interviewScheduler::events::worker::run_event_worker;
use interviewScheduler::handlers::application::Application;
use interviewScheduler::handlers::view::Element;
use interviewScheduler::handlers::visual_mode::Mode;
use interviewScheduler::models::{
    Appointment, AppointmentId, Day, Interview, Interviewer, InterviewerId, Schedule, FIXTURE_JSON,
};
use interviewScheduler::service::store::ScheduleStore;
use tokio::sync::{Mutex, Notify};
use tokio::time::{timeout, Duration};

/// Saves wait for the test to release them; `stalled` saves never finish.
struct GatedSchedulerApi {
    gate: Notify,
    stalled: Vec<AppointmentId>,
    saves: Mutex<Vec<AppointmentId>>,
    deletes: Mutex<Vec<AppointmentId>>,
}

impl GatedSchedulerApi {
    fn new(stalled: Vec<AppointmentId>) -> Self {
        Self {
            gate: Notify::new(),
            stalled,
            saves: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl SchedulerApi for GatedSchedulerApi {
    async fn fetch_days(&self) -> Result<Vec<Day>, PersistenceError> {
        Ok(Vec::new())
    }

    async fn fetch_appointments(
        &self,
    ) -> Result<BTreeMap<AppointmentId, Appointment>, PersistenceError> {
        Ok(BTreeMap::new())
    }

    async fn fetch_interviewers(
        &self,
    ) -> Result<BTreeMap<InterviewerId, Interviewer>, PersistenceError> {
        Ok(BTreeMap::new())
    }

    async fn save_interview(
        &self,
        id: AppointmentId,
        _interview: &Interview,
    ) -> Result<(), PersistenceError> {
        if self.stalled.contains(&id) {
            std::future::pending::<()>().await;
        }
        self.gate.notified().await;
        self.saves.lock().await.push(id);
        Ok(())
    }

    async fn delete_interview(&self, id: AppointmentId) -> Result<(), PersistenceError> {
        self.deletes.lock().await.push(id);
        Ok(())
    }
}

fn store() -> ScheduleStore {
    ScheduleStore::new(Schedule::from_json(FIXTURE_JSON).unwrap())
}

fn slot(view: &Element, id: AppointmentId) -> &Element {
    view.find_all_by_test_id("appointment")
        .into_iter()
        .find(|el| el.key() == Some(id))
        .expect("appointment rendered")
}

fn book_lydia(app: &Application, id: AppointmentId) {
    app.add(id).unwrap();
    app.change_name(id, "Lydia Miller-Jones").unwrap();
    app.select_interviewer(id, "Sylvia Palmer").unwrap();
    assert!(app.save(id).unwrap());
}

#[tokio::test]
async fn spots_stay_committed_until_the_save_resolves() {
    let api = Arc::new(GatedSchedulerApi::new(Vec::new()));
    let (bus, rx) = EventBus::new();
    let app = Application::new(store(), bus);
    let worker = tokio::spawn(run_event_worker(rx, app.engine(api.clone())));

    book_lydia(&app, 1);

    tokio::task::yield_now().await;
    assert_eq!(app.mode(1), Some(Mode::Saving));
    assert_eq!(app.spots("Monday"), Some(1));

    api.gate.notify_one();
    let mode = timeout(Duration::from_secs(2), app.settled(1)).await.unwrap();
    assert_eq!(mode, Some(Mode::Show));
    assert_eq!(app.spots("Monday"), Some(0));
    assert_eq!(api.saves.lock().await.as_slice(), &[1]);

    drop(app);
    timeout(Duration::from_secs(2), worker)
        .await
        .expect("worker exits once the bus is dropped")
        .unwrap();
}

#[tokio::test]
async fn a_stalled_save_does_not_hold_up_other_slots() {
    let api = Arc::new(GatedSchedulerApi::new(vec![1]));
    let (app, _worker) = Application::start(store(), api.clone());

    book_lydia(&app, 1);
    app.delete(2).unwrap();
    app.confirm(2).unwrap();

    let mode = timeout(Duration::from_secs(2), app.settled(2))
        .await
        .expect("delete settles while the save is stalled");
    assert_eq!(mode, Some(Mode::Empty));
    assert_eq!(api.deletes.lock().await.as_slice(), &[2]);

    assert_eq!(app.mode(1), Some(Mode::Saving));
    assert_eq!(app.spots("Monday"), Some(2));
}

#[tokio::test]
async fn closed_bus_fails_the_delete_visibly() {
    let (bus, rx) = EventBus::new();
    let app = Application::new(store(), bus);
    drop(rx);

    app.delete(2).unwrap();
    app.confirm(2).unwrap();

    let mode = timeout(Duration::from_secs(2), app.settled(2)).await.unwrap();
    assert_eq!(mode, Some(Mode::ErrorDelete));
    let view = app.render();
    assert!(slot(&view, 2).has_text("Could not cancel appointment."));
    assert_eq!(app.spots("Monday"), Some(1));

    app.close_error(2).unwrap();
    assert!(slot(&app.render(), 2).has_text("Archie Cohen"));
}

#[tokio::test]
async fn closed_bus_fails_the_save_visibly() {
    let (bus, rx) = EventBus::new();
    let app = Application::new(store(), bus);
    drop(rx);

    book_lydia(&app, 1);

    let mode = timeout(Duration::from_secs(2), app.settled(1)).await.unwrap();
    assert_eq!(mode, Some(Mode::ErrorSave));
    assert!(slot(&app.render(), 1).has_text("Could not save appointment."));
    assert_eq!(app.spots("Monday"), Some(1));

    app.close_error(1).unwrap();
    assert_eq!(
        app.form_values(1),
        Some(("Lydia Miller-Jones".to_string(), Some(1)))
    );
}
