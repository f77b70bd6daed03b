//! Fixture scheduler API served with warp. Stands in for the real scheduler API during
//! development and backs the HTTP client tests.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};
use warp::http::StatusCode;
use warp::{Filter, Reply};

use crate::models::{AppointmentId, InterviewPayload, Schedule};
use crate::service::store::ScheduleStore;

pub struct ServerState {
    store: Mutex<ScheduleStore>,
    initial: Schedule,
}

impl ServerState {
    pub fn new(schedule: Schedule) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(ScheduleStore::new(schedule.clone())),
            initial: schedule,
        })
    }

    pub async fn snapshot(&self) -> Schedule {
        self.store.lock().await.snapshot()
    }
}

fn with_state(
    state: Arc<ServerState>,
) -> impl Filter<Extract = (Arc<ServerState>,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

pub fn routes(
    state: Arc<ServerState>,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    let days = warp::path!("api" / "days")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(list_days);

    let appointments = warp::path!("api" / "appointments")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(list_appointments);

    let interviewers = warp::path!("api" / "interviewers")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(list_interviewers);

    let book = warp::path!("api" / "appointments" / AppointmentId)
        .and(warp::put())
        .and(warp::body::json::<InterviewPayload>())
        .and(with_state(state.clone()))
        .and_then(book_interview);

    let cancel = warp::path!("api" / "appointments" / AppointmentId)
        .and(warp::delete())
        .and(with_state(state.clone()))
        .and_then(cancel_interview);

    let reset = warp::path!("api" / "debug" / "reset")
        .and(warp::get())
        .and(with_state(state))
        .and_then(reset_schedule);

    days.or(appointments)
        .or(interviewers)
        .or(book)
        .or(cancel)
        .or(reset)
        .with(warp::trace::request())
}

async fn list_days(state: Arc<ServerState>) -> Result<impl Reply, Infallible> {
    let store = state.store.lock().await;
    Ok(warp::reply::json(&store.days()))
}

async fn list_appointments(state: Arc<ServerState>) -> Result<impl Reply, Infallible> {
    let store = state.store.lock().await;
    Ok(warp::reply::json(store.appointments()))
}

async fn list_interviewers(state: Arc<ServerState>) -> Result<impl Reply, Infallible> {
    let store = state.store.lock().await;
    Ok(warp::reply::json(store.interviewers()))
}

async fn book_interview(
    id: AppointmentId,
    payload: InterviewPayload,
    state: Arc<ServerState>,
) -> Result<impl Reply, Infallible> {
    let mut store = state.store.lock().await;
    match store.book_interview(id, payload.interview) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(err) => {
            warn!(error = %err, "Rejected booking");
            Ok(StatusCode::NOT_FOUND)
        }
    }
}

async fn cancel_interview(
    id: AppointmentId,
    state: Arc<ServerState>,
) -> Result<impl Reply, Infallible> {
    let mut store = state.store.lock().await;
    match store.cancel_interview(id) {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(err) => {
            warn!(error = %err, "Rejected cancellation");
            Ok(StatusCode::NOT_FOUND)
        }
    }
}

async fn reset_schedule(state: Arc<ServerState>) -> Result<impl Reply, Infallible> {
    let mut store = state.store.lock().await;
    *store = ScheduleStore::new(state.initial.clone());
    info!("Fixture schedule reset");
    Ok(StatusCode::OK)
}

pub async fn serve(state: Arc<ServerState>, addr: SocketAddr) {
    info!(%addr, "Serving fixture scheduler API");
    warp::serve(routes(state)).run(addr).await;
}
