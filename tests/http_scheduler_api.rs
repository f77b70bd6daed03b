use std::net::SocketAddr;
use std::sync::Arc;

use interviewScheduler::clients::{HttpSchedulerApi, SchedulerApi};
use interviewScheduler::error::PersistenceError;
use interviewScheduler::handlers::application::Application;
use interviewScheduler::handlers::visual_mode::Mode;
use interviewScheduler::models::{Interview, Schedule, FIXTURE_JSON};
use interviewScheduler::server::{routes, ServerState};
use interviewScheduler::service::store::ScheduleStore;
use tokio::net::TcpListener;
use tokio::time::{timeout, Duration};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

fn spawn_server() -> (SocketAddr, Arc<ServerState>) {
    let state = ServerState::new(Schedule::from_json(FIXTURE_JSON).unwrap());
    let (addr, server) = warp::serve(routes(state.clone())).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    (addr, state)
}

#[tokio::test]
async fn client_reads_the_served_schedule() {
    let (addr, _state) = spawn_server();
    let api = HttpSchedulerApi::new(format!("http://{}", addr), REQUEST_TIMEOUT).unwrap();

    let days = api.fetch_days().await.unwrap();
    let appointments = api.fetch_appointments().await.unwrap();
    let interviewers = api.fetch_interviewers().await.unwrap();

    assert_eq!(days.len(), 2);
    assert_eq!(days[0].appointments, vec![1, 2]);
    assert_eq!(
        appointments[&2].interview.as_ref().map(|i| i.student.as_str()),
        Some("Archie Cohen")
    );
    assert_eq!(interviewers[&1].name, "Sylvia Palmer");
}

#[tokio::test]
async fn non_success_status_is_a_rejection() {
    let (addr, _state) = spawn_server();
    let api = HttpSchedulerApi::new(format!("http://{}/", addr), REQUEST_TIMEOUT).unwrap();

    let err = api
        .save_interview(
            99,
            &Interview {
                student: "Lydia Miller-Jones".to_string(),
                interviewer: 1,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PersistenceError::Rejected { status: 404 }));

    let err = api.delete_interview(99).await.unwrap_err();
    assert!(matches!(err, PersistenceError::Rejected { status: 404 }));
}

#[tokio::test]
async fn application_books_and_cancels_against_the_server() {
    let (addr, state) = spawn_server();
    let api = Arc::new(HttpSchedulerApi::new(format!("http://{}", addr), REQUEST_TIMEOUT).unwrap());
    let (app, _worker) = Application::load(api).await.unwrap();

    app.add(1).unwrap();
    app.change_name(1, "Lydia Miller-Jones").unwrap();
    app.select_interviewer(1, "Sylvia Palmer").unwrap();
    assert!(app.save(1).unwrap());
    let mode = timeout(Duration::from_secs(5), app.settled(1)).await.unwrap();
    assert_eq!(mode, Some(Mode::Show));

    app.delete(2).unwrap();
    app.confirm(2).unwrap();
    let mode = timeout(Duration::from_secs(5), app.settled(2)).await.unwrap();
    assert_eq!(mode, Some(Mode::Empty));

    let served = state.snapshot().await;
    assert_eq!(
        served.appointments[&1].interview,
        Some(Interview {
            student: "Lydia Miller-Jones".to_string(),
            interviewer: 1,
        })
    );
    assert!(served.appointments[&2].interview.is_none());
    assert_eq!(app.spots("Monday"), Some(1));
    assert_eq!(served.days[0].spots, 1);
}

#[tokio::test]
async fn unanswered_request_times_out_into_a_save_error() {
    // Accepts connections and never writes a response.
    let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });

    let api =
        HttpSchedulerApi::new(format!("http://{}", addr), Duration::from_millis(200)).unwrap();
    let err = api.delete_interview(2).await.unwrap_err();
    assert!(matches!(err, PersistenceError::Request(_)));

    let store = ScheduleStore::new(Schedule::from_json(FIXTURE_JSON).unwrap());
    let (app, _worker) = Application::start(store, Arc::new(api));
    app.add(1).unwrap();
    app.change_name(1, "Lydia Miller-Jones").unwrap();
    app.select_interviewer(1, "Sylvia Palmer").unwrap();
    assert!(app.save(1).unwrap());

    let mode = timeout(Duration::from_secs(5), app.settled(1)).await.unwrap();
    assert_eq!(mode, Some(Mode::ErrorSave));
    assert_eq!(app.spots("Monday"), Some(1));
}
