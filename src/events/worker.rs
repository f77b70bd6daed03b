use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use crate::events::queue::ScheduleEvent;
use crate::handlers::persistence::PersistenceEngine;

/// Drains the bus, settling each event on its own task so a slow call on one slot never
/// holds up another. Returns once every `EventBus` handle is dropped.
pub async fn run_event_worker(
    mut rx: mpsc::UnboundedReceiver<ScheduleEvent>,
    engine: PersistenceEngine,
) {
    let engine = Arc::new(engine);
    while let Some(event) = rx.recv().await {
        debug!(appointment_id = event.appointment_id(), "Handling schedule event");
        let engine = engine.clone();
        tokio::spawn(async move {
            engine.handle_event(event).await;
        });
    }
    debug!("Event bus closed, worker exiting");
}
