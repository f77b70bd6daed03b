use tracing::{info, warn};

use crate::clients::SchedulerApi;
use crate::error::PersistenceError;
use crate::models::{AppointmentId, Interview, Schedule};
use crate::service::store::ScheduleStore;

pub struct SchedulerService;

impl SchedulerService {
    /// Fetches days, appointments and interviewers concurrently.
    pub async fn load<A>(api: &A) -> Result<ScheduleStore, PersistenceError>
    where
        A: SchedulerApi + ?Sized,
    {
        let (days, appointments, interviewers) = tokio::try_join!(
            api.fetch_days(),
            api.fetch_appointments(),
            api.fetch_interviewers(),
        )?;
        info!(
            days = days.len(),
            appointments = appointments.len(),
            interviewers = interviewers.len(),
            "Loaded schedule"
        );
        Ok(ScheduleStore::new(Schedule {
            days,
            appointments,
            interviewers,
        }))
    }

    pub async fn persist_booking<A>(
        api: &A,
        id: AppointmentId,
        interview: &Interview,
    ) -> Result<(), PersistenceError>
    where
        A: SchedulerApi + ?Sized,
    {
        api.save_interview(id, interview).await.inspect_err(|err| {
            warn!(appointment_id = id, error = %err, "Failed to save interview");
        })
    }

    pub async fn persist_cancellation<A>(api: &A, id: AppointmentId) -> Result<(), PersistenceError>
    where
        A: SchedulerApi + ?Sized,
    {
        api.delete_interview(id).await.inspect_err(|err| {
            warn!(appointment_id = id, error = %err, "Failed to delete interview");
        })
    }

    /// Commits a booking once the API has answered. A rejection leaves `store` untouched.
    pub fn commit_booking(
        store: &mut ScheduleStore,
        id: AppointmentId,
        interview: Interview,
        persisted: Result<(), PersistenceError>,
    ) -> Result<(), PersistenceError> {
        persisted?;
        store.book_interview(id, interview).inspect_err(|err| {
            warn!(appointment_id = id, error = %err, "Saved interview has no local appointment");
        })?;
        Ok(())
    }

    pub fn commit_cancellation(
        store: &mut ScheduleStore,
        id: AppointmentId,
        persisted: Result<(), PersistenceError>,
    ) -> Result<(), PersistenceError> {
        persisted?;
        store.cancel_interview(id).inspect_err(|err| {
            warn!(appointment_id = id, error = %err, "Deleted interview has no local appointment");
        })?;
        Ok(())
    }
}
