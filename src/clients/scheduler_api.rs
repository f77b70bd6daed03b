use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::error::PersistenceError;
use crate::models::{
    Appointment, AppointmentId, Day, Interview, InterviewPayload, Interviewer, InterviewerId,
};

#[async_trait]
pub trait SchedulerApi: Send + Sync {
    async fn fetch_days(&self) -> Result<Vec<Day>, PersistenceError>;
    async fn fetch_appointments(
        &self,
    ) -> Result<BTreeMap<AppointmentId, Appointment>, PersistenceError>;
    async fn fetch_interviewers(
        &self,
    ) -> Result<BTreeMap<InterviewerId, Interviewer>, PersistenceError>;
    async fn save_interview(
        &self,
        id: AppointmentId,
        interview: &Interview,
    ) -> Result<(), PersistenceError>;
    async fn delete_interview(&self, id: AppointmentId) -> Result<(), PersistenceError>;
}

pub struct HttpSchedulerApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSchedulerApi {
    /// Every request is bounded by `timeout`; a hung call surfaces as a rejection.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PersistenceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, PersistenceError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        check_status(response.status())?;
        Ok(response.json::<T>().await?)
    }
}

fn check_status(status: StatusCode) -> Result<(), PersistenceError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(PersistenceError::Rejected {
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl SchedulerApi for HttpSchedulerApi {
    async fn fetch_days(&self) -> Result<Vec<Day>, PersistenceError> {
        self.get_json("days").await
    }

    async fn fetch_appointments(
        &self,
    ) -> Result<BTreeMap<AppointmentId, Appointment>, PersistenceError> {
        self.get_json("appointments").await
    }

    async fn fetch_interviewers(
        &self,
    ) -> Result<BTreeMap<InterviewerId, Interviewer>, PersistenceError> {
        self.get_json("interviewers").await
    }

    async fn save_interview(
        &self,
        id: AppointmentId,
        interview: &Interview,
    ) -> Result<(), PersistenceError> {
        let url = self.url(&format!("appointments/{}", id));
        debug!(%url, "PUT");
        let payload = InterviewPayload {
            interview: interview.clone(),
        };
        let response = self.client.put(&url).json(&payload).send().await?;
        check_status(response.status())
    }

    async fn delete_interview(&self, id: AppointmentId) -> Result<(), PersistenceError> {
        let url = self.url(&format!("appointments/{}", id));
        debug!(%url, "DELETE");
        let response = self.client.delete(&url).send().await?;
        check_status(response.status())
    }
}
