use serde::{Deserialize, Serialize};

use super::appointment::AppointmentId;
use super::interviewer::InterviewerId;

pub type DayId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub id: DayId,
    pub name: String,
    pub appointments: Vec<AppointmentId>,
    pub interviewers: Vec<InterviewerId>,
    // Derived from the appointment collection; whatever the server sends is recomputed.
    #[serde(default)]
    pub spots: usize,
}

impl Day {
    /// Day names are weekday names ("Monday"), so they parse into `chrono::Weekday`.
    pub fn weekday(&self) -> Option<chrono::Weekday> {
        self.name.parse().ok()
    }
}
