pub mod appointment;
pub mod day;
pub mod interviewer;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use appointment::{Appointment, AppointmentId, Interview, InterviewDetails, InterviewPayload};
pub use day::{Day, DayId};
pub use interviewer::{Interviewer, InterviewerId};

/// The three scheduler collections fetched together on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub days: Vec<Day>,
    pub appointments: BTreeMap<AppointmentId, Appointment>,
    pub interviewers: BTreeMap<InterviewerId, Interviewer>,
}

impl Schedule {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Fixture data served by the development API and used throughout the tests.
pub const FIXTURE_JSON: &str = include_str!("../../fixtures/scheduler.json");
