use serde::{Deserialize, Serialize};

use super::interviewer::{Interviewer, InterviewerId};

pub type AppointmentId = u32;

/// The (student, interviewer) pairing occupying a slot, as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    pub student: String,
    pub interviewer: InterviewerId,
}

/// An interview with its interviewer resolved, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewDetails {
    pub student: String,
    pub interviewer: Interviewer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub time: String,
    pub interview: Option<Interview>,
}

impl Appointment {
    pub fn is_empty(&self) -> bool {
        self.interview.is_none()
    }
}

/// Request body for `PUT /api/appointments/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewPayload {
    pub interview: Interview,
}
