use std::collections::BTreeMap;

use tracing::info;

use crate::error::StoreError;
use crate::models::{
    Appointment, AppointmentId, Day, Interview, Interviewer, InterviewerId, Schedule,
};
use crate::service::selectors::update_spots;

/// Authoritative copy of the committed schedule. Spot counts are never edited in place;
/// every commit rebuilds them from the appointment collection.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    days: Vec<Day>,
    appointments: BTreeMap<AppointmentId, Appointment>,
    interviewers: BTreeMap<InterviewerId, Interviewer>,
}

impl ScheduleStore {
    pub fn new(schedule: Schedule) -> Self {
        let days = update_spots(&schedule.days, &schedule.appointments);
        Self {
            days,
            appointments: schedule.appointments,
            interviewers: schedule.interviewers,
        }
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn day(&self, name: &str) -> Option<&Day> {
        self.days.iter().find(|day| day.name == name)
    }

    pub fn day_for_weekday(&self, weekday: chrono::Weekday) -> Option<&Day> {
        self.days.iter().find(|day| day.weekday() == Some(weekday))
    }

    pub fn appointments(&self) -> &BTreeMap<AppointmentId, Appointment> {
        &self.appointments
    }

    pub fn appointment(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.get(&id)
    }

    pub fn interviewers(&self) -> &BTreeMap<InterviewerId, Interviewer> {
        &self.interviewers
    }

    /// The day whose appointment list contains `id`.
    pub fn day_of(&self, id: AppointmentId) -> Option<&Day> {
        self.days.iter().find(|day| day.appointments.contains(&id))
    }

    pub fn book_interview(
        &mut self,
        id: AppointmentId,
        interview: Interview,
    ) -> Result<(), StoreError> {
        self.replace_interview(id, Some(interview))
    }

    pub fn cancel_interview(&mut self, id: AppointmentId) -> Result<(), StoreError> {
        self.replace_interview(id, None)
    }

    pub fn snapshot(&self) -> Schedule {
        Schedule {
            days: self.days.clone(),
            appointments: self.appointments.clone(),
            interviewers: self.interviewers.clone(),
        }
    }

    fn replace_interview(
        &mut self,
        id: AppointmentId,
        interview: Option<Interview>,
    ) -> Result<(), StoreError> {
        let current = self
            .appointments
            .get(&id)
            .ok_or(StoreError::UnknownAppointment(id))?;
        let appointment = Appointment {
            interview,
            ..current.clone()
        };
        let mut appointments = self.appointments.clone();
        appointments.insert(id, appointment);
        self.days = update_spots(&self.days, &appointments);
        self.appointments = appointments;
        info!(appointment_id = id, "Committed appointment change");
        Ok(())
    }
}
