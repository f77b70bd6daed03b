use std::collections::BTreeMap;

use crate::models::{Appointment, AppointmentId, Day, Interview, InterviewDetails, Interviewer};
use crate::service::store::ScheduleStore;

pub fn appointments_for_day<'a>(store: &'a ScheduleStore, day_name: &str) -> Vec<&'a Appointment> {
    let Some(day) = store.day(day_name) else {
        return Vec::new();
    };
    day.appointments
        .iter()
        .filter_map(|id| store.appointments().get(id))
        .collect()
}

pub fn interviewers_for_day(store: &ScheduleStore, day_name: &str) -> Vec<Interviewer> {
    let Some(day) = store.day(day_name) else {
        return Vec::new();
    };
    day.interviewers
        .iter()
        .filter_map(|id| store.interviewers().get(id).cloned())
        .collect()
}

pub fn interview_details(
    store: &ScheduleStore,
    interview: Option<&Interview>,
) -> Option<InterviewDetails> {
    let interview = interview?;
    let interviewer = store.interviewers().get(&interview.interviewer)?;
    Some(InterviewDetails {
        student: interview.student.clone(),
        interviewer: interviewer.clone(),
    })
}

/// Count of the day's slots without an interview.
pub fn spots_for_day(day: &Day, appointments: &BTreeMap<AppointmentId, Appointment>) -> usize {
    day.appointments
        .iter()
        .filter_map(|id| appointments.get(id))
        .filter(|appointment| appointment.is_empty())
        .count()
}

/// Rebuilds every day with its spot count recomputed from `appointments`.
pub fn update_spots(days: &[Day], appointments: &BTreeMap<AppointmentId, Appointment>) -> Vec<Day> {
    days.iter()
        .map(|day| Day {
            spots: spots_for_day(day, appointments),
            ..day.clone()
        })
        .collect()
}

pub fn format_spots(spots: usize) -> String {
    match spots {
        0 => "no spots remaining".to_string(),
        1 => "1 spot remaining".to_string(),
        n => format!("{} spots remaining", n),
    }
}
