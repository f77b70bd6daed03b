//! Error types for the scheduler.

use thiserror::Error;

use crate::handlers::visual_mode::Mode;
use crate::models::AppointmentId;

/// Local, recoverable form validation failures. The Display strings are shown inline
/// under the student name input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Student name cannot be blank")]
    BlankName,

    #[error("Please select an interviewer")]
    MissingInterviewer,
}

/// Failures from the scheduler API. Rejection alone signals failure; no payload is read.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Scheduler API rejected the request with status {status}")]
    Rejected { status: u16 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Appointment not found: {0}")]
    UnknownAppointment(AppointmentId),

    #[error("Day not found: {0}")]
    UnknownDay(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config line {line}: {content}")]
    InvalidLine { line: usize, content: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// A UI interaction aimed at an affordance the slot is not currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InteractionError {
    #[error("Appointment not found: {0}")]
    UnknownAppointment(AppointmentId),

    #[error("Appointment {id} has no {action} action while in {mode:?}")]
    Unavailable {
        id: AppointmentId,
        action: &'static str,
        mode: Mode,
    },

    #[error("Interviewer not offered: {0}")]
    UnknownInterviewer(String),

    #[error("Day not found: {0}")]
    UnknownDay(String),
}
