use tracing::debug;

use crate::error::InteractionError;
use crate::events::queue::ScheduleEvent;
use crate::handlers::form::{Form, FormIntent, FormSeed};
use crate::handlers::view::Element;
use crate::handlers::visual_mode::{Mode, VisualMode};
use crate::models::{Appointment, AppointmentId, Interview, InterviewDetails, Interviewer};

pub const SAVE_ERROR: &str = "Could not save appointment.";
pub const DELETE_ERROR: &str = "Could not cancel appointment.";
pub const CONFIRM_MESSAGE: &str = "Are you sure?";

/// State machine for one appointment slot. The committed interview lives in the store;
/// the slot only tracks what is on screen and the in-progress form.
#[derive(Debug, Clone)]
pub struct AppointmentSlot {
    id: AppointmentId,
    visual: VisualMode,
    form: Option<Form>,
}

impl AppointmentSlot {
    pub fn new(appointment: &Appointment) -> Self {
        let initial = if appointment.is_empty() { Mode::Empty } else { Mode::Show };
        Self {
            id: appointment.id,
            visual: VisualMode::new(initial),
            form: None,
        }
    }

    pub fn id(&self) -> AppointmentId {
        self.id
    }

    pub fn mode(&self) -> Mode {
        self.visual.mode()
    }

    pub fn form(&self) -> Option<&Form> {
        self.form.as_ref()
    }

    fn expect_mode(&self, action: &'static str, allowed: &[Mode]) -> Result<(), InteractionError> {
        let mode = self.mode();
        if allowed.contains(&mode) {
            Ok(())
        } else {
            Err(InteractionError::Unavailable { id: self.id, action, mode })
        }
    }

    fn transition(&mut self, mode: Mode, replace: bool) {
        debug!(appointment_id = self.id, from = ?self.mode(), to = ?mode, "Slot transition");
        self.visual.transition(mode, replace);
    }

    fn form_mut(&mut self, action: &'static str) -> Result<&mut Form, InteractionError> {
        self.expect_mode(action, &[Mode::Create, Mode::Edit])?;
        let mode = self.mode();
        self.form
            .as_mut()
            .ok_or(InteractionError::Unavailable { id: self.id, action, mode })
    }

    pub fn add(&mut self, interviewers: Vec<Interviewer>) -> Result<(), InteractionError> {
        self.expect_mode("add", &[Mode::Empty])?;
        self.form = Some(Form::new(interviewers, FormSeed::default(), true));
        self.transition(Mode::Create, false);
        Ok(())
    }

    pub fn edit(
        &mut self,
        interview: &Interview,
        interviewers: Vec<Interviewer>,
    ) -> Result<(), InteractionError> {
        self.expect_mode("edit", &[Mode::Show])?;
        let seed = FormSeed {
            name: Some(interview.student.clone()),
            interviewer: Some(interview.interviewer),
        };
        self.form = Some(Form::new(interviewers, seed, false));
        self.transition(Mode::Edit, false);
        Ok(())
    }

    pub fn delete(&mut self) -> Result<(), InteractionError> {
        self.expect_mode("delete", &[Mode::Show])?;
        self.transition(Mode::Confirm, false);
        Ok(())
    }

    pub fn cancel_confirm(&mut self) -> Result<(), InteractionError> {
        self.expect_mode("cancel", &[Mode::Confirm])?;
        self.visual.back();
        Ok(())
    }

    /// Confirm click: Deleting replaces Confirm so a later dismiss lands on Show.
    pub fn confirm(&mut self) -> Result<ScheduleEvent, InteractionError> {
        self.expect_mode("confirm", &[Mode::Confirm])?;
        self.transition(Mode::Deleting, true);
        Ok(ScheduleEvent::DeleteRequested {
            appointment_id: self.id,
        })
    }

    pub fn change_name(&mut self, value: &str) -> Result<(), InteractionError> {
        self.form_mut("change name")?.set_name(value);
        Ok(())
    }

    pub fn select_interviewer(&mut self, name: &str) -> Result<(), InteractionError> {
        if self.form_mut("select interviewer")?.click_interviewer(name) {
            Ok(())
        } else {
            Err(InteractionError::UnknownInterviewer(name.to_string()))
        }
    }

    pub fn cancel(&mut self) -> Result<(), InteractionError> {
        self.form_mut("cancel")?.cancel();
        self.form = None;
        self.visual.back();
        Ok(())
    }

    /// Save click. `Ok(None)` means validation failed and the form stays open.
    pub fn save(&mut self) -> Result<Option<ScheduleEvent>, InteractionError> {
        let Some(intent) = self.form_mut("save")?.validate() else {
            return Ok(None);
        };
        let FormIntent::Save { name, interviewer, is_new } = intent else {
            return Ok(None);
        };
        self.transition(Mode::Saving, false);
        Ok(Some(ScheduleEvent::SaveRequested {
            appointment_id: self.id,
            interview: Interview {
                student: name,
                interviewer,
            },
            is_new,
        }))
    }

    pub fn submit(&mut self) -> Result<(), InteractionError> {
        self.form_mut("submit")?.submit();
        Ok(())
    }

    pub fn settle_save(&mut self, saved: bool) {
        if self.mode() != Mode::Saving {
            return;
        }
        if saved {
            self.form = None;
            self.visual.reset(Mode::Show);
        } else {
            self.transition(Mode::ErrorSave, true);
        }
    }

    pub fn settle_delete(&mut self, deleted: bool) {
        if self.mode() != Mode::Deleting {
            return;
        }
        if deleted {
            self.visual.reset(Mode::Empty);
        } else {
            self.transition(Mode::ErrorDelete, true);
        }
    }

    /// Dismisses an error, returning to the form (save) or the booked view (delete).
    pub fn close_error(&mut self) -> Result<(), InteractionError> {
        let mode = self.mode();
        if !mode.is_error() {
            return Err(InteractionError::Unavailable {
                id: self.id,
                action: "close",
                mode,
            });
        }
        self.visual.back();
        Ok(())
    }

    /// Follows committed data changes made outside this slot's own flow.
    pub fn sync(&mut self, has_interview: bool) {
        match (self.mode(), has_interview) {
            (Mode::Empty, true) => self.visual.reset(Mode::Show),
            (Mode::Show, false) => self.visual.reset(Mode::Empty),
            _ => {}
        }
    }

    pub fn render(
        &self,
        appointment: &Appointment,
        interview: Option<&InterviewDetails>,
    ) -> Element {
        let mut children = vec![Element::text(appointment.time.clone())];
        let body = match (self.mode(), interview) {
            (Mode::Show, Some(details)) => Element::group(vec![
                Element::text(details.student.clone()),
                Element::text("Interviewer"),
                Element::text(details.interviewer.name.clone()),
                Element::image("images/edit.png", "Edit"),
                Element::image("images/trash.png", "Delete"),
            ]),
            // Interviewer id did not resolve; the booking itself can still be edited or deleted.
            (Mode::Show, None) => match &appointment.interview {
                Some(booked) => Element::group(vec![
                    Element::text(booked.student.clone()),
                    Element::image("images/edit.png", "Edit"),
                    Element::image("images/trash.png", "Delete"),
                ]),
                None => Element::group(Vec::new()),
            },
            (Mode::Empty, _) => Element::group(vec![Element::image("images/add.png", "Add")]),
            (Mode::Create | Mode::Edit, _) => match &self.form {
                Some(form) => form.render(),
                None => Element::group(Vec::new()),
            },
            (Mode::Saving, _) => status("Saving!"),
            (Mode::Deleting, _) => status("Deleting!"),
            (Mode::Confirm, _) => Element::group(vec![
                Element::text(CONFIRM_MESSAGE),
                Element::button("Cancel"),
                Element::button("Confirm"),
            ]),
            (Mode::ErrorSave, _) => error(SAVE_ERROR),
            (Mode::ErrorDelete, _) => error(DELETE_ERROR),
        };
        children.push(body);
        Element::tagged("appointment", self.id, children)
    }
}

fn status(message: &str) -> Element {
    Element::group(vec![
        Element::image("images/status.png", "Loading"),
        Element::text(message),
    ])
}

fn error(message: &str) -> Element {
    Element::group(vec![
        Element::text("Error"),
        Element::text(message),
        Element::image("images/close.png", "Close"),
    ])
}
