use tracing::debug;

use crate::error::ValidationError;
use crate::handlers::interviewer_list::InterviewerList;
use crate::handlers::view::Element;
use crate::models::{Interviewer, InterviewerId};

pub const NAME_PLACEHOLDER: &str = "Enter Student Name";

/// Optional seed values; present when editing an existing interview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSeed {
    pub name: Option<String>,
    pub interviewer: Option<InterviewerId>,
}

/// What the form asks its parent to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormIntent {
    Save {
        name: String,
        interviewer: InterviewerId,
        is_new: bool,
    },
    Cancel,
}

/// Transient edit state for a single slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    name: String,
    interviewer: Option<InterviewerId>,
    error: Option<ValidationError>,
    interviewers: Vec<Interviewer>,
    is_new: bool,
}

impl Form {
    pub fn new(interviewers: Vec<Interviewer>, seed: FormSeed, is_new: bool) -> Self {
        Self {
            name: seed.name.unwrap_or_default(),
            interviewer: seed.interviewer,
            error: None,
            interviewers,
            is_new,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interviewer(&self) -> Option<InterviewerId> {
        self.interviewer
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Does not touch the validation error; only a save attempt re-validates.
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    pub fn set_interviewer(&mut self, id: InterviewerId) {
        self.interviewer = Some(id);
    }

    /// Selects the interviewer whose avatar alt text is `name`. Returns false if not offered.
    pub fn click_interviewer(&mut self, name: &str) -> bool {
        let mut chosen = None;
        let list = InterviewerList::new(&self.interviewers, self.interviewer);
        let found = list.click(name, |id| chosen = Some(id));
        if let Some(id) = chosen {
            self.set_interviewer(id);
        }
        found
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.interviewer = None;
    }

    pub fn cancel(&mut self) -> FormIntent {
        self.reset();
        FormIntent::Cancel
    }

    /// Blank name is reported ahead of a missing interviewer.
    pub fn check(&self) -> Result<InterviewerId, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::BlankName);
        }
        self.interviewer.ok_or(ValidationError::MissingInterviewer)
    }

    /// Save action. On failure the error is recorded and nothing is emitted.
    pub fn validate(&mut self) -> Option<FormIntent> {
        match self.check() {
            Ok(interviewer) => {
                self.error = None;
                Some(FormIntent::Save {
                    name: self.name.clone(),
                    interviewer,
                    is_new: self.is_new,
                })
            }
            Err(err) => {
                debug!(error = %err, "Form validation failed");
                self.error = Some(err);
                None
            }
        }
    }

    /// Submitting the name input is swallowed: no save, no state change.
    pub fn submit(&self) -> Option<FormIntent> {
        None
    }

    pub fn render(&self) -> Element {
        let error = self.error.map(|err| err.to_string()).unwrap_or_default();
        Element::group(vec![
            Element::group(vec![
                Element::Input {
                    placeholder: NAME_PLACEHOLDER.to_string(),
                    value: self.name.clone(),
                },
                Element::text(error),
            ]),
            InterviewerList::new(&self.interviewers, self.interviewer).render(),
            Element::group(vec![Element::button("Cancel"), Element::button("Save")]),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interviewers() -> Vec<Interviewer> {
        vec![
            Interviewer {
                id: 1,
                name: "Sylvia Palmer".to_string(),
                avatar: "https://i.imgur.com/LpaY82x.png".to_string(),
            },
            Interviewer {
                id: 2,
                name: "Tori Malcolm".to_string(),
                avatar: "https://i.imgur.com/Nmx0Qxo.png".to_string(),
            },
        ]
    }

    fn blank_form() -> Form {
        Form::new(interviewers(), FormSeed::default(), true)
    }

    #[test]
    fn seeds_from_existing_interview() {
        let form = Form::new(
            interviewers(),
            FormSeed {
                name: Some("Archie Cohen".to_string()),
                interviewer: Some(2),
            },
            false,
        );
        assert_eq!(form.name(), "Archie Cohen");
        assert_eq!(form.interviewer(), Some(2));
        assert!(form.render().has_display_value("Archie Cohen"));
        assert!(form.render().has_text("Tori Malcolm"));
    }

    #[test]
    fn blank_name_wins_over_missing_interviewer() {
        let mut form = blank_form();
        assert_eq!(form.validate(), None);
        assert_eq!(form.error(), Some(ValidationError::BlankName));
        assert!(form.render().has_text("Student name cannot be blank"));
    }

    #[test]
    fn missing_interviewer_reported_once_name_is_set() {
        let mut form = blank_form();
        form.set_name("Lydia Miller-Jones");
        assert_eq!(form.validate(), None);
        assert_eq!(form.error(), Some(ValidationError::MissingInterviewer));
        assert!(form.render().has_text("Please select an interviewer"));
    }

    #[test]
    fn blank_name_with_interviewer_still_fails() {
        let mut form = blank_form();
        form.set_interviewer(1);
        assert_eq!(form.validate(), None);
        assert_eq!(form.error(), Some(ValidationError::BlankName));
    }

    #[test]
    fn editing_keeps_the_error_until_the_next_save() {
        let mut form = blank_form();
        form.validate();
        form.set_name("Lydia Miller-Jones");
        assert_eq!(form.error(), Some(ValidationError::BlankName));

        assert!(form.click_interviewer("Sylvia Palmer"));
        let intent = form.validate();
        assert_eq!(
            intent,
            Some(FormIntent::Save {
                name: "Lydia Miller-Jones".to_string(),
                interviewer: 1,
                is_new: true,
            })
        );
        assert_eq!(form.error(), None);
    }

    #[test]
    fn failed_validation_keeps_entries() {
        let mut form = blank_form();
        form.set_name("Lydia Miller-Jones");
        form.validate();
        assert_eq!(form.name(), "Lydia Miller-Jones");
    }

    #[test]
    fn save_passes_is_new_through() {
        let mut form = Form::new(
            interviewers(),
            FormSeed {
                name: Some("Archie Cohen".to_string()),
                interviewer: Some(2),
            },
            false,
        );
        form.set_name("Hosam Dahrooge");
        assert_eq!(
            form.validate(),
            Some(FormIntent::Save {
                name: "Hosam Dahrooge".to_string(),
                interviewer: 2,
                is_new: false,
            })
        );
    }

    #[test]
    fn cancel_resets_regardless_of_error() {
        let mut form = blank_form();
        form.set_name("Lydia Miller-Jones");
        form.validate();
        form.set_interviewer(2);
        assert_eq!(form.cancel(), FormIntent::Cancel);
        assert_eq!(form.name(), "");
        assert_eq!(form.interviewer(), None);
    }

    #[test]
    fn submit_is_suppressed() {
        let mut form = blank_form();
        form.set_name("Lydia Miller-Jones");
        form.set_interviewer(1);
        let before = form.clone();
        assert_eq!(form.submit(), None);
        assert_eq!(form, before);
    }

    #[test]
    fn unknown_interviewer_click_is_ignored() {
        let mut form = blank_form();
        assert!(!form.click_interviewer("Mildred Nazir"));
        assert_eq!(form.interviewer(), None);
    }
}
