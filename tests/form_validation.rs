use interviewScheduler::error::ValidationError;
use interviewScheduler::handlers::form::{Form, FormIntent, FormSeed};
use interviewScheduler::models::{Interviewer, Schedule, FIXTURE_JSON};

fn interviewers() -> Vec<Interviewer> {
    Schedule::from_json(FIXTURE_JSON)
        .unwrap()
        .interviewers
        .into_values()
        .collect()
}

/// New and edit forms, with and without seeded values.
fn forms() -> Vec<Form> {
    let seeds = [
        FormSeed::default(),
        FormSeed {
            name: Some("Archie Cohen".to_string()),
            interviewer: None,
        },
        FormSeed {
            name: None,
            interviewer: Some(2),
        },
        FormSeed {
            name: Some("Archie Cohen".to_string()),
            interviewer: Some(2),
        },
    ];
    seeds
        .iter()
        .flat_map(|seed| {
            [true, false]
                .into_iter()
                .map(|is_new| Form::new(interviewers(), seed.clone(), is_new))
        })
        .collect()
}

#[test]
fn blank_name_is_reported_before_missing_interviewer() {
    for mut form in forms() {
        form.set_name("");
        let mut blank = Form::new(interviewers(), FormSeed::default(), form.is_new());

        assert_eq!(blank.validate(), None);
        assert_eq!(blank.error(), Some(ValidationError::BlankName));
        assert_eq!(
            blank.error().unwrap().to_string(),
            "Student name cannot be blank"
        );

        // A name-less form with an interviewer still reports the name.
        assert_eq!(form.validate(), None);
        assert_eq!(form.error(), Some(ValidationError::BlankName));
    }
}

#[test]
fn missing_interviewer_is_reported_once_a_name_is_entered() {
    for form in forms() {
        let mut form = Form::new(
            interviewers(),
            FormSeed {
                name: Some(form.name().to_string()).filter(|name| !name.is_empty()),
                interviewer: None,
            },
            form.is_new(),
        );
        form.set_name("Lydia Miller-Jones");

        assert_eq!(form.validate(), None);
        assert_eq!(form.error(), Some(ValidationError::MissingInterviewer));
        assert_eq!(
            form.error().unwrap().to_string(),
            "Please select an interviewer"
        );
    }
}

#[test]
fn valid_form_emits_one_save_and_clears_the_error() {
    for mut form in forms() {
        let is_new = form.is_new();
        form.set_name("");
        form.validate();
        assert!(form.error().is_some());

        form.set_name("Lydia Miller-Jones");
        assert!(form.click_interviewer("Sylvia Palmer"));

        let intents: Vec<FormIntent> = form.validate().into_iter().collect();
        assert_eq!(
            intents,
            vec![FormIntent::Save {
                name: "Lydia Miller-Jones".to_string(),
                interviewer: 1,
                is_new,
            }]
        );
        assert_eq!(form.error(), None);
    }
}

#[test]
fn cancel_always_resets_and_emits_cancel() {
    for mut form in forms() {
        form.validate();

        assert_eq!(form.cancel(), FormIntent::Cancel);
        assert_eq!(form.name(), "");
        assert_eq!(form.interviewer(), None);
    }
}

#[test]
fn submitting_the_name_input_does_nothing() {
    let mut form = Form::new(interviewers(), FormSeed::default(), true);
    form.set_name("Lydia Miller-Jones");
    let before = form.clone();

    assert_eq!(form.submit(), None);
    assert_eq!(form, before);
}
