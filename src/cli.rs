use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Weekday;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Select, Text};

use crate::clients::SchedulerApi;
use crate::handlers::application::Application;
use crate::handlers::appointment::{CONFIRM_MESSAGE, DELETE_ERROR, SAVE_ERROR};
use crate::handlers::form::NAME_PLACEHOLDER;
use crate::handlers::visual_mode::Mode;
use crate::models::AppointmentId;
use crate::service::selectors::{appointments_for_day, format_spots, interviewers_for_day};

#[derive(Parser)]
#[command(name = "interview-scheduler", about = "Book, edit and cancel interviews")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List days with their remaining spots
    Days,
    /// Show the appointments of a day (Monday by default)
    Show {
        #[arg(long)]
        day: Option<Weekday>,
    },
    /// Book an empty appointment
    Book {
        appointment: AppointmentId,
        #[arg(long)]
        student: String,
        #[arg(long)]
        interviewer: String,
    },
    /// Change the student or interviewer of a booked appointment
    Edit {
        appointment: AppointmentId,
        #[arg(long)]
        student: Option<String>,
        #[arg(long)]
        interviewer: Option<String>,
    },
    /// Cancel a booked appointment
    Cancel {
        appointment: AppointmentId,
        #[arg(long)]
        yes: bool,
    },
    /// Prompt-driven booking session
    Interactive,
}

pub async fn cli(api: Arc<dyn SchedulerApi>) -> Result<()> {
    // Fine to exit here on bad arguments
    let cli = Cli::parse();
    let (app, worker) = Application::load(api.clone())
        .await
        .context("Failed to load schedule")?;

    let result = match cli.command {
        Commands::Days => {
            print_days(&app);
            Ok(())
        }
        Commands::Show { day } => show_day(&app, day),
        Commands::Book {
            appointment,
            student,
            interviewer,
        } => book(&app, appointment, &student, &interviewer).await,
        Commands::Edit {
            appointment,
            student,
            interviewer,
        } => edit(&app, appointment, student.as_deref(), interviewer.as_deref()).await,
        Commands::Cancel { appointment, yes } => cancel(&app, appointment, yes).await,
        Commands::Interactive => interactive(&app, api.as_ref()).await,
    };

    drop(app);
    let _ = worker.await;
    result
}

fn print_days(app: &Application) {
    app.with_store(|store| {
        for day in store.days() {
            println!("{}: {}", day.name, format_spots(day.spots));
        }
    });
}

fn show_day(app: &Application, day: Option<Weekday>) -> Result<()> {
    if let Some(weekday) = day {
        let name = app
            .with_store(|store| store.day_for_weekday(weekday).map(|day| day.name.clone()))
            .ok_or_else(|| anyhow!("No schedule for {}", weekday))?;
        app.select_day(&name)?;
    }
    print!("{}", app.render());
    Ok(())
}

async fn save_and_wait(app: &Application, id: AppointmentId) -> Result<()> {
    if !app.save(id)? {
        let message = app
            .validation_error(id)
            .map(|err| err.to_string())
            .unwrap_or_else(|| "Invalid form".to_string());
        app.cancel(id)?;
        bail!(message);
    }
    println!("Saving!");
    match app.settled(id).await {
        Some(Mode::Show) => Ok(()),
        _ => {
            // Dismiss the error and drop the form so the slot is usable again.
            app.close_error(id)?;
            app.cancel(id)?;
            bail!(SAVE_ERROR)
        }
    }
}

async fn book(
    app: &Application,
    id: AppointmentId,
    student: &str,
    interviewer: &str,
) -> Result<()> {
    app.add(id)?;
    app.change_name(id, student)?;
    app.select_interviewer(id, interviewer)?;
    save_and_wait(app, id).await?;
    println!("Booked {} at appointment {}", student, id);
    Ok(())
}

async fn edit(
    app: &Application,
    id: AppointmentId,
    student: Option<&str>,
    interviewer: Option<&str>,
) -> Result<()> {
    app.edit(id)?;
    if let Some(student) = student {
        app.change_name(id, student)?;
    }
    if let Some(interviewer) = interviewer {
        app.select_interviewer(id, interviewer)?;
    }
    save_and_wait(app, id).await?;
    println!("Updated appointment {}", id);
    Ok(())
}

async fn cancel(app: &Application, id: AppointmentId, yes: bool) -> Result<()> {
    app.delete(id)?;
    let confirmed = yes || Confirm::new(CONFIRM_MESSAGE).with_default(false).prompt()?;
    if !confirmed {
        app.cancel_confirm(id)?;
        println!("Kept appointment {}", id);
        return Ok(());
    }
    app.confirm(id)?;
    println!("Deleting!");
    match app.settled(id).await {
        Some(Mode::Empty) => {
            println!("Cancelled appointment {}", id);
            Ok(())
        }
        _ => {
            app.close_error(id)?;
            bail!(DELETE_ERROR)
        }
    }
}

async fn interactive(app: &Application, api: &dyn SchedulerApi) -> Result<()> {
    const ACTIONS: [&str; 6] = ["Select day", "Book", "Edit", "Delete", "Refresh", "Quit"];
    loop {
        println!();
        print!("{}", app.render());
        let action = Select::new("What next?", ACTIONS.to_vec()).prompt()?;
        let outcome = match action {
            "Select day" => prompt_day(app),
            "Book" => prompt_book(app).await,
            "Edit" => prompt_edit(app).await,
            "Delete" => prompt_delete(app).await,
            "Refresh" => app.reload(api).await.context("Failed to refresh schedule"),
            _ => return Ok(()),
        };
        if let Err(err) = outcome {
            println!("Error: {}", err);
        }
    }
}

fn prompt_day(app: &Application) -> Result<()> {
    let names: Vec<String> =
        app.with_store(|store| store.days().iter().map(|day| day.name.clone()).collect());
    let name = Select::new("Day", names).prompt()?;
    app.select_day(&name)?;
    Ok(())
}

/// Lets the user pick one of the selected day's appointments matching `booked`.
fn prompt_appointment(app: &Application, booked: bool) -> Result<AppointmentId> {
    let day = app.day();
    let choices: Vec<(AppointmentId, String)> = app.with_store(|store| {
        appointments_for_day(store, &day)
            .into_iter()
            .filter(|appointment| appointment.is_empty() != booked)
            .map(|appointment| {
                let label = match &appointment.interview {
                    Some(interview) => format!("{} ({})", appointment.time, interview.student),
                    None => format!("{} (empty)", appointment.time),
                };
                (appointment.id, label)
            })
            .collect()
    });
    if choices.is_empty() {
        bail!("No matching appointments on {}", day);
    }
    let labels: Vec<String> = choices.iter().map(|(_, label)| label.clone()).collect();
    let picked = Select::new("Appointment", labels).raw_prompt()?;
    Ok(choices[picked.index].0)
}

fn prompt_form(app: &Application, id: AppointmentId) -> Result<()> {
    let current = app.form_values(id).unwrap_or_default();
    let name = Text::new(NAME_PLACEHOLDER).with_initial_value(&current.0).prompt()?;
    app.change_name(id, &name)?;
    let day = app.day();
    let names: Vec<String> = app.with_store(|store| {
        interviewers_for_day(store, &day)
            .into_iter()
            .map(|interviewer| interviewer.name)
            .collect()
    });
    let interviewer = Select::new("Interviewer", names).prompt()?;
    app.select_interviewer(id, &interviewer)?;
    Ok(())
}

async fn prompt_book(app: &Application) -> Result<()> {
    let id = prompt_appointment(app, false)?;
    app.add(id)?;
    if let Err(err) = prompt_form(app, id) {
        app.cancel(id)?;
        return Err(err);
    }
    save_and_wait(app, id).await
}

async fn prompt_edit(app: &Application) -> Result<()> {
    let id = prompt_appointment(app, true)?;
    app.edit(id)?;
    if let Err(err) = prompt_form(app, id) {
        app.cancel(id)?;
        return Err(err);
    }
    save_and_wait(app, id).await
}

async fn prompt_delete(app: &Application) -> Result<()> {
    let id = prompt_appointment(app, true)?;
    cancel(app, id, false).await
}
