//! # Gym Buddy demo
//!
//! Drives the pages against the in-memory backends and prints what they render:
//!
//! 1. Starting the [`GymSystem`].
//! 2. Creating a user through the Users page form (after one refused, empty submit).
//! 3. Logging a workout for that user, and one for a user that does not exist.
//! 4. Showing the dashboard totals, then deleting the workout.
//!
//! Settings come from `GYM_BUDDY_*` variables, see [`AppConfig`]; log levels from
//! `RUST_LOG`.

use gym_buddy::config::AppConfig;
use gym_buddy::lifecycle::tracing::setup_tracing;
use gym_buddy::lifecycle::GymSystem;
use gym_buddy::pages::{DashboardPage, UsersPage, WorkoutsPage};
use resource_sync::{Confirm, Outcome, Submit};
use std::rc::Rc;
use tokio::task::LocalSet;
use tracing::{error, info, info_span, Instrument};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting Gym Buddy");

    let system = GymSystem::new(&config);

    // Pages are single-threaded; they live and die inside the local set.
    LocalSet::new().run_until(run_pages(&system, &config)).await?;

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

async fn run_pages(system: &GymSystem, config: &AppConfig) -> Result<(), String> {
    let answer = config.auto_confirm;
    let confirm: Rc<dyn Confirm> = Rc::new(move |prompt: &str| {
        info!(prompt, answer, "Confirmation requested");
        answer
    });

    let users = UsersPage::with_timeout(system.user_transport(), config.load_timeout)
        .with_confirm(Rc::clone(&confirm));
    users.enter();
    users.settled().await;
    print(&users.render());

    let span = info_span!("user_creation");
    async {
        users.show_form();
        let refused = users.create_user();
        info!(?refused, "Empty form submitted");
        print(&users.render());

        users.form().set_value("username", "alice");
        users.form().set_value("email", "alice@example.com");
        settle("create user", users.create_user()).await?;
        users.settled().await;
        print(&users.render());
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let alice = users
        .users()
        .into_iter()
        .find(|u| u.username == "alice")
        .and_then(|u| u.id)
        .ok_or("alice is missing from the user list")?;

    let workouts = WorkoutsPage::with_timeout(
        system.user_transport(),
        system.workout_transport(),
        config.load_timeout,
    )
    .with_confirm(Rc::clone(&confirm));
    workouts.enter();
    workouts.settled().await;

    let span = info_span!("workout_logging");
    async {
        workouts.show_form();
        workouts.form().set_value("userId", alice.to_string());
        workouts.form().set_value("name", "Leg day");
        workouts.form().set_value("description", "Squats and lunges");
        workouts.form().set_value("durationMinutes", "45");
        settle("create workout", workouts.create_workout()).await?;
        workouts.settled().await;

        // The backend refuses workouts for unknown users; the form keeps its input.
        workouts.show_form();
        workouts.form().set_value("userId", "99");
        workouts.form().set_value("name", "Ghost run");
        if let Err(e) = settle("create workout", workouts.create_workout()).await {
            error!(error = %e, "Workout rejected");
        }
        workouts.cancel_form();
        print(&workouts.render());
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let dashboard = DashboardPage::with_timeout(
        system.user_transport(),
        system.workout_transport(),
        config.load_timeout,
    );
    dashboard.enter();
    dashboard.settled().await;
    print(&dashboard.render());

    if let Some(workout) = workouts.workouts().first() {
        match workouts.delete_workout(workout) {
            Submit::Declined => info!("Delete declined"),
            submit => {
                settle("delete workout", submit).await?;
                workouts.settled().await;
            }
        }
        print(&workouts.render());
    }

    Ok(())
}

/// Waits for a mutation and turns anything but success into an error message.
async fn settle(what: &str, submit: Submit) -> Result<(), String> {
    match submit.outcome().await {
        Some(Outcome::Succeeded) => {
            info!(what, "Mutation completed");
            Ok(())
        }
        Some(Outcome::Failed(e)) => Err(format!("{what} failed: {e}")),
        None => Err(format!("{what}: nothing was sent")),
    }
}

fn print(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
    println!();
}
