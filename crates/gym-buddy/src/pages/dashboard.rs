//! # Dashboard Page
//!
//! Three totals derived from the user and workout lists. A list that failed to load
//! counts as empty.

use crate::model::{User, Workout};
use resource_sync::{Computed, Resource, ResourceOptions, Transport};
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_workouts: usize,
    pub total_exercises: u32,
}

/// Controller for the Dashboard page.
pub struct DashboardPage {
    users: Resource<Vec<User>>,
    workouts: Resource<Vec<Workout>>,
    stats: Computed<DashboardStats>,
}

impl DashboardPage {
    pub fn new(users: Rc<dyn Transport<User>>, workouts: Rc<dyn Transport<Workout>>) -> Self {
        Self::with_timeout(users, workouts, None)
    }

    pub fn with_timeout(
        user_transport: Rc<dyn Transport<User>>,
        workout_transport: Rc<dyn Transport<Workout>>,
        timeout: Option<Duration>,
    ) -> Self {
        let users = Resource::with_options(
            Vec::new(),
            ResourceOptions::named("dashboard-users").with_timeout(timeout),
        );
        users.bind(user_transport);
        let workouts = Resource::with_options(
            Vec::new(),
            ResourceOptions::named("dashboard-workouts").with_timeout(timeout),
        );
        workouts.bind(workout_transport);

        let stats = Computed::from2(users.state(), workouts.state(), |users, workouts| {
            DashboardStats {
                total_users: users.value.len(),
                total_workouts: workouts.value.len(),
                total_exercises: workouts
                    .value
                    .iter()
                    .map(|w| w.exercise_count.unwrap_or(0))
                    .sum(),
            }
        });
        Self {
            users,
            workouts,
            stats,
        }
    }

    pub fn enter(&self) {
        drop(self.users.reload());
        drop(self.workouts.reload());
    }

    pub async fn settled(&self) {
        self.users.settled().await;
        self.workouts.settled().await;
    }

    pub fn stats(&self) -> DashboardStats {
        self.stats.get()
    }

    pub fn render(&self) -> Vec<String> {
        let stats = self.stats();
        vec![
            "Gym Buddy".to_string(),
            format!("Total Users: {}", stats.total_users),
            format!("Workouts Logged: {}", stats.total_workouts),
            format!("Exercises Completed: {}", stats.total_exercises),
        ]
    }
}
