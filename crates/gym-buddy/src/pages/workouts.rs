//! # Workouts Page
//!
//! Lists workouts with their owner's name, logs new workouts for a selected user and
//! deletes them after a confirmation. The page loads the user list alongside the
//! workouts, for the owner select and the name lookup.

use super::DELETE_CONFIRM;
use crate::model::{User, UserId, Workout, WorkoutCreate, WorkoutUpdate};
use crate::view::{self, ListText};
use resource_sync::{
    Confirm, Form, FormEntity, FormModel, FormSchema, ListSignals, ListView, LoadError,
    MutationCoordinator, MutationError, Resource, ResourceOptions, Submit, Transport,
};
use std::rc::Rc;
use std::time::Duration;

pub const WORKOUTS_LOADING: &str = "Loading workouts...";
pub const WORKOUTS_FAILED: &str = "Could not load workouts. Please try again.";
pub const WORKOUTS_EMPTY: &str = "No workouts yet. Create one to get started!";
pub const UNKNOWN_USER: &str = "Unknown User";
pub const SELECT_USER: &str = "Select User";

const TEXT: ListText = ListText {
    loading: WORKOUTS_LOADING,
    failed: WORKOUTS_FAILED,
    empty: WORKOUTS_EMPTY,
};

fn optional_text(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn optional_minutes(value: &str) -> Result<Option<u32>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| format!("Duration must be a whole number of minutes, got {value:?}"))
}

impl FormEntity for Workout {
    fn schema() -> FormSchema {
        FormSchema::new()
            .field("userId", "")
            .field("name", "")
            .field("description", "")
            .field("durationMinutes", "0")
            .required("userId", "Select a user.")
            .required("name", "Workout name is required.")
            .integer("durationMinutes", "Duration must be a whole number.")
    }

    fn create_params(model: &FormModel) -> Result<WorkoutCreate, String> {
        let user_id = model
            .value("userId")
            .trim()
            .parse()
            .map(UserId)
            .map_err(|_| "Select a user.".to_string())?;
        Ok(WorkoutCreate {
            user_id,
            name: model.value("name").to_string(),
            description: optional_text(model.value("description")),
            duration_minutes: optional_minutes(model.value("durationMinutes"))?,
        })
    }

    fn update_params(model: &FormModel) -> Result<WorkoutUpdate, String> {
        Ok(WorkoutUpdate {
            name: Some(model.value("name").to_string()),
            description: optional_text(model.value("description")),
            duration_minutes: optional_minutes(model.value("durationMinutes"))?,
        })
    }

    fn form_values(&self) -> Vec<(&'static str, String)> {
        vec![
            ("userId", self.user_id.to_string()),
            ("name", self.name.clone()),
            ("description", self.description.clone().unwrap_or_default()),
            (
                "durationMinutes",
                self.duration_minutes.unwrap_or(0).to_string(),
            ),
        ]
    }
}

/// Controller for the Workouts page.
pub struct WorkoutsPage {
    users: Resource<Vec<User>>,
    workouts: Resource<Vec<Workout>>,
    signals: ListSignals<Vec<Workout>>,
    mutations: MutationCoordinator<Workout>,
}

impl WorkoutsPage {
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
            ResourceOptions::named("workout-owners").with_timeout(timeout),
        );
        users.bind(user_transport);

        let workouts = Resource::with_options(
            Vec::new(),
            ResourceOptions::named("workouts").with_timeout(timeout),
        );
        workouts.bind(Rc::clone(&workout_transport));

        let signals = ListSignals::new(&workouts);
        let mutations = MutationCoordinator::new(workout_transport, workouts.clone())
            .with_confirm_message(DELETE_CONFIRM);
        Self {
            users,
            workouts,
            signals,
            mutations,
        }
    }

    pub fn with_confirm(mut self, confirm: Rc<dyn Confirm>) -> Self {
        self.mutations = self.mutations.with_confirm(confirm);
        self
    }

    pub fn with_error_handler(mut self, handler: impl Fn(&MutationError) + 'static) -> Self {
        self.mutations = self.mutations.with_error_handler(handler);
        self
    }

    /// The page was opened: load the users and the workouts.
    pub fn enter(&self) {
        drop(self.users.reload());
        drop(self.workouts.reload());
    }

    /// Wait until both lists have finished loading.
    pub async fn settled(&self) {
        self.users.settled().await;
        self.workouts.settled().await;
    }

    pub fn show_form(&self) {
        self.mutations.open_form();
    }

    pub fn cancel_form(&self) {
        self.mutations.cancel_form();
    }

    pub fn create_workout(&self) -> Submit {
        self.mutations.submit_create()
    }

    pub fn edit_workout(&self, workout: &Workout) {
        self.mutations.open_edit(workout);
    }

    pub fn update_workout(&self) -> Submit {
        self.mutations.submit_update()
    }

    pub fn delete_workout(&self, workout: &Workout) -> Submit {
        match workout.id {
            Some(id) => self.mutations.delete(id),
            None => Submit::NoTarget,
        }
    }

    /// The owner's username, or "Unknown User" when the user list does not have them.
    pub fn user_name(&self, user_id: UserId) -> String {
        self.users
            .state()
            .with(|state| {
                state
                    .value
                    .iter()
                    .find(|user| user.id == Some(user_id))
                    .map(|user| user.username.clone())
            })
            .unwrap_or_else(|| UNKNOWN_USER.to_string())
    }

    /// `(value, label)` pairs for the owner select, starting with the empty choice.
    pub fn user_options(&self) -> Vec<(String, String)> {
        let mut options = vec![(String::new(), SELECT_USER.to_string())];
        options.extend(self.users.value().into_iter().filter_map(|user| {
            user.id.map(|id| (id.to_string(), user.username))
        }));
        options
    }

    pub fn workouts(&self) -> Vec<Workout> {
        self.signals.items.get()
    }

    pub fn users(&self) -> Vec<User> {
        self.users.value()
    }

    pub fn is_loading(&self) -> bool {
        self.signals.is_loading.get()
    }

    pub fn load_error(&self) -> Option<LoadError> {
        self.workouts.error()
    }

    pub fn has_workouts(&self) -> bool {
        self.signals.has_items.get()
    }

    pub fn can_submit(&self) -> bool {
        self.mutations.can_submit()
    }

    pub fn is_form_open(&self) -> bool {
        self.mutations.is_open()
    }

    pub fn form(&self) -> &Form {
        self.mutations.form()
    }

    pub fn view(&self) -> ListView<Vec<Workout>> {
        self.signals.view.get()
    }

    pub fn resource(&self) -> &Resource<Vec<Workout>> {
        &self.workouts
    }

    pub fn user_resource(&self) -> &Resource<Vec<User>> {
        &self.users
    }

    pub fn mutations(&self) -> &MutationCoordinator<Workout> {
        &self.mutations
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines = vec!["Workouts".to_string()];
        if self.is_form_open() {
            let title = if self.mutations.editing().is_some() {
                "Edit Workout"
            } else {
                "Create New Workout"
            };
            lines.extend(view::render_form(title, self.form()));
        }
        lines.extend(view::render_list(&self.view(), &TEXT, |workout: &Workout| {
            let mut row = vec![workout.name.clone()];
            if let Some(description) = &workout.description {
                row.push(format!("  {description}"));
            }
            row.push(format!(
                "  User: {} | Duration: {} min | Exercises: {}",
                self.user_name(workout.user_id),
                workout.duration_minutes.unwrap_or(0),
                workout.exercise_count.unwrap_or(0),
            ));
            row
        }));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_defaults_to_zero_and_must_be_a_number() {
        let form = Form::new(Workout::schema());
        assert_eq!(form.value("durationMinutes"), "0");

        form.set_value("userId", "1");
        form.set_value("name", "Push day");
        form.set_value("durationMinutes", "abc");
        assert_eq!(
            form.errors("durationMinutes")[0].message,
            "Duration must be a whole number."
        );
        // Only required fields gate the submission; the payload conversion catches the rest.
        assert!(form.can_submit());
        assert!(Workout::create_params(&form.snapshot()).is_err());
    }

    #[test]
    fn create_payload_from_the_form() {
        let form = Form::new(Workout::schema());
        form.set_value("userId", "3");
        form.set_value("name", "Push day");

        let params = Workout::create_params(&form.snapshot()).unwrap();
        assert_eq!(
            params,
            WorkoutCreate {
                user_id: UserId(3),
                name: "Push day".to_string(),
                description: None,
                duration_minutes: Some(0),
            }
        );
    }

    #[test]
    fn an_unselected_owner_blocks_the_form() {
        let form = Form::new(Workout::schema());
        form.set_value("name", "Push day");
        assert!(!form.can_submit());
    }
}
