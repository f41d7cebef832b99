//! # Users Page
//!
//! Lists users, creates them through a validated form and deletes them after a
//! confirmation.

use super::DELETE_CONFIRM;
use crate::model::{User, UserCreate, UserUpdate};
use crate::view::{self, ListText};
use resource_sync::{
    Confirm, Form, FormEntity, FormModel, FormSchema, ListSignals, ListView, LoadError,
    MutationCoordinator, MutationError, Resource, ResourceOptions, Submit, Transport,
};
use std::rc::Rc;
use std::time::Duration;

pub const USERS_LOADING: &str = "Loading users...";
pub const USERS_FAILED: &str = "Could not load users. Please try again.";
pub const USERS_EMPTY: &str = "No users yet. Create one to get started!";

const TEXT: ListText = ListText {
    loading: USERS_LOADING,
    failed: USERS_FAILED,
    empty: USERS_EMPTY,
};

impl FormEntity for User {
    fn schema() -> FormSchema {
        FormSchema::new()
            .field("username", "")
            .field("email", "")
            .required("username", "Username is required.")
            .required("email", "Email is required.")
            .email("email", "Enter a valid email address.")
    }

    fn create_params(model: &FormModel) -> Result<UserCreate, String> {
        Ok(UserCreate {
            username: model.value("username").to_string(),
            email: model.value("email").to_string(),
        })
    }

    fn update_params(model: &FormModel) -> Result<UserUpdate, String> {
        Ok(UserUpdate {
            username: Some(model.value("username").to_string()),
            email: Some(model.value("email").to_string()),
        })
    }

    fn form_values(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.clone()),
            ("email", self.email.clone()),
        ]
    }
}

/// Controller for the Users page.
pub struct UsersPage {
    users: Resource<Vec<User>>,
    signals: ListSignals<Vec<User>>,
    mutations: MutationCoordinator<User>,
}

impl UsersPage {
    pub fn new(transport: Rc<dyn Transport<User>>) -> Self {
        Self::with_timeout(transport, None)
    }

    /// A page whose list loads give up after `timeout`.
    pub fn with_timeout(transport: Rc<dyn Transport<User>>, timeout: Option<Duration>) -> Self {
        let users = Resource::with_options(
            Vec::new(),
            ResourceOptions::named("users").with_timeout(timeout),
        );
        users.bind(Rc::clone(&transport));
        let signals = ListSignals::new(&users);
        let mutations =
            MutationCoordinator::new(transport, users.clone()).with_confirm_message(DELETE_CONFIRM);
        Self {
            users,
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

    /// The page was opened: load the list.
    pub fn enter(&self) {
        drop(self.users.reload());
    }

    /// Wait until the list has finished loading.
    pub async fn settled(&self) {
        self.users.settled().await;
    }

    pub fn show_form(&self) {
        self.mutations.open_form();
    }

    pub fn cancel_form(&self) {
        self.mutations.cancel_form();
    }

    pub fn create_user(&self) -> Submit {
        self.mutations.submit_create()
    }

    /// Open the form pre-filled with `user`.
    pub fn edit_user(&self, user: &User) {
        self.mutations.open_edit(user);
    }

    pub fn update_user(&self) -> Submit {
        self.mutations.submit_update()
    }

    /// A user that was never stored has nothing to delete.
    pub fn delete_user(&self, user: &User) -> Submit {
        match user.id {
            Some(id) => self.mutations.delete(id),
            None => Submit::NoTarget,
        }
    }

    pub fn users(&self) -> Vec<User> {
        self.signals.items.get()
    }

    pub fn is_loading(&self) -> bool {
        self.signals.is_loading.get()
    }

    pub fn load_error(&self) -> Option<LoadError> {
        self.users.error()
    }

    pub fn has_users(&self) -> bool {
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

    pub fn view(&self) -> ListView<Vec<User>> {
        self.signals.view.get()
    }

    pub fn resource(&self) -> &Resource<Vec<User>> {
        &self.users
    }

    pub fn mutations(&self) -> &MutationCoordinator<User> {
        &self.mutations
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines = vec!["Users".to_string()];
        if self.is_form_open() {
            let title = if self.mutations.editing().is_some() {
                "Edit User"
            } else {
                "Create New User"
            };
            lines.extend(view::render_form(title, self.form()));
        }
        lines.extend(view::render_list(&self.view(), &TEXT, |user: &User| {
            vec![format!("{} <{}>", user.username, user.email)]
        }));
        lines
    }
}
