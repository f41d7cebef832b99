//! [`SyncEntity`] implementation for [`User`].
//!
//! The backend enforces the same rules on every write: a username and an email that at
//! least contains an `@`. The page's form is stricter, but the backend has the final say.

use super::UserError;
use crate::model::{User, UserCreate, UserId, UserUpdate};
use async_trait::async_trait;
use resource_sync::SyncEntity;

impl User {
    /// Checks the rules a stored user must satisfy.
    pub fn validate(&self) -> Result<(), UserError> {
        if self.username.trim().is_empty() {
            return Err(UserError::EmptyUsername);
        }
        if self.email.trim().is_empty() {
            return Err(UserError::EmptyEmail);
        }
        if !self.email.contains('@') {
            return Err(UserError::InvalidEmail);
        }
        Ok(())
    }
}

#[async_trait]
impl SyncEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Context = ();
    type Error = UserError;

    fn id(&self) -> Option<UserId> {
        self.id
    }

    fn from_create(id: UserId, params: UserCreate) -> Result<Self, UserError> {
        let user = Self {
            id: Some(id),
            username: params.username,
            email: params.email,
        };
        user.validate()?;
        Ok(user)
    }

    /// Applies the fields that are present, then re-checks the whole record.
    async fn on_update(&mut self, update: UserUpdate, _ctx: &()) -> Result<(), UserError> {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(username: &str, email: &str) -> UserCreate {
        UserCreate {
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn create_assigns_the_id() {
        let user = User::from_create(UserId(3), create("alice", "alice@example.com")).unwrap();
        assert_eq!(user, User::new("alice", "alice@example.com").with_id(3));
    }

    #[test]
    fn create_rejects_incomplete_users() {
        assert_eq!(
            User::from_create(UserId(1), create("  ", "a@b.c")),
            Err(UserError::EmptyUsername)
        );
        assert_eq!(
            User::from_create(UserId(1), create("alice", "")),
            Err(UserError::EmptyEmail)
        );
        assert_eq!(
            User::from_create(UserId(1), create("alice", "alice.example.com")),
            Err(UserError::InvalidEmail)
        );
    }

    #[tokio::test]
    async fn update_only_touches_present_fields() {
        let mut user = User::new("alice", "alice@example.com").with_id(1);
        let update = UserUpdate {
            email: Some("alice@gym.example".to_string()),
            ..Default::default()
        };
        user.on_update(update, &()).await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@gym.example");

        let bad = UserUpdate {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert_eq!(user.on_update(bad, &()).await, Err(UserError::InvalidEmail));
    }
}
