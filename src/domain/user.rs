use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Domain representation of a console user account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique identifier of the user.
    pub id: i32,
    /// Unique lowercased email address.
    pub email: String,
    /// Unique login name.
    pub username: String,
    /// Argon2 hash of the user's password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Optional display name.
    pub full_name: Option<String>,
    /// Inactive users cannot log in or authenticate.
    pub is_active: bool,
    /// Superusers may manage accounts and mutate attribute hierarchies.
    pub is_superuser: bool,
    /// Timestamp for when the account was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the account.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new user account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub is_superuser: bool,
}

impl NewUser {
    /// Build a new account payload; the email is stored lowercased.
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into().to_lowercase(),
            username: username.into(),
            password_hash: password_hash.into(),
            full_name: None,
            is_superuser: false,
        }
    }

    /// Attach a display name to the payload.
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Grant the new account superuser rights.
    pub fn superuser(mut self) -> Self {
        self.is_superuser = true;
        self
    }
}

/// Patch data applied when updating an existing user account.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    /// Optional display-name update, `None` inside clears it.
    pub full_name: Option<Option<String>>,
    /// Optional activation toggle.
    pub is_active: Option<bool>,
    /// Optional superuser toggle.
    pub is_superuser: Option<bool>,
}

impl UpdateUser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn full_name(mut self, full_name: Option<impl Into<String>>) -> Self {
        self.full_name = Some(full_name.map(Into::into));
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn superuser(mut self, is_superuser: bool) -> Self {
        self.is_superuser = Some(is_superuser);
        self
    }
}

/// Query definition used to list user accounts.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    /// Optional search applied to email and username.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl UserListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
