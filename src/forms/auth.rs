use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::user::NewUser;
use crate::forms::sanitize_inline_text;

const USERNAME_MAX_LEN: u64 = 64;
const PASSWORD_MIN_LEN: u64 = 8;
const PASSWORD_MAX_LEN: u64 = 128;

pub type AuthFormResult<T> = Result<T, AuthFormError>;

/// Errors that can occur while processing authentication forms.
#[derive(Debug, Error)]
pub enum AuthFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("username cannot be empty")]
    EmptyUsername,
}

/// Form payload submitted by the login page.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginForm {
    /// Validate the payload and return normalized credentials.
    pub fn into_credentials(self) -> AuthFormResult<(String, String)> {
        self.validate()?;
        Ok((self.email.trim().to_lowercase(), self.password))
    }
}

/// Form payload submitted when creating a user account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = USERNAME_MAX_LEN))]
    pub username: String,
    #[validate(length(min = PASSWORD_MIN_LEN, max = PASSWORD_MAX_LEN))]
    pub password: String,
    pub full_name: Option<String>,
}

impl RegisterForm {
    /// Validate and sanitize into a user payload; the caller supplies the
    /// password hash because hashing lives in the auth module.
    pub fn into_new_user(self, password_hash: impl Into<String>) -> AuthFormResult<NewUser> {
        self.validate()?;

        let username = sanitize_inline_text(&self.username);
        if username.is_empty() {
            return Err(AuthFormError::EmptyUsername);
        }

        let mut new_user = NewUser::new(self.email.trim(), username, password_hash);

        if let Some(full_name) = self
            .full_name
            .as_deref()
            .map(sanitize_inline_text)
            .filter(|value| !value.is_empty())
        {
            new_user = new_user.with_full_name(full_name);
        }

        Ok(new_user)
    }
}
