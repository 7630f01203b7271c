use thiserror::Error;

use crate::auth::AuthError;
use crate::repository::RepositoryError;

pub mod auth;
pub mod configurations;
pub mod customers;
pub mod hierarchy;
pub mod main;
pub mod manufacturing_types;
pub mod pricing;
pub mod quotes;

/// Errors surfaced by the service layer to the route handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    #[error("invalid form input: {0}")]
    Form(String),
    #[error(transparent)]
    Repository(RepositoryError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict => ServiceError::Conflict,
            other => ServiceError::Repository(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
