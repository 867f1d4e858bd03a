use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Result type returned by service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures surfaced by the service layer to the routes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller is not signed in or lacks the required role.
    #[error("unauthorized")]
    Unauthorized,
    /// The requested record does not exist or is not visible to the caller.
    #[error("not found")]
    NotFound,
    /// The request clashes with existing data.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Submitted input failed validation.
    #[error("invalid input: {0}")]
    Form(String),
    /// Unexpected failure in a lower layer.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Conflict(message) => Self::Conflict(message),
            RepositoryError::ConstraintViolation(_) => {
                Self::Conflict("the change clashes with existing data".to_string())
            }
            other => Self::Internal(other.to_string()),
        }
    }
}
