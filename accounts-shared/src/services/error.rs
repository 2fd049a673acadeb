use crate::{auth::password::PasswordError, repository::RepositoryError};

/// Failures of a service operation
///
/// Each kind maps to one HTTP status at the API boundary.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The referenced user or address does not exist
    #[error("{0}")]
    NotFound(String),

    /// A unique key (rut or email) is already taken
    #[error("{0}")]
    Conflict(String),

    /// The input failed presence/length checks
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// The storage backend failed
    #[error("Storage error: {0}")]
    Storage(#[source] RepositoryError),

    /// Anything else that is not the caller's fault
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub(crate) fn user_not_found(rut: &str) -> Self {
        ServiceError::NotFound(format!("User with rut '{}' not found", rut))
    }

    pub(crate) fn address_not_found(rut: &str, id: i64) -> Self {
        ServiceError::NotFound(format!("Address {} not found for user '{}'", id, rut))
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::UniqueViolation { constraint } => {
                let what = if constraint.contains("email") {
                    "email"
                } else {
                    "rut"
                };
                ServiceError::Conflict(format!("A user with this {} already exists", what))
            }
            other => ServiceError::Storage(other),
        }
    }
}

impl From<PasswordError> for ServiceError {
    fn from(err: PasswordError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}
