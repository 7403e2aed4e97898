//! Error types for request-level operations

use thiserror::Error;

use crate::forms::FormErrors;
use crate::session::SessionError;
use crate::storage::StorageError;
use crate::userdb::UserError;

/// Every way a request-level operation can end without success
///
/// None of these is fatal: each maps to a normal HTTP outcome (login
/// redirect, 404, re-rendered form, or 500 for storage trouble).
#[derive(Error, Debug)]
pub enum CoreError {
    /// The principal is anonymous and the operation needs a user
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Unknown identifier, or a resource owned by someone else
    #[error("Resource not found: {resource_type} {resource_id}")]
    ResourceNotFound {
        resource_type: String,
        resource_id: String,
    },

    /// Submitted form failed validation
    #[error("Validation failed: {0}")]
    Validation(FormErrors),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Error from the user database operations
    #[error("User error: {0}")]
    UserError(UserError),

    /// Error from Session operations
    #[error("Session error: {0}")]
    SessionError(SessionError),
}

impl CoreError {
    /// Log the error and return self
    pub fn log(self) -> Self {
        match &self {
            Self::AuthenticationRequired => tracing::debug!("Authentication required"),
            Self::ResourceNotFound {
                resource_type,
                resource_id,
            } => tracing::debug!("Resource not found: {} {}", resource_type, resource_id),
            Self::Validation(errors) => tracing::debug!("Validation failed: {}", errors),
            Self::Database(msg) => tracing::error!("Database error: {}", msg),
            Self::UserError(err) => tracing::error!("User error: {}", err),
            Self::SessionError(err) => tracing::error!("Session error: {}", err),
        }
        self
    }

    pub(crate) fn not_found(resource_type: &str, resource_id: impl ToString) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            resource_id: resource_id.to_string(),
        }
    }
}

impl From<FormErrors> for CoreError {
    fn from(errors: FormErrors) -> Self {
        CoreError::Validation(errors)
    }
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        CoreError::Database(err.to_string()).log()
    }
}

impl From<UserError> for CoreError {
    fn from(err: UserError) -> Self {
        CoreError::UserError(err).log()
    }
}

impl From<SessionError> for CoreError {
    fn from(err: SessionError) -> Self {
        CoreError::SessionError(err).log()
    }
}
