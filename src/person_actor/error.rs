use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during person operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PersonError {
    #[error("Person not found: {0}")]
    NotFound(String),
    #[error("Person already exists: {0}")]
    AlreadyExists(String),
    #[error("Person validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for PersonError {
    fn from(error: FrameworkError) -> Self {
        match error {
            FrameworkError::NotFound(id) => PersonError::NotFound(id),
            FrameworkError::AlreadyExists(id) => PersonError::AlreadyExists(id),
            FrameworkError::Rejected(reason) => PersonError::ValidationError(reason),
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => {
                PersonError::ActorCommunicationError(error.to_string())
            }
        }
    }
}
