use thiserror::Error as ThisError;

use crate::validation::ValidationError;

/// Result type that uses [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by forum operations.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Database error: {0}")]
    Database(#[from] forum_core::Error),
    #[error("Password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),
}

impl Error {
    /// The validation failure, if this is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(v) => Some(v),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Error::Validation(errors.into())
    }
}
