use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use log::{error, warn};
use thiserror::Error as ThisError;

use forum::ValidationError;

use crate::views;

/// Errors raised while handling a request.
#[derive(Debug, ThisError)]
pub enum AppError {
    /// A form failed validation. Carries the page to show again.
    #[error("invalid input")]
    Invalid(Html<String>),
    #[error("not found")]
    NotFound,
    #[error("sign in required")]
    Unauthorized,
    #[error("Database error: {0}")]
    Database(#[from] forum_core::Error),
    #[error(transparent)]
    Forum(#[from] forum::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("Worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forum(forum::Error::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(_)
            | AppError::Forum(_)
            | AppError::Pool(_)
            | AppError::Join(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Invalid(page) => (status, page).into_response(),
            other if status.is_client_error() => {
                warn!("{status}: {other}");
                (status, views::error_page(status)).into_response()
            }
            other => {
                error!("{status}: {other}");
                (status, views::error_page(status)).into_response()
            }
        }
    }
}

/// Turn a validation failure into [`AppError::Invalid`], showing the
/// page `render` builds for it.
pub(crate) fn or_invalid<T>(
    result: forum::Result<T>,
    render: impl FnOnce(&ValidationError) -> Html<String>,
) -> Result<T, AppError> {
    match result {
        Ok(value) => Ok(value),
        Err(forum::Error::Validation(errors)) => Err(AppError::Invalid(render(&errors))),
        Err(e) => Err(e.into()),
    }
}
