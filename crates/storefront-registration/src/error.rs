//! Error types for the registration service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Service error types.
///
/// Validation and storage failures are not errors at this level: they
/// travel back to the user as [`crate::registration::Feedback`].
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Failed to render page: {0}")]
    Render(#[from] askama::Error),

    #[error("Session error: {0}")]
    Session(String),
}

/// The routes returning this error serve HTML, so the body is plain text
/// and carries no internal detail.
impl IntoResponse for RegistrationError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

impl From<argon2::password_hash::Error> for RegistrationError {
    fn from(e: argon2::password_hash::Error) -> Self {
        RegistrationError::Hashing(e.to_string())
    }
}
