//! HTTP request handlers.

use super::types::{HealthResponse, RegistrationForm};
use super::{AppState, FORM_PATH};
use crate::error::RegistrationError;
use crate::registration::{process_submission, Submission};
use crate::render::render_page;
use crate::session::SessionId;
use axum::{
    extract::{rejection::FormRejection, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use flash_store::Flash;
use tracing::{debug, info, warn};

/// Health check endpoint. Does not touch the database.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        storage_backend: state.store.backend().to_string(),
        pending_feedback: state.feedback.pending_count().await,
    })
}

/// Send the site root to the registration page.
pub async fn index() -> Redirect {
    Redirect::to(FORM_PATH)
}

/// Bounce anything that is not a form post back to the page.
pub async fn redirect_to_form() -> Redirect {
    Redirect::to(FORM_PATH)
}

/// Render the registration form, consuming any pending feedback.
pub async fn show_form(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, RegistrationError> {
    let flash = match state.sessions.session_from_headers(&headers) {
        Some(session) => state.feedback.take(session.as_str()).await,
        None => None,
    };

    if let Some(flash) = &flash {
        debug!(
            success = flash.value.is_success(),
            age_ms = flash.age().num_milliseconds(),
            "Displaying pending feedback"
        );
    }

    Ok(Html(render_page(flash.map(Flash::into_inner))?))
}

/// Process a registration post and redirect back to the form.
///
/// Every outcome ends in the same redirect; the result travels in the
/// session's feedback slot.
pub async fn process_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<RegistrationForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            warn!("Unreadable registration form: {}", rejection);
            return Redirect::to(FORM_PATH).into_response();
        }
    };

    let (session, is_new) = match state.sessions.session_from_headers(&headers) {
        Some(session) => (session, false),
        None => (state.sessions.issue(), true),
    };

    let submission = Submission::from(form);
    let feedback = process_submission(&submission, &state.store).await;
    info!(success = feedback.is_success(), "Registration processed");

    if let Err(e) = state.feedback.put(session.as_str(), feedback).await {
        warn!("Failed to store feedback: {}", e);
    }

    redirect_with_session(&state, &session, is_new)
}

fn redirect_with_session(state: &AppState, session: &SessionId, is_new: bool) -> Response {
    let mut response = Redirect::to(FORM_PATH).into_response();
    if !is_new {
        return response;
    }

    match state.sessions.set_cookie_header(session) {
        Ok((name, value)) => {
            response.headers_mut().append(name, value);
        }
        Err(e) => warn!("Failed to issue session cookie: {}", e),
    }

    response
}
