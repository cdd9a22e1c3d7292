//! HTTP surface: the registration page and its processing route.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use crate::registration::Feedback;
use crate::render::PROCESS_PATH;
use crate::session::SessionCookies;
use crate::storage::Store;
use axum::{middleware as axum_middleware, routing::get, Router};
use flash_store::FlashStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Route that renders the registration form.
pub const FORM_PATH: &str = "/registration";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Registration storage backend
    pub store: Arc<Store>,
    /// Feedback waiting for the next page view, keyed by session id
    pub feedback: FlashStore<Feedback>,
    /// Session cookie issuer
    pub sessions: Arc<SessionCookies>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Store, feedback: FlashStore<Feedback>, sessions: SessionCookies) -> Self {
        Self {
            store: Arc::new(store),
            feedback,
            sessions: Arc::new(sessions),
        }
    }
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::index))
        .route(FORM_PATH, get(handlers::show_form))
        .route(
            PROCESS_PATH,
            get(handlers::redirect_to_form).post(handlers::process_form),
        )
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
