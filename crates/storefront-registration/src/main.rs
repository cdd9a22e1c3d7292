//! Storefront registration service - Entry point.

use flash_store::FlashStore;
use std::net::SocketAddr;
use storefront_registration::{
    api::{create_router, AppState},
    config::Config,
    session::SessionCookies,
    storage::Store,
};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting storefront registration service");

    // Session cookies
    let key = match &config.session.secret {
        Some(secret) => secret.clone().into_bytes(),
        None => {
            warn!("SESSION__SECRET not set, using a random key (sessions reset on restart)");
            SessionCookies::random_key()
        }
    };
    let sessions = SessionCookies::new(key, config.session.cookie_name.clone(), config.session.ttl);

    // Feedback waiting for the next page view
    let feedback = FlashStore::new(config.session.ttl, config.session.cleanup_interval);

    // Storage connects per request, so an unavailable database does not
    // stop the form from being served
    let store = Store::sql(config.database.url.clone());

    // Create application state
    let state = AppState::new(store, feedback, sessions);
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::new(
        config.server.listen_addr.parse().unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
