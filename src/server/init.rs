//! Server initialization and main run loop
//!
//! Contains the composition root: opens the database, wires repositories,
//! services, and the event bus, and starts the HTTP listener.

use anyhow::{Context, Result};
use axum::{routing::get, Extension, Router};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use sentinel_core::{
    topics, Database, EventBus, NotificationManagement, NotificationRepository,
    NotificationService, UserManagement, UserRepository, UserService, WelcomeObserver,
};

use super::loader::load_config;
use crate::api::api_router;

/// Everything the router needs, assembled once at startup.
pub struct AppState {
    pub users: Arc<dyn UserManagement>,
    pub notifications: Arc<dyn NotificationManagement>,
    pub bus: Arc<EventBus>,
    pub db: Database,
}

/// Wire repositories, services, and the event bus over `db`.
///
/// The welcome observer writes through its own notification service backed
/// by an empty bus, which keeps event fan-out at depth one: reactions to
/// `user.created` cannot trigger further reactions.
pub fn build_state(db: Database) -> AppState {
    let user_repo = UserRepository::new(&db);
    let notification_repo = NotificationRepository::new(&db);

    let observer_notifications = Arc::new(NotificationService::new(
        notification_repo.clone(),
        user_repo.clone(),
        Arc::new(EventBus::default()),
    ));
    let welcome = WelcomeObserver::new(observer_notifications);

    let bus = Arc::new(
        EventBus::builder()
            .subscribe(topics::USER_CREATED, Arc::new(welcome))
            .build(),
    );

    let users: Arc<dyn UserManagement> =
        Arc::new(UserService::new(user_repo.clone(), bus.clone()));
    let notifications: Arc<dyn NotificationManagement> = Arc::new(NotificationService::new(
        notification_repo,
        user_repo,
        bus.clone(),
    ));

    AppState {
        users,
        notifications,
        bus,
        db,
    }
}

/// Build the full application router over `state`.
pub fn app(state: AppState) -> Router {
    api_router()
        .route("/", get(|| async { "Sentinel backend" }))
        .layer(Extension(state.users))
        .layer(Extension(state.notifications))
        .layer(Extension(state.db))
        .layer(Extension(state.bus))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the server
pub async fn run() -> Result<()> {
    info!("Starting Sentinel backend v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("Failed to load configuration")?;
    info!("Configuration loaded");

    let db = Database::from_path(Path::new(&config.database.path))
        .await
        .context("Failed to open database")?;
    info!("Database ready: {}", config.database.path);

    let state = build_state(db);
    info!(
        subscribers = state.bus.subscriber_count(),
        "event bus wired"
    );

    let app = app(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    info!("HTTP server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("HTTP server error")?;

    Ok(())
}
