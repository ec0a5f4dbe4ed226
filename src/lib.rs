pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod notification;
pub mod observability;
pub mod repository;
pub mod routes;
pub mod service;

pub use routes::AppState;

/// Create the app router for testing
///
/// Builds the Axum router with all routes configured against the given pool
/// and notifier, useful for integration testing without starting the full
/// server or the notification dispatcher.
pub async fn create_app(
    pool: sqlx::SqlitePool,
    notifier: notification::Notifier,
) -> anyhow::Result<axum::Router> {
    let service = service::AccountService::new(pool.clone(), notifier);

    Ok(routes::router(AppState { pool, service }))
}
