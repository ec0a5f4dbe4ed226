use axum::{
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;

use crate::service::AccountService;

mod health;
mod login;
mod register;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub service: AccountService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(state.pool.clone())
        .merge(
            Router::new()
                .route("/api/v1/user/register", post(register::register))
                .route("/api/v1/user/login", post(login::login))
                .with_state(state),
        )
}
