use axum::body::Body;
use axum::http::Request;
use axum::Router;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tokio::sync::mpsc;
use user_service::notification::{self, Notification};

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    /// Receiver end of the notification channel, held in place of a running
    /// dispatcher so tests can observe queued welcome emails.
    pub mailbox: mpsc::UnboundedReceiver<Notification>,
}

pub async fn create_test_app(pool: SqlitePool) -> TestApp {
    let (notifier, mailbox) = notification::channel();

    let router = user_service::create_app(pool.clone(), notifier)
        .await
        .unwrap();

    TestApp {
        router,
        pool,
        mailbox,
    }
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
