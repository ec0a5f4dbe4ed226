use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_register_with_valid_input_returns_success() {
    let pool = common::setup_test_db().await;
    let mut test_app = common::create_test_app(pool.clone()).await;

    let response = test_app
        .router
        .clone()
        .oneshot(common::post_json(
            "/api/v1/user/register",
            json!({"name": "abcd", "email": "xyz1@test.com", "password": "123456"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"user registered successfully");

    // Account row written with the password stored verbatim
    let (name, password): (String, String) =
        sqlx::query_as("SELECT name, password FROM accounts WHERE email = 'xyz1@test.com'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(name, "abcd");
    assert_eq!(password, "123456");

    // Welcome email queued for the dispatcher
    let notification = test_app
        .mailbox
        .try_recv()
        .expect("welcome notification queued");
    assert_eq!(notification.recipient, "xyz1@test.com");
    assert_eq!(notification.subject, "User Registration");
}

#[tokio::test]
async fn test_register_with_duplicate_email_returns_error() {
    let pool = common::setup_test_db().await;
    let mut test_app = common::create_test_app(pool).await;

    let first = test_app
        .router
        .clone()
        .oneshot(common::post_json(
            "/api/v1/user/register",
            json!({"name": "abc", "email": "abc@test.com", "password": "123456"}),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    test_app.mailbox.try_recv().unwrap();

    let response = test_app
        .router
        .clone()
        .oneshot(common::post_json(
            "/api/v1/user/register",
            json!({"name": "other", "email": "abc@test.com", "password": "654321"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["message"], "user already exists!");

    // No second welcome email
    assert!(test_app.mailbox.try_recv().is_err());
}

#[tokio::test]
async fn test_register_with_short_password_returns_error() {
    let pool = common::setup_test_db().await;
    let mut test_app = common::create_test_app(pool).await;

    let response = test_app
        .router
        .clone()
        .oneshot(common::post_json(
            "/api/v1/user/register",
            json!({"name": "abc", "email": "user123@test.com", "password": "12345"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["message"], "password length must be greater than 6");

    assert!(test_app.mailbox.try_recv().is_err());
}

#[tokio::test]
async fn test_register_with_malformed_email_returns_error() {
    let pool = common::setup_test_db().await;
    let test_app = common::create_test_app(pool).await;

    let response = test_app
        .router
        .clone()
        .oneshot(common::post_json(
            "/api/v1/user/register",
            json!({"name": "abc", "email": "abc", "password": "123456"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["message"], "invalid email format!");
}

#[tokio::test]
async fn test_register_with_blank_name_returns_error() {
    let pool = common::setup_test_db().await;
    let test_app = common::create_test_app(pool).await;

    let response = test_app
        .router
        .clone()
        .oneshot(common::post_json(
            "/api/v1/user/register",
            json!({"name": "", "email": "blank@test.com", "password": "123456"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["message"], "name must not be blank");
}
