use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error payload returned to HTTP callers
#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// Domain errors raised by the account service
///
/// Every variant carries the exact message the HTTP caller sees; translation
/// to a response happens once, at the boundary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("user already exists!")]
    DuplicateAccount,

    #[error("password length must be greater than 6")]
    WeakPassword,

    #[error("Invalid email")]
    AccountNotFound,

    #[error("Invalid password!")]
    InvalidCredentials,

    #[error("{0}")]
    Database(#[from] sqlx::Error),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_values()
            .flat_map(|errors| errors.iter())
            .map(|error| match &error.message {
                Some(message) => message.to_string(),
                None => error.code.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ; ");

        AppError::Validation(message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_)
            | AppError::DuplicateAccount
            | AppError::WeakPassword
            | AppError::AccountNotFound
            | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(ErrorMessage {
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
