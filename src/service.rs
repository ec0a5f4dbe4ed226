use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::error::AppError;
use crate::notification::{Notification, Notifier};
use crate::repository;

/// Passwords shorter than this are rejected at registration
const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, message = "name must not be blank"))]
    pub name: String,
    #[validate(email(message = "invalid email format!"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be blank"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(email(message = "invalid email format!"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be blank"))]
    pub password: String,
}

/// Registration and login over the account store
///
/// Stateless apart from its pool and notifier handles; safe to clone into
/// the router state.
#[derive(Clone)]
pub struct AccountService {
    pool: SqlitePool,
    notifier: Notifier,
}

impl AccountService {
    pub fn new(pool: SqlitePool, notifier: Notifier) -> Self {
        Self { pool, notifier }
    }

    /// Register a new account and queue its welcome email
    pub async fn register(&self, input: RegisterInput) -> Result<(), AppError> {
        input.validate()?;

        if repository::find_by_email(&self.pool, &input.email)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateAccount);
        }

        if input.password.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::WeakPassword);
        }

        // Two registrations can pass the lookup above concurrently; the UNIQUE
        // constraint on email decides the loser, reported as the same error.
        let account =
            match repository::insert(&self.pool, &input.name, &input.email, &input.password).await
            {
                Ok(account) => account,
                Err(e) if is_unique_violation(&e) => return Err(AppError::DuplicateAccount),
                Err(e) => return Err(e.into()),
            };

        // The row is written at this point. Delivery runs off the request
        // path and its outcome never affects the registration result.
        self.notifier.notify(Notification::welcome(&account));

        tracing::info!(id = account.id, email = %account.email, "account registered");

        Ok(())
    }

    /// Log in, returning the opaque account token
    pub async fn login(&self, input: LoginInput) -> Result<String, AppError> {
        input.validate()?;

        let Some(account) = repository::find_by_email(&self.pool, &input.email).await? else {
            return Err(AppError::AccountNotFound);
        };

        if account.password != input.password {
            return Err(AppError::InvalidCredentials);
        }

        Ok(STANDARD.encode(format!("{}:{}", account.name, account.email)))
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|e| e.is_unique_violation())
}
