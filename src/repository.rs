use sqlx::{prelude::FromRow, SqlitePool};

/// A registered user record
///
/// The password is stored verbatim, matching the service's plaintext
/// comparison on login. A known weakness, kept as the observed contract.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Look up an account by its email address
pub async fn find_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Account>, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "SELECT id, name, email, password FROM accounts WHERE email = ? LIMIT 1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Insert a new account, returning the stored row with its assigned id
pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Account, sqlx::Error> {
    sqlx::query_as::<_, Account>(
        "INSERT INTO accounts (name, email, password) VALUES (?, ?, ?) \
         RETURNING id, name, email, password",
    )
    .bind(name)
    .bind(email)
    .bind(password)
    .fetch_one(pool)
    .await
}
