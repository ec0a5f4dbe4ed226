use axum::{extract::State, Json};

use crate::error::AppError;
use crate::routes::AppState;
use crate::service::LoginInput;

/// POST /api/v1/user/login
///
/// 200 with the opaque token as the body on success.
pub async fn login(
    State(app): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<String, AppError> {
    app.service.login(input).await
}
