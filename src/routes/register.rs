use axum::{extract::State, Json};

use crate::error::AppError;
use crate::routes::AppState;
use crate::service::RegisterInput;

/// POST /api/v1/user/register
///
/// 200 with a plain confirmation body on success; domain and validation
/// failures surface as 400 with a JSON message.
pub async fn register(
    State(app): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<&'static str, AppError> {
    app.service.register(input).await?;

    Ok("user registered successfully")
}
