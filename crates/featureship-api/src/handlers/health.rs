use axum::{extract::State, Json};
use serde_json::json;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Health check, including a database liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 500, description = "Database unreachable", body = crate::error::ErrorResponse)
    )
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .map_err(featureship_core::AppError::from)?;

    Ok(Json(json!({ "status": "ok" })))
}
