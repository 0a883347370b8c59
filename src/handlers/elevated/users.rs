use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/admin/users - Every account, active or not
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let users = state.ops.get_all_users_admin().await?;
    Ok(Json(users))
}
