use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/admin/audit - The store's audit trail
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let entries = state.ops.get_audit_log().await?;
    Ok(Json(entries))
}
