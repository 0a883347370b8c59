use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/admin/tracks - Every track regardless of owner
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let tracks = state.ops.get_all_tracks_admin().await?;
    Ok(Json(tracks))
}
