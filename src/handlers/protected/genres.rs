use axum::{extract::State, response::Json};
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/genres - Global genre catalog
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let genres = state.ops.get_all_genres().await?;
    Ok(Json(genres))
}
