use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre_id: Option<i32>,
    pub bpm: Option<i32>,
    pub duration: Option<i32>,
}

/// GET /api/search/tracks - Track search; all filters optional and combined
/// by the store's `search_tracks` procedure
pub async fn tracks(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let results = state
        .ops
        .search_tracks(
            query.title.as_deref(),
            query.artist.as_deref(),
            query.genre_id,
            query.bpm,
            query.duration,
        )
        .await?;

    Ok(Json(results))
}
