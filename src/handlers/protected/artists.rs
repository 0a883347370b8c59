use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ArtistRequest {
    pub name: Option<String>,
}

impl ArtistRequest {
    fn name(&self) -> Result<&str, ApiError> {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::validation("Artist name is required"))
    }
}

/// GET /api/artists - Global artist catalog
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Value>>, ApiError> {
    let artists = state.ops.get_all_artists().await?;
    Ok(Json(artists))
}

/// POST /api/artists - Add an artist to the catalog
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<ArtistRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let name = payload.name()?;

    let artist = state
        .ops
        .add_artist(name)
        .await?
        .ok_or_else(|| ApiError::operation_failed("Failed to add artist"))?;

    Ok((StatusCode::CREATED, Json(artist)))
}

/// PUT /api/artists/:artist_id - Rename an artist
pub async fn update(
    State(state): State<AppState>,
    Path(artist_id): Path<i32>,
    Json(payload): Json<ArtistRequest>,
) -> Result<Json<Value>, ApiError> {
    let name = payload.name()?;

    if state.ops.update_artist(artist_id, name).await? {
        Ok(Json(json!({ "message": "Artist updated successfully" })))
    } else {
        Err(ApiError::operation_failed("Failed to update artist"))
    }
}

/// DELETE /api/artists/:artist_id - Remove an artist
pub async fn remove(
    State(state): State<AppState>,
    Path(artist_id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    if state.ops.delete_artist(artist_id).await? {
        Ok(Json(json!({ "message": "Artist deleted successfully" })))
    } else {
        Err(ApiError::operation_failed("Failed to delete artist"))
    }
}
