use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::Principal;
use crate::policy;

#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    pub title: Option<String>,
    pub artist_id: Option<i32>,
    pub genre_id: Option<i32>,
    pub bpm: Option<i32>,
    pub duration_sec: Option<i32>,
}

impl TrackRequest {
    /// Title, artist and genre are mandatory; bpm and duration pass through
    /// as-is (the store accepts nulls for both)
    fn required_fields(&self) -> Result<(&str, i32, i32), ApiError> {
        match (
            self.title.as_deref().filter(|s| !s.is_empty()),
            self.artist_id,
            self.genre_id,
        ) {
            (Some(title), Some(artist_id), Some(genre_id)) => Ok((title, artist_id, genre_id)),
            _ => Err(ApiError::validation("Title, artist, and genre are required")),
        }
    }
}

/// GET /api/tracks - The acting user's tracks; admins see every track.
/// The owner filter is applied at the store call, not re-checked per row.
pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let tracks = if principal.is_admin {
        state.ops.get_all_tracks_admin().await?
    } else {
        state.ops.get_user_tracks(principal.user_id).await?
    };

    Ok(Json(tracks))
}

/// POST /api/tracks - Add a track owned by the acting user
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<TrackRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (title, artist_id, genre_id) = payload.required_fields()?;

    let track = state
        .ops
        .add_track(
            principal.user_id,
            title,
            artist_id,
            genre_id,
            payload.bpm,
            payload.duration_sec,
        )
        .await?
        .ok_or_else(|| ApiError::operation_failed("Failed to add track"))?;

    Ok((StatusCode::CREATED, Json(track)))
}

/// PUT /api/tracks/:track_id - Update a track (owner or admin)
pub async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(track_id): Path<i32>,
    Json(payload): Json<TrackRequest>,
) -> Result<Json<Value>, ApiError> {
    let (title, artist_id, genre_id) = payload.required_fields()?;

    policy::require_track_owner(state.ops.as_ref(), &principal, track_id).await?;

    let updated = state
        .ops
        .update_track(
            track_id,
            title,
            artist_id,
            genre_id,
            payload.bpm,
            payload.duration_sec,
        )
        .await?;

    if updated {
        Ok(Json(json!({ "message": "Track updated successfully" })))
    } else {
        Err(ApiError::operation_failed("Failed to update track"))
    }
}

/// DELETE /api/tracks/:track_id - Delete a track (owner or admin)
pub async fn remove(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(track_id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    policy::require_track_owner(state.ops.as_ref(), &principal, track_id).await?;

    if state.ops.delete_track(track_id).await? {
        Ok(Json(json!({ "message": "Track deleted successfully" })))
    } else {
        Err(ApiError::operation_failed("Failed to delete track"))
    }
}
