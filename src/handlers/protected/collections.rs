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
pub struct CollectionRequest {
    pub name: Option<String>,
    pub is_favorite: Option<bool>,
}

impl CollectionRequest {
    fn name(&self) -> Result<&str, ApiError> {
        self.name
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::validation("Collection name is required"))
    }
}

#[derive(Debug, Deserialize)]
pub struct AddTrackRequest {
    pub track_id: Option<i32>,
}

/// GET /api/collections - The acting user's collections
pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let collections = state.ops.get_user_collections(principal.user_id).await?;
    Ok(Json(collections))
}

/// POST /api/collections - Create a collection owned by the acting user
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CollectionRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let name = payload.name()?;
    let is_favorite = payload.is_favorite.unwrap_or(false);

    let collection = state
        .ops
        .create_collection(principal.user_id, name, is_favorite)
        .await?
        .ok_or_else(|| ApiError::operation_failed("Failed to create collection"))?;

    Ok((StatusCode::CREATED, Json(collection)))
}

/// PUT /api/collections/:collection_id - Update a collection (owner or admin)
pub async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(collection_id): Path<i32>,
    Json(payload): Json<CollectionRequest>,
) -> Result<Json<Value>, ApiError> {
    let name = payload.name()?;

    policy::require_collection_owner(state.ops.as_ref(), &principal, collection_id).await?;

    let updated = state
        .ops
        .update_collection(collection_id, name, payload.is_favorite)
        .await?;

    if updated {
        Ok(Json(json!({ "message": "Collection updated successfully" })))
    } else {
        Err(ApiError::operation_failed("Failed to update collection"))
    }
}

/// DELETE /api/collections/:collection_id - Delete a collection (owner or admin)
pub async fn remove(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(collection_id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    policy::require_collection_owner(state.ops.as_ref(), &principal, collection_id).await?;

    if state.ops.delete_collection(collection_id).await? {
        Ok(Json(json!({ "message": "Collection deleted successfully" })))
    } else {
        Err(ApiError::operation_failed("Failed to delete collection"))
    }
}

/// POST /api/collections/:collection_id/tracks - Add a track to a collection.
///
/// Collection and track ownership are checked independently; owning one but
/// not the other still fails before the store is asked to link them.
pub async fn add_track(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(collection_id): Path<i32>,
    Json(payload): Json<AddTrackRequest>,
) -> Result<Json<Value>, ApiError> {
    let track_id = payload
        .track_id
        .ok_or_else(|| ApiError::validation("Track ID is required"))?;

    policy::require_collection_owner(state.ops.as_ref(), &principal, collection_id).await?;
    policy::require_track_owner(state.ops.as_ref(), &principal, track_id).await?;

    let added = state
        .ops
        .add_track_to_collection(collection_id, track_id)
        .await?;

    if added {
        Ok(Json(json!({ "message": "Track added to collection successfully" })))
    } else {
        Err(ApiError::operation_failed("Failed to add track to collection"))
    }
}

/// DELETE /api/collections/:collection_id/tracks/:track_id - Remove a track
/// from a collection (collection ownership only; the track stays untouched)
pub async fn remove_track(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path((collection_id, track_id)): Path<(i32, i32)>,
) -> Result<Json<Value>, ApiError> {
    policy::require_collection_owner(state.ops.as_ref(), &principal, collection_id).await?;

    let removed = state
        .ops
        .remove_track_from_collection(collection_id, track_id)
        .await?;

    if removed {
        Ok(Json(json!({ "message": "Track removed from collection successfully" })))
    } else {
        Err(ApiError::operation_failed(
            "Failed to remove track from collection",
        ))
    }
}
