use axum::{extract::State, response::Json, Extension};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::Principal;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

/// GET /api/profile - The acting user's profile with favorite genres and
/// artists folded in
pub async fn get(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Value>, ApiError> {
    let profile = state
        .ops
        .get_user_profile(principal.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let favorite_genres = state.ops.get_user_favorite_genres(principal.user_id).await?;
    let favorite_artists = state.ops.get_user_favorite_artists(principal.user_id).await?;

    let mut body = match profile {
        Value::Object(map) => map,
        other => {
            tracing::error!("get_user_profile returned a non-object row: {}", other);
            return Err(ApiError::internal_server_error("Failed to get profile"));
        }
    };
    body.insert("favorite_genres".to_string(), Value::Array(favorite_genres));
    body.insert("favorite_artists".to_string(), Value::Array(favorite_artists));

    Ok(Json(Value::Object(body)))
}

/// PUT /api/profile - Update the acting user's profile fields
pub async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, ApiError> {
    let updated = state
        .ops
        .update_user_profile(
            principal.user_id,
            payload.first_name.as_deref(),
            payload.last_name.as_deref(),
            payload.email.as_deref(),
            payload.avatar_url.as_deref(),
        )
        .await?;

    if updated {
        Ok(Json(json!({ "message": "Profile updated successfully" })))
    } else {
        Err(ApiError::operation_failed("Failed to update profile"))
    }
}
