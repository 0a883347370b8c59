use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::auth;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub login: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// A required field counts as present only when non-empty
fn required<'a>(value: &'a Option<String>) -> Option<&'a str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// POST /api/auth/login - Authenticate and receive a bearer token
///
/// Credentials are checked by the store's `authenticate_user` procedure; a
/// match returns the account row plus a freshly issued token.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let (login, password) = match (required(&payload.login), required(&payload.password)) {
        (Some(login), Some(password)) => (login, password),
        _ => return Err(ApiError::validation("Login and password required")),
    };

    let account = state
        .ops
        .authenticate_user(login, password)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let token = auth::issue_token(account.user_id)?;

    Ok(Json(json!({
        "token": token,
        "user": account,
    })))
}

/// POST /api/auth/register - Create an account and receive a bearer token
///
/// Uniqueness and any field validation beyond presence belong to the store's
/// `register_user` procedure; a reported failure (e.g. login already taken)
/// surfaces as a 400.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let (login, password) = match (required(&payload.login), required(&payload.password)) {
        (Some(login), Some(password)) => (login, password),
        _ => return Err(ApiError::validation("Login and password required")),
    };

    let account = state
        .ops
        .register_user(
            login,
            password,
            payload.first_name.as_deref(),
            payload.last_name.as_deref(),
            payload.email.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::operation_failed("Registration failed"))?;

    let token = auth::issue_token(account.user_id)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "token": token,
            "user": account,
        })),
    ))
}
