use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::error::ApiError;

use super::auth::AuthUser;

/// Admin gate for the /api/admin tier.
///
/// Performs the same live-account resolution as `validate_user_middleware`
/// and then requires the admin flag. Admin handlers never need the acting
/// identity beyond this gate, so no Principal is injected. The flag is
/// re-read on every call; deactivation or demotion takes effect on the next
/// request.
pub async fn validate_admin_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = *request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| {
            ApiError::internal_server_error("Token verification must run before the admin gate")
        })?;

    let account = state
        .ops
        .find_active_user(auth_user.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(
                "Admin gate failed: user {} not found or deactivated",
                auth_user.user_id
            );
            ApiError::UserInactive
        })?;

    if !account.is_admin {
        tracing::warn!("Admin gate failed: user {} is not an admin", account.user_id);
        return Err(ApiError::AdminRequired);
    }

    Ok(next.run(request).await)
}
