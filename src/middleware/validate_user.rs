use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::database::models::user::AccountRow;
use crate::error::ApiError;

use super::auth::AuthUser;

/// The acting identity for the current request, resolved from live account
/// state rather than token claims. Dropped when the request completes.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: i32,
    pub login: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
}

impl From<AccountRow> for Principal {
    fn from(row: AccountRow) -> Self {
        Self {
            user_id: row.user_id,
            login: row.login,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            avatar_url: row.avatar_url,
            is_admin: row.is_admin,
        }
    }
}

/// Middleware that resolves the verified token identity against live account
/// state and injects a Principal.
///
/// This lookup is the revocation mechanism: tokens have no server-side
/// revocation list, so deactivating an account must reject every outstanding
/// token here, on the very next request. One store round trip per request,
/// deliberately uncached.
pub async fn validate_user_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = *request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| {
            ApiError::internal_server_error("Token verification must run before user validation")
        })?;

    let account = state.ops.find_active_user(auth_user.user_id).await?;

    let account = account.ok_or_else(|| {
        tracing::warn!(
            "User validation failed: user {} not found or deactivated",
            auth_user.user_id
        );
        ApiError::UserInactive
    })?;

    let principal = Principal::from(account);
    tracing::debug!(
        "User validation successful: {} (id {}, admin: {})",
        principal.login,
        principal.user_id,
        principal.is_admin
    );

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
