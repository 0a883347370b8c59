use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth;
use crate::error::ApiError;

/// Claims-level identity extracted from a verified bearer token.
///
/// This is only what the token itself asserts. Nothing has been checked
/// against live account state yet; the `validate_user` / `validate_admin`
/// layers do that before any handler runs.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: i32,
}

/// Bearer-token middleware: extracts the credential from the Authorization
/// header, verifies it, and injects the claims-level identity
pub async fn token_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(&headers)?;
    let user_id = auth::verify_token(&token)?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}

/// Extract the bearer credential from the Authorization header.
///
/// The header value must split into "scheme token"; the scheme word itself
/// is ignored beyond the split, matching what existing clients send.
fn extract_bearer(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .ok_or(ApiError::MissingToken)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::MalformedAuthHeader)?;

    let mut parts = auth_str.split_whitespace();
    let _scheme = parts.next().ok_or(ApiError::MalformedAuthHeader)?;
    let token = parts.next().ok_or(ApiError::MalformedAuthHeader)?;

    Ok(token.to_string())
}
