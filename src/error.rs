// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation(String),
    /// The collaborator reported failure or returned no row for a mutation
    OperationFailed(String),

    // 401 Unauthorized
    MissingToken,
    MalformedAuthHeader,
    ExpiredToken,
    InvalidToken,
    /// Token verified but no active account matches its user id
    UserInactive,
    InvalidCredentials,

    // 403 Forbidden
    AdminRequired,
    NotAuthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::OperationFailed(_) => 400,
            ApiError::MissingToken => 401,
            ApiError::MalformedAuthHeader => 401,
            ApiError::ExpiredToken => 401,
            ApiError::InvalidToken => 401,
            ApiError::UserInactive => 401,
            ApiError::InvalidCredentials => 401,
            ApiError::AdminRequired => 403,
            ApiError::NotAuthorized(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg) => msg,
            ApiError::OperationFailed(msg) => msg,
            ApiError::MissingToken => "Token is missing",
            ApiError::MalformedAuthHeader => "Invalid token format",
            ApiError::ExpiredToken => "Token has expired",
            ApiError::InvalidToken => "Invalid token",
            ApiError::UserInactive => "User no longer exists",
            ApiError::InvalidCredentials => "Invalid credentials",
            ApiError::AdminRequired => "Admin access required",
            ApiError::NotAuthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::OperationFailed(_) => "OPERATION_FAILED",
            ApiError::MissingToken => "MISSING_TOKEN",
            ApiError::MalformedAuthHeader => "MALFORMED_AUTH_HEADER",
            ApiError::ExpiredToken => "TOKEN_EXPIRED",
            ApiError::InvalidToken => "TOKEN_INVALID",
            ApiError::UserInactive => "USER_INACTIVE",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::AdminRequired => "ADMIN_REQUIRED",
            ApiError::NotAuthorized(_) => "NOT_AUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

// Static constructor methods for the message-carrying variants
impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn operation_failed(message: impl Into<String>) -> Self {
        ApiError::OperationFailed(message.into())
    }

    pub fn not_authorized(message: impl Into<String>) -> Self {
        ApiError::NotAuthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<crate::database::manager::DatabaseError> for ApiError {
    fn from(err: crate::database::manager::DatabaseError) -> Self {
        match err {
            crate::database::manager::DatabaseError::ConfigMissing(_)
            | crate::database::manager::DatabaseError::InvalidDatabaseUrl => {
                tracing::error!("Database configuration error: {}", err);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            crate::database::manager::DatabaseError::QueryError(msg) => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database query error: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            crate::database::manager::DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<crate::auth::TokenError> for ApiError {
    fn from(err: crate::auth::TokenError) -> Self {
        match err {
            crate::auth::TokenError::Expired => ApiError::ExpiredToken,
            crate::auth::TokenError::Invalid(_) => ApiError::InvalidToken,
            crate::auth::TokenError::InvalidSecret => {
                tracing::error!("Token signing secret is not configured");
                ApiError::internal_server_error("Authentication is not configured")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
