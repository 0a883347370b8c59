pub mod auth;
pub mod validate_admin;
pub mod validate_user;

pub use auth::{token_auth_middleware, AuthUser};
pub use validate_admin::validate_admin_middleware;
pub use validate_user::{validate_user_middleware, Principal};
