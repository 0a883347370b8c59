use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account row shape shared by `authenticate_user`, `register_user`, and the
/// per-request liveness lookup. This is also the `user` payload returned by
/// the login and register endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccountRow {
    pub user_id: i32,
    pub login: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub is_admin: bool,
}
