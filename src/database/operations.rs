use async_trait::async_trait;
use serde_json::Value;

use crate::database::manager::DatabaseError;
use crate::database::models::user::AccountRow;

/// The collaborator boundary: one method per named operation in the backing
/// store, with a fixed positional argument list and result shape.
///
/// Result conventions:
/// - creation operations return the created row, or `None` when the store
///   reports failure (duplicate, missing relation, ...);
/// - mutation operations return the store's success flag (`false` also
///   covers "no such row");
/// - listing operations return row mappings as JSON objects;
/// - owner lookups return the owning user id, or `None` for an id that does
///   not resolve to a row.
///
/// Handlers depend only on this trait, so the whole HTTP layer runs against
/// an in-memory fake in tests.
#[async_trait]
pub trait DataOps: Send + Sync {
    // Accounts
    async fn authenticate_user(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<AccountRow>, DatabaseError>;

    async fn register_user(
        &self,
        login: &str,
        password: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<AccountRow>, DatabaseError>;

    /// The liveness lookup behind every protected request: the account by
    /// verified user id, filtered to active accounts only.
    async fn find_active_user(&self, user_id: i32) -> Result<Option<AccountRow>, DatabaseError>;

    // Profile
    async fn get_user_profile(&self, user_id: i32) -> Result<Option<Value>, DatabaseError>;
    async fn get_user_favorite_genres(&self, user_id: i32) -> Result<Vec<Value>, DatabaseError>;
    async fn get_user_favorite_artists(&self, user_id: i32) -> Result<Vec<Value>, DatabaseError>;
    async fn update_user_profile(
        &self,
        user_id: i32,
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<bool, DatabaseError>;

    // Genres
    async fn get_all_genres(&self) -> Result<Vec<Value>, DatabaseError>;

    // Artists (global resources, no owner)
    async fn get_all_artists(&self) -> Result<Vec<Value>, DatabaseError>;
    async fn add_artist(&self, name: &str) -> Result<Option<Value>, DatabaseError>;
    async fn update_artist(&self, artist_id: i32, name: &str) -> Result<bool, DatabaseError>;
    async fn delete_artist(&self, artist_id: i32) -> Result<bool, DatabaseError>;

    // Tracks (owned by the creating user)
    async fn get_user_tracks(&self, user_id: i32) -> Result<Vec<Value>, DatabaseError>;
    async fn get_all_tracks_admin(&self) -> Result<Vec<Value>, DatabaseError>;
    async fn add_track(
        &self,
        user_id: i32,
        title: &str,
        artist_id: i32,
        genre_id: i32,
        bpm: Option<i32>,
        duration_sec: Option<i32>,
    ) -> Result<Option<Value>, DatabaseError>;
    async fn update_track(
        &self,
        track_id: i32,
        title: &str,
        artist_id: i32,
        genre_id: i32,
        bpm: Option<i32>,
        duration_sec: Option<i32>,
    ) -> Result<bool, DatabaseError>;
    async fn delete_track(&self, track_id: i32) -> Result<bool, DatabaseError>;
    async fn track_owner(&self, track_id: i32) -> Result<Option<i32>, DatabaseError>;

    // Collections (owned by the creating user)
    async fn get_user_collections(&self, user_id: i32) -> Result<Vec<Value>, DatabaseError>;
    async fn create_collection(
        &self,
        user_id: i32,
        name: &str,
        is_favorite: bool,
    ) -> Result<Option<Value>, DatabaseError>;
    async fn update_collection(
        &self,
        collection_id: i32,
        name: &str,
        is_favorite: Option<bool>,
    ) -> Result<bool, DatabaseError>;
    async fn delete_collection(&self, collection_id: i32) -> Result<bool, DatabaseError>;
    async fn collection_owner(&self, collection_id: i32) -> Result<Option<i32>, DatabaseError>;
    async fn add_track_to_collection(
        &self,
        collection_id: i32,
        track_id: i32,
    ) -> Result<bool, DatabaseError>;
    async fn remove_track_from_collection(
        &self,
        collection_id: i32,
        track_id: i32,
    ) -> Result<bool, DatabaseError>;

    // Search
    async fn search_tracks(
        &self,
        title: Option<&str>,
        artist: Option<&str>,
        genre_id: Option<i32>,
        bpm: Option<i32>,
        duration: Option<i32>,
    ) -> Result<Vec<Value>, DatabaseError>;

    // Admin views
    async fn get_all_users_admin(&self) -> Result<Vec<Value>, DatabaseError>;
    async fn get_audit_log(&self) -> Result<Vec<Value>, DatabaseError>;
}
