use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::user::AccountRow;
use crate::database::operations::DataOps;

/// Store adapter that dispatches every operation to its stored procedure.
///
/// Procedures are invoked positionally (`SELECT * FROM proc($1, ...)`); the
/// store owns validation, uniqueness, and relational integrity. Set-returning
/// procedures are surfaced as JSON row mappings via `row_to_json`, so this
/// layer never needs to know their column lists.
#[derive(Debug, Clone, Default)]
pub struct PgDataOps;

impl PgDataOps {
    pub fn new() -> Self {
        Self
    }

    async fn pool(&self) -> Result<PgPool, DatabaseError> {
        DatabaseManager::pool().await
    }
}

/// Pull the `row` column produced by a `row_to_json` wrapper query
fn json_row(row: &PgRow) -> Value {
    row.try_get("row").unwrap_or(Value::Null)
}

/// A creation procedure reports success by returning a row with a non-null
/// id column; anything else is a store-reported failure.
fn created_row(row: Option<Value>, id_field: &str) -> Option<Value> {
    row.filter(|v| v.get(id_field).map(|id| !id.is_null()).unwrap_or(false))
}

/// Read the `success` flag from a mutation procedure's result row; a missing
/// row counts as failure.
fn success_flag(row: Option<PgRow>) -> bool {
    row.map(|r| r.try_get("success").unwrap_or(false))
        .unwrap_or(false)
}

#[async_trait]
impl DataOps for PgDataOps {
    async fn authenticate_user(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<AccountRow>, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT * FROM authenticate_user($1, $2)")
            .bind(login)
            .bind(password)
            .fetch_optional(&pool)
            .await?;

        match row {
            Some(row) if row.try_get("success").unwrap_or(false) => {
                Ok(Some(AccountRow::from_row(&row)?))
            }
            _ => Ok(None),
        }
    }

    async fn register_user(
        &self,
        login: &str,
        password: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<AccountRow>, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT * FROM register_user($1, $2, $3, $4, $5)")
            .bind(login)
            .bind(password)
            .bind(first_name)
            .bind(last_name)
            .bind(email)
            .fetch_optional(&pool)
            .await?;

        match row {
            Some(row) if row.try_get("success").unwrap_or(false) => {
                Ok(Some(AccountRow::from_row(&row)?))
            }
            _ => Ok(None),
        }
    }

    async fn find_active_user(&self, user_id: i32) -> Result<Option<AccountRow>, DatabaseError> {
        let pool = self.pool().await?;
        let account = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT user_id, login, first_name, last_name, email, avatar_url, is_admin
            FROM "user"
            WHERE user_id = $1
            AND is_active = true
            "#,
        )
        .bind(user_id)
        .fetch_optional(&pool)
        .await?;

        Ok(account)
    }

    async fn get_user_profile(&self, user_id: i32) -> Result<Option<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM get_user_profile($1)) t",
        )
        .bind(user_id)
        .fetch_optional(&pool)
        .await?;

        Ok(row.map(|r| json_row(&r)))
    }

    async fn get_user_favorite_genres(&self, user_id: i32) -> Result<Vec<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let rows = sqlx::query(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM get_user_favorite_genres($1)) t",
        )
        .bind(user_id)
        .fetch_all(&pool)
        .await?;

        Ok(rows.iter().map(json_row).collect())
    }

    async fn get_user_favorite_artists(&self, user_id: i32) -> Result<Vec<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let rows = sqlx::query(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM get_user_favorite_artists($1)) t",
        )
        .bind(user_id)
        .fetch_all(&pool)
        .await?;

        Ok(rows.iter().map(json_row).collect())
    }

    async fn update_user_profile(
        &self,
        user_id: i32,
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<bool, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT success FROM update_user_profile($1, $2, $3, $4, $5)")
            .bind(user_id)
            .bind(first_name)
            .bind(last_name)
            .bind(email)
            .bind(avatar_url)
            .fetch_optional(&pool)
            .await?;

        Ok(success_flag(row))
    }

    async fn get_all_genres(&self) -> Result<Vec<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let rows =
            sqlx::query("SELECT row_to_json(t) AS row FROM (SELECT * FROM get_all_genres()) t")
                .fetch_all(&pool)
                .await?;

        Ok(rows.iter().map(json_row).collect())
    }

    async fn get_all_artists(&self) -> Result<Vec<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let rows =
            sqlx::query("SELECT row_to_json(t) AS row FROM (SELECT * FROM get_all_artists()) t")
                .fetch_all(&pool)
                .await?;

        Ok(rows.iter().map(json_row).collect())
    }

    async fn add_artist(&self, name: &str) -> Result<Option<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT row_to_json(t) AS row FROM (SELECT * FROM add_artist($1)) t")
            .bind(name)
            .fetch_optional(&pool)
            .await?;

        Ok(created_row(row.map(|r| json_row(&r)), "artist_id"))
    }

    async fn update_artist(&self, artist_id: i32, name: &str) -> Result<bool, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT success FROM update_artist($1, $2)")
            .bind(artist_id)
            .bind(name)
            .fetch_optional(&pool)
            .await?;

        Ok(success_flag(row))
    }

    async fn delete_artist(&self, artist_id: i32) -> Result<bool, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT success FROM delete_artist($1)")
            .bind(artist_id)
            .fetch_optional(&pool)
            .await?;

        Ok(success_flag(row))
    }

    async fn get_user_tracks(&self, user_id: i32) -> Result<Vec<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let rows = sqlx::query(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM get_user_tracks($1)) t",
        )
        .bind(user_id)
        .fetch_all(&pool)
        .await?;

        Ok(rows.iter().map(json_row).collect())
    }

    async fn get_all_tracks_admin(&self) -> Result<Vec<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let rows = sqlx::query(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM get_all_tracks_admin()) t",
        )
        .fetch_all(&pool)
        .await?;

        Ok(rows.iter().map(json_row).collect())
    }

    async fn add_track(
        &self,
        user_id: i32,
        title: &str,
        artist_id: i32,
        genre_id: i32,
        bpm: Option<i32>,
        duration_sec: Option<i32>,
    ) -> Result<Option<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM add_track($1, $2, $3, $4, $5, $6)) t",
        )
        .bind(user_id)
        .bind(title)
        .bind(artist_id)
        .bind(genre_id)
        .bind(bpm)
        .bind(duration_sec)
        .fetch_optional(&pool)
        .await?;

        Ok(created_row(row.map(|r| json_row(&r)), "track_id"))
    }

    async fn update_track(
        &self,
        track_id: i32,
        title: &str,
        artist_id: i32,
        genre_id: i32,
        bpm: Option<i32>,
        duration_sec: Option<i32>,
    ) -> Result<bool, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT success FROM update_track($1, $2, $3, $4, $5, $6)")
            .bind(track_id)
            .bind(title)
            .bind(artist_id)
            .bind(genre_id)
            .bind(bpm)
            .bind(duration_sec)
            .fetch_optional(&pool)
            .await?;

        Ok(success_flag(row))
    }

    async fn delete_track(&self, track_id: i32) -> Result<bool, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT success FROM delete_track($1)")
            .bind(track_id)
            .fetch_optional(&pool)
            .await?;

        Ok(success_flag(row))
    }

    async fn track_owner(&self, track_id: i32) -> Result<Option<i32>, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT user_id FROM tracks WHERE track_id = $1")
            .bind(track_id)
            .fetch_optional(&pool)
            .await?;

        Ok(row.map(|r| r.get("user_id")))
    }

    async fn get_user_collections(&self, user_id: i32) -> Result<Vec<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let rows = sqlx::query(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM get_user_collections($1)) t",
        )
        .bind(user_id)
        .fetch_all(&pool)
        .await?;

        Ok(rows.iter().map(json_row).collect())
    }

    async fn create_collection(
        &self,
        user_id: i32,
        name: &str,
        is_favorite: bool,
    ) -> Result<Option<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM create_collection($1, $2, $3)) t",
        )
        .bind(user_id)
        .bind(name)
        .bind(is_favorite)
        .fetch_optional(&pool)
        .await?;

        Ok(created_row(row.map(|r| json_row(&r)), "collection_id"))
    }

    async fn update_collection(
        &self,
        collection_id: i32,
        name: &str,
        is_favorite: Option<bool>,
    ) -> Result<bool, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT success FROM update_collection($1, $2, $3)")
            .bind(collection_id)
            .bind(name)
            .bind(is_favorite)
            .fetch_optional(&pool)
            .await?;

        Ok(success_flag(row))
    }

    async fn delete_collection(&self, collection_id: i32) -> Result<bool, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT success FROM delete_collection($1)")
            .bind(collection_id)
            .fetch_optional(&pool)
            .await?;

        Ok(success_flag(row))
    }

    async fn collection_owner(&self, collection_id: i32) -> Result<Option<i32>, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT user_id FROM collections WHERE collection_id = $1")
            .bind(collection_id)
            .fetch_optional(&pool)
            .await?;

        Ok(row.map(|r| r.get("user_id")))
    }

    async fn add_track_to_collection(
        &self,
        collection_id: i32,
        track_id: i32,
    ) -> Result<bool, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT success FROM add_track_to_collection($1, $2)")
            .bind(collection_id)
            .bind(track_id)
            .fetch_optional(&pool)
            .await?;

        Ok(success_flag(row))
    }

    async fn remove_track_from_collection(
        &self,
        collection_id: i32,
        track_id: i32,
    ) -> Result<bool, DatabaseError> {
        let pool = self.pool().await?;
        let row = sqlx::query("SELECT success FROM remove_track_from_collection($1, $2)")
            .bind(collection_id)
            .bind(track_id)
            .fetch_optional(&pool)
            .await?;

        Ok(success_flag(row))
    }

    async fn search_tracks(
        &self,
        title: Option<&str>,
        artist: Option<&str>,
        genre_id: Option<i32>,
        bpm: Option<i32>,
        duration: Option<i32>,
    ) -> Result<Vec<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let rows = sqlx::query(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM search_tracks($1, $2, $3, $4, $5)) t",
        )
        .bind(title)
        .bind(artist)
        .bind(genre_id)
        .bind(bpm)
        .bind(duration)
        .fetch_all(&pool)
        .await?;

        Ok(rows.iter().map(json_row).collect())
    }

    async fn get_all_users_admin(&self) -> Result<Vec<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let rows = sqlx::query(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM get_all_users_admin()) t",
        )
        .fetch_all(&pool)
        .await?;

        Ok(rows.iter().map(json_row).collect())
    }

    async fn get_audit_log(&self) -> Result<Vec<Value>, DatabaseError> {
        let pool = self.pool().await?;
        let rows =
            sqlx::query("SELECT row_to_json(t) AS row FROM (SELECT * FROM get_audit_log()) t")
                .fetch_all(&pool)
                .await?;

        Ok(rows.iter().map(json_row).collect())
    }
}
