#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use music_library_api::app::{app, AppState};
use music_library_api::auth;
use music_library_api::database::manager::DatabaseError;
use music_library_api::database::models::user::AccountRow;
use music_library_api::database::operations::DataOps;

// Seeded fixture ids
pub const ALICE: i32 = 1;
pub const BOB: i32 = 2;
pub const CAROL_ADMIN: i32 = 3;
pub const DAVE_INACTIVE: i32 = 4;

pub struct FakeUser {
    pub account: AccountRow,
    pub password: String,
    pub active: bool,
}

pub struct FakeTrack {
    pub track_id: i32,
    pub user_id: i32,
    pub title: String,
    pub artist_id: i32,
    pub genre_id: i32,
    pub bpm: Option<i32>,
    pub duration_sec: Option<i32>,
}

pub struct FakeCollection {
    pub collection_id: i32,
    pub user_id: i32,
    pub name: String,
    pub is_favorite: bool,
    pub track_ids: Vec<i32>,
}

/// In-memory stand-in for the stored-procedure layer. Every call is recorded
/// so tests can assert that a rejected request never reached the store.
pub struct FakeOps {
    users: Mutex<Vec<FakeUser>>,
    genres: Mutex<Vec<(i32, String)>>,
    artists: Mutex<Vec<(i32, String)>>,
    tracks: Mutex<Vec<FakeTrack>>,
    collections: Mutex<Vec<FakeCollection>>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeOps {
    pub fn seeded() -> Arc<Self> {
        let user = |id: i32, login: &str, admin: bool, active: bool| FakeUser {
            account: AccountRow {
                user_id: id,
                login: login.to_string(),
                first_name: Some(login.to_string()),
                last_name: Some("Tester".to_string()),
                email: Some(format!("{}@example.com", login)),
                avatar_url: None,
                is_admin: admin,
            },
            password: format!("{}-pass", login),
            active,
        };

        Arc::new(Self {
            users: Mutex::new(vec![
                user(ALICE, "alice", false, true),
                user(BOB, "bob", false, true),
                user(CAROL_ADMIN, "carol", true, true),
                user(DAVE_INACTIVE, "dave", false, false),
            ]),
            genres: Mutex::new(vec![(1, "House".to_string()), (2, "Electro".to_string())]),
            artists: Mutex::new(vec![
                (1, "Daft Punk".to_string()),
                (2, "Kraftwerk".to_string()),
            ]),
            tracks: Mutex::new(vec![
                FakeTrack {
                    track_id: 1,
                    user_id: ALICE,
                    title: "Da Funk".to_string(),
                    artist_id: 1,
                    genre_id: 1,
                    bpm: Some(111),
                    duration_sec: Some(329),
                },
                FakeTrack {
                    track_id: 2,
                    user_id: BOB,
                    title: "The Model".to_string(),
                    artist_id: 2,
                    genre_id: 2,
                    bpm: Some(123),
                    duration_sec: Some(219),
                },
            ]),
            collections: Mutex::new(vec![
                FakeCollection {
                    collection_id: 1,
                    user_id: ALICE,
                    name: "Morning Mix".to_string(),
                    is_favorite: false,
                    track_ids: vec![1],
                },
                FakeCollection {
                    collection_id: 2,
                    user_id: BOB,
                    name: "Robots".to_string(),
                    is_favorite: true,
                    track_ids: vec![2],
                },
            ]),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn record(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_active(&self, user_id: i32, active: bool) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.account.user_id == user_id) {
            user.active = active;
        }
    }

    pub fn has_track(&self, track_id: i32) -> bool {
        self.tracks
            .lock()
            .unwrap()
            .iter()
            .any(|t| t.track_id == track_id)
    }

    pub fn track_title(&self, track_id: i32) -> Option<String> {
        self.tracks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.track_id == track_id)
            .map(|t| t.title.clone())
    }

    pub fn collection_tracks(&self, collection_id: i32) -> Vec<i32> {
        self.collections
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.collection_id == collection_id)
            .map(|c| c.track_ids.clone())
            .unwrap_or_default()
    }

    fn track_json(track: &FakeTrack) -> Value {
        json!({
            "track_id": track.track_id,
            "user_id": track.user_id,
            "title": track.title,
            "artist_id": track.artist_id,
            "genre_id": track.genre_id,
            "bpm": track.bpm,
            "duration_sec": track.duration_sec,
        })
    }

    fn collection_json(collection: &FakeCollection) -> Value {
        json!({
            "collection_id": collection.collection_id,
            "user_id": collection.user_id,
            "name": collection.name,
            "is_favorite": collection.is_favorite,
            "track_count": collection.track_ids.len(),
        })
    }
}

#[async_trait]
impl DataOps for FakeOps {
    async fn authenticate_user(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<AccountRow>, DatabaseError> {
        self.record("authenticate_user");
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.account.login == login && u.password == password && u.active)
            .map(|u| u.account.clone()))
    }

    async fn register_user(
        &self,
        login: &str,
        password: &str,
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<AccountRow>, DatabaseError> {
        self.record("register_user");
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.account.login == login) {
            return Ok(None);
        }

        let user_id = users.iter().map(|u| u.account.user_id).max().unwrap_or(0) + 1;
        let account = AccountRow {
            user_id,
            login: login.to_string(),
            first_name: first_name.map(str::to_string),
            last_name: last_name.map(str::to_string),
            email: email.map(str::to_string),
            avatar_url: None,
            is_admin: false,
        };
        users.push(FakeUser {
            account: account.clone(),
            password: password.to_string(),
            active: true,
        });
        Ok(Some(account))
    }

    async fn find_active_user(&self, user_id: i32) -> Result<Option<AccountRow>, DatabaseError> {
        self.record("find_active_user");
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.account.user_id == user_id && u.active)
            .map(|u| u.account.clone()))
    }

    async fn get_user_profile(&self, user_id: i32) -> Result<Option<Value>, DatabaseError> {
        self.record("get_user_profile");
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.account.user_id == user_id && u.active)
            .map(|u| {
                json!({
                    "user_id": u.account.user_id,
                    "login": u.account.login,
                    "first_name": u.account.first_name,
                    "last_name": u.account.last_name,
                    "email": u.account.email,
                    "avatar_url": u.account.avatar_url,
                })
            }))
    }

    async fn get_user_favorite_genres(&self, _user_id: i32) -> Result<Vec<Value>, DatabaseError> {
        self.record("get_user_favorite_genres");
        Ok(vec![json!({ "genre_id": 1, "name": "House" })])
    }

    async fn get_user_favorite_artists(&self, _user_id: i32) -> Result<Vec<Value>, DatabaseError> {
        self.record("get_user_favorite_artists");
        Ok(vec![json!({ "artist_id": 1, "name": "Daft Punk" })])
    }

    async fn update_user_profile(
        &self,
        user_id: i32,
        first_name: Option<&str>,
        last_name: Option<&str>,
        email: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<bool, DatabaseError> {
        self.record("update_user_profile");
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.account.user_id == user_id) {
            Some(user) => {
                if first_name.is_some() {
                    user.account.first_name = first_name.map(str::to_string);
                }
                if last_name.is_some() {
                    user.account.last_name = last_name.map(str::to_string);
                }
                if email.is_some() {
                    user.account.email = email.map(str::to_string);
                }
                if avatar_url.is_some() {
                    user.account.avatar_url = avatar_url.map(str::to_string);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_all_genres(&self) -> Result<Vec<Value>, DatabaseError> {
        self.record("get_all_genres");
        let genres = self.genres.lock().unwrap();
        Ok(genres
            .iter()
            .map(|(id, name)| json!({ "genre_id": id, "name": name }))
            .collect())
    }

    async fn get_all_artists(&self) -> Result<Vec<Value>, DatabaseError> {
        self.record("get_all_artists");
        let artists = self.artists.lock().unwrap();
        Ok(artists
            .iter()
            .map(|(id, name)| json!({ "artist_id": id, "name": name }))
            .collect())
    }

    async fn add_artist(&self, name: &str) -> Result<Option<Value>, DatabaseError> {
        self.record("add_artist");
        let mut artists = self.artists.lock().unwrap();
        let artist_id = artists.iter().map(|(id, _)| *id).max().unwrap_or(0) + 1;
        artists.push((artist_id, name.to_string()));
        Ok(Some(json!({ "artist_id": artist_id, "name": name })))
    }

    async fn update_artist(&self, artist_id: i32, name: &str) -> Result<bool, DatabaseError> {
        self.record("update_artist");
        let mut artists = self.artists.lock().unwrap();
        match artists.iter_mut().find(|(id, _)| *id == artist_id) {
            Some(entry) => {
                entry.1 = name.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_artist(&self, artist_id: i32) -> Result<bool, DatabaseError> {
        self.record("delete_artist");
        let mut artists = self.artists.lock().unwrap();
        let before = artists.len();
        artists.retain(|(id, _)| *id != artist_id);
        Ok(artists.len() < before)
    }

    async fn get_user_tracks(&self, user_id: i32) -> Result<Vec<Value>, DatabaseError> {
        self.record("get_user_tracks");
        let tracks = self.tracks.lock().unwrap();
        Ok(tracks
            .iter()
            .filter(|t| t.user_id == user_id)
            .map(Self::track_json)
            .collect())
    }

    async fn get_all_tracks_admin(&self) -> Result<Vec<Value>, DatabaseError> {
        self.record("get_all_tracks_admin");
        let tracks = self.tracks.lock().unwrap();
        Ok(tracks.iter().map(Self::track_json).collect())
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
        self.record("add_track");
        let mut tracks = self.tracks.lock().unwrap();
        let track_id = tracks.iter().map(|t| t.track_id).max().unwrap_or(0) + 1;
        let track = FakeTrack {
            track_id,
            user_id,
            title: title.to_string(),
            artist_id,
            genre_id,
            bpm,
            duration_sec,
        };
        let row = Self::track_json(&track);
        tracks.push(track);
        Ok(Some(row))
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
        self.record("update_track");
        let mut tracks = self.tracks.lock().unwrap();
        match tracks.iter_mut().find(|t| t.track_id == track_id) {
            Some(track) => {
                track.title = title.to_string();
                track.artist_id = artist_id;
                track.genre_id = genre_id;
                track.bpm = bpm;
                track.duration_sec = duration_sec;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_track(&self, track_id: i32) -> Result<bool, DatabaseError> {
        self.record("delete_track");
        let mut tracks = self.tracks.lock().unwrap();
        let before = tracks.len();
        tracks.retain(|t| t.track_id != track_id);
        Ok(tracks.len() < before)
    }

    async fn track_owner(&self, track_id: i32) -> Result<Option<i32>, DatabaseError> {
        self.record("track_owner");
        let tracks = self.tracks.lock().unwrap();
        Ok(tracks
            .iter()
            .find(|t| t.track_id == track_id)
            .map(|t| t.user_id))
    }

    async fn get_user_collections(&self, user_id: i32) -> Result<Vec<Value>, DatabaseError> {
        self.record("get_user_collections");
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .iter()
            .filter(|c| c.user_id == user_id)
            .map(Self::collection_json)
            .collect())
    }

    async fn create_collection(
        &self,
        user_id: i32,
        name: &str,
        is_favorite: bool,
    ) -> Result<Option<Value>, DatabaseError> {
        self.record("create_collection");
        let mut collections = self.collections.lock().unwrap();
        let collection_id = collections.iter().map(|c| c.collection_id).max().unwrap_or(0) + 1;
        let collection = FakeCollection {
            collection_id,
            user_id,
            name: name.to_string(),
            is_favorite,
            track_ids: Vec::new(),
        };
        let row = Self::collection_json(&collection);
        collections.push(collection);
        Ok(Some(row))
    }

    async fn update_collection(
        &self,
        collection_id: i32,
        name: &str,
        is_favorite: Option<bool>,
    ) -> Result<bool, DatabaseError> {
        self.record("update_collection");
        let mut collections = self.collections.lock().unwrap();
        match collections.iter_mut().find(|c| c.collection_id == collection_id) {
            Some(collection) => {
                collection.name = name.to_string();
                if let Some(fav) = is_favorite {
                    collection.is_favorite = fav;
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_collection(&self, collection_id: i32) -> Result<bool, DatabaseError> {
        self.record("delete_collection");
        let mut collections = self.collections.lock().unwrap();
        let before = collections.len();
        collections.retain(|c| c.collection_id != collection_id);
        Ok(collections.len() < before)
    }

    async fn collection_owner(&self, collection_id: i32) -> Result<Option<i32>, DatabaseError> {
        self.record("collection_owner");
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .iter()
            .find(|c| c.collection_id == collection_id)
            .map(|c| c.user_id))
    }

    async fn add_track_to_collection(
        &self,
        collection_id: i32,
        track_id: i32,
    ) -> Result<bool, DatabaseError> {
        self.record("add_track_to_collection");
        let mut collections = self.collections.lock().unwrap();
        match collections.iter_mut().find(|c| c.collection_id == collection_id) {
            Some(collection) => {
                if !collection.track_ids.contains(&track_id) {
                    collection.track_ids.push(track_id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove_track_from_collection(
        &self,
        collection_id: i32,
        track_id: i32,
    ) -> Result<bool, DatabaseError> {
        self.record("remove_track_from_collection");
        let mut collections = self.collections.lock().unwrap();
        match collections.iter_mut().find(|c| c.collection_id == collection_id) {
            Some(collection) => {
                let before = collection.track_ids.len();
                collection.track_ids.retain(|id| *id != track_id);
                Ok(collection.track_ids.len() < before)
            }
            None => Ok(false),
        }
    }

    async fn search_tracks(
        &self,
        title: Option<&str>,
        artist: Option<&str>,
        genre_id: Option<i32>,
        bpm: Option<i32>,
        duration: Option<i32>,
    ) -> Result<Vec<Value>, DatabaseError> {
        self.record("search_tracks");
        let artists = self.artists.lock().unwrap();
        let artist_name = |id: i32| {
            artists
                .iter()
                .find(|(aid, _)| *aid == id)
                .map(|(_, name)| name.clone())
                .unwrap_or_default()
        };

        let tracks = self.tracks.lock().unwrap();
        Ok(tracks
            .iter()
            .filter(|t| {
                title
                    .map(|q| t.title.to_lowercase().contains(&q.to_lowercase()))
                    .unwrap_or(true)
                    && artist
                        .map(|q| {
                            artist_name(t.artist_id)
                                .to_lowercase()
                                .contains(&q.to_lowercase())
                        })
                        .unwrap_or(true)
                    && genre_id.map(|g| t.genre_id == g).unwrap_or(true)
                    && bpm.map(|b| t.bpm == Some(b)).unwrap_or(true)
                    && duration.map(|d| t.duration_sec == Some(d)).unwrap_or(true)
            })
            .map(Self::track_json)
            .collect())
    }

    async fn get_all_users_admin(&self) -> Result<Vec<Value>, DatabaseError> {
        self.record("get_all_users_admin");
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .map(|u| {
                json!({
                    "user_id": u.account.user_id,
                    "login": u.account.login,
                    "email": u.account.email,
                    "is_admin": u.account.is_admin,
                    "is_active": u.active,
                })
            })
            .collect())
    }

    async fn get_audit_log(&self) -> Result<Vec<Value>, DatabaseError> {
        self.record("get_audit_log");
        Ok(vec![
            json!({ "audit_id": 1, "action": "login", "user_id": ALICE }),
            json!({ "audit_id": 2, "action": "add_track", "user_id": BOB }),
        ])
    }
}

/// Build the full router against a fake store
pub fn test_app(ops: Arc<FakeOps>) -> Router {
    app(AppState { ops })
}

/// Issue a real token for a seeded user, exactly as login would
pub fn token_for(user_id: i32) -> String {
    auth::issue_token(user_id).expect("token issuance")
}

/// Like `request`, but with a verbatim Authorization header value (for
/// malformed-header cases the Bearer formatting would paper over)
pub async fn request_with_auth_header(
    app: &Router,
    method: &str,
    uri: &str,
    header_value: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", header_value)
        .body(Body::empty())
        .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, value)
}

/// Drive one request through the router and decode the JSON response
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };

    (status, value)
}
