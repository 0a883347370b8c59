use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::database::operations::DataOps;
use crate::handlers::elevated;
use crate::middleware::{
    token_auth_middleware, validate_admin_middleware, validate_user_middleware,
};

/// Process-wide immutable state: the store adapter behind its trait, so the
/// whole router runs against a fake in tests
#[derive(Clone)]
pub struct AppState {
    pub ops: Arc<dyn DataOps>,
}

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/api/health", get(health))
        // Public auth routes
        .merge(auth_public_routes(state.clone()))
        // Protected API (token + live principal)
        .merge(api_routes(state.clone()))
        // Admin views (token + admin gate)
        .merge(admin_routes(state));

    let router = if config::config().security.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

fn auth_public_routes(state: AppState) -> Router {
    use crate::handlers::public::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .with_state(state)
}

fn api_routes(state: AppState) -> Router {
    use axum::routing::{delete, put};
    use crate::handlers::protected::{artists, collections, genres, profile, search, tracks};

    Router::new()
        .route("/api/profile", get(profile::get).put(profile::update))
        .route("/api/genres", get(genres::list))
        .route("/api/artists", get(artists::list).post(artists::create))
        .route(
            "/api/artists/:artist_id",
            put(artists::update).delete(artists::remove),
        )
        .route("/api/tracks", get(tracks::list).post(tracks::create))
        .route(
            "/api/tracks/:track_id",
            put(tracks::update).delete(tracks::remove),
        )
        .route(
            "/api/collections",
            get(collections::list).post(collections::create),
        )
        .route(
            "/api/collections/:collection_id",
            put(collections::update).delete(collections::remove),
        )
        .route(
            "/api/collections/:collection_id/tracks",
            post(collections::add_track),
        )
        .route(
            "/api/collections/:collection_id/tracks/:track_id",
            delete(collections::remove_track),
        )
        .route("/api/search/tracks", get(search::tracks))
        // Innermost first: token verification runs, then the live principal
        // lookup, then the handler
        .layer(from_fn_with_state(state.clone(), validate_user_middleware))
        .layer(from_fn(token_auth_middleware))
        .with_state(state)
}

fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/admin/users", get(elevated::users::list))
        .route("/api/admin/tracks", get(elevated::tracks::list))
        .route("/api/admin/audit", get(elevated::audit::list))
        .layer(from_fn_with_state(state.clone(), validate_admin_middleware))
        .layer(from_fn(token_auth_middleware))
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Music Library API",
        "version": version,
        "description": "REST API gateway for a personal music library",
        "endpoints": {
            "health": "/api/health (public)",
            "auth": "/api/auth/login, /api/auth/register (public)",
            "profile": "/api/profile (token required)",
            "catalog": "/api/genres, /api/artists[/:id] (token required)",
            "tracks": "/api/tracks[/:id], /api/search/tracks (token required)",
            "collections": "/api/collections[/:id][/tracks[/:track_id]] (token required)",
            "admin": "/api/admin/users, /api/admin/tracks, /api/admin/audit (admin token required)",
        }
    }))
}

/// Liveness only: no store round trip, so this answers even when the
/// database is down
async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
    }))
}
