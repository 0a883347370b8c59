use std::sync::Arc;

use music_library_api::app::{app, AppState};
use music_library_api::config;
use music_library_api::database::PgDataOps;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, SECRET_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Music Library API in {:?} mode", config.environment);

    let state = AppState {
        ops: Arc::new(PgDataOps::new()),
    };
    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("MUSIC_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(5000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Music Library API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
