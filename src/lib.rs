pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;

use axum::{
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::services::playlist_service::PlaylistService;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub service: PlaylistService,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config, service: PlaylistService) -> Self {
        Self {
            config,
            service,
            start_time: Instant::now(),
        }
    }
}

/// Build the HTTP router over the playlist service
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health endpoints
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::health::metrics))
        .route("/live", get(routes::health::live))
        // Playlist endpoints
        .route(
            "/api/playlists",
            get(routes::playlist::list_playlists)
                .post(routes::playlist::add_playlist)
                .delete(routes::playlist::clear_playlists),
        )
        .route("/api/categories", get(routes::playlist::get_categories))
        .route("/api/categories/:name", get(routes::playlist::get_category))
        .route("/api/entries", get(routes::playlist::export_entries))
        .route("/api/search", get(routes::playlist::search_entries))
        .route("/api/stats", get(routes::playlist::get_stats))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
