//! Router configuration for the web server.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use super::handlers;
use super::AppState;

/// Largest accepted request body (uploads included).
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.static_dir.clone();

    let router = Router::new()
        .route("/api/health", get(handlers::health))
        // Catalogue
        .route(
            "/api/periods",
            get(handlers::list_periods).post(handlers::create_period),
        )
        .route(
            "/api/periods/:id",
            get(handlers::get_period)
                .put(handlers::update_period)
                .delete(handlers::delete_period),
        )
        .route(
            "/api/artworks",
            get(handlers::list_artworks).post(handlers::create_artwork),
        )
        .route(
            "/api/artworks/:id",
            get(handlers::get_artwork)
                .put(handlers::update_artwork)
                .delete(handlers::delete_artwork),
        )
        .route("/api/timeline", get(handlers::timeline))
        // Extraction
        .route("/api/ai/read-doc", post(handlers::ai_read_doc))
        .route("/api/ai/extract", post(handlers::ai_extract))
        .route("/api/ai/history", get(handlers::ai_history))
        .route("/api/ai/test", post(handlers::ai_test_key))
        // Uploads and demo data
        .route("/api/upload/image", post(handlers::upload_image))
        .route("/api/seed", get(handlers::seed).post(handlers::seed));

    // SPA build, with client-side routes falling back to index.html
    let router = match static_dir {
        Some(dir) => {
            let index = dir.join("index.html");
            router.fallback_service(ServeDir::new(dir).not_found_service(ServeFile::new(index)))
        }
        None => router,
    };

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
