//! Router configuration for the HTTP API.
//!
//! This module sets up all routes and middleware (CORS, compression,
//! tracing) and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Authentication
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        // Ingestion
        .route("/api/data", post(handlers::ingest_measurement))
        // Dashboard queries (authenticated)
        .route("/get_tray_data/{tray_number}", get(handlers::get_tray_data))
        .route(
            "/get_combined_tray_data",
            get(handlers::get_combined_tray_data),
        )
        .route(
            "/get_comparison_data",
            get(handlers::get_comparison_data),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
