//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression,
//! tracing), and creates the axum router ready for serving.

use axum::{
    routing::{get, post, put},
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

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Event CRUD
        .route("/events", get(handlers::list_events))
        .route("/events", post(handlers::create_event))
        .route("/events/{id}", get(handlers::get_event))
        .route("/events/{id}", put(handlers::update_event))
        // Lifecycle transitions
        .route("/events/{id}/reserve", post(handlers::reserve_event))
        .route("/events/{id}/cancel", post(handlers::cancel_event))
        .route("/events/{id}/finish", post(handlers::finish_event))
        // Availability and calendar
        .route("/availability", get(handlers::check_availability))
        .route("/calendar/{year}/{month}", get(handlers::get_calendar))
        // Catalog reads
        .route("/catalog/packages", get(handlers::list_packages))
        .route("/catalog/foods", get(handlers::list_food_items))
        .route("/catalog/charges", get(handlers::list_charges))
        .route("/catalog/discounts", get(handlers::list_discounts));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
