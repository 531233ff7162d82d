use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{auth as auth_handlers, listings};
use super::state::AppState;

/// Builds the full HTTP surface over `state`
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(auth_handlers::health_check))
        // Auth routes
        .route("/api/auth/signup", post(auth_handlers::signup))
        .route("/api/auth/login", post(auth_handlers::login))
        // Listing routes
        .route(
            "/api/listings",
            post(listings::create_listing).get(listings::list_listings),
        )
        .route(
            "/api/listings/:id",
            get(listings::get_listing)
                .patch(listings::update_listing_status)
                .delete(listings::delete_listing),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
