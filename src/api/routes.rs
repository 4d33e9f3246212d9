use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Creates the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog pages
        .route("/", get(handlers::catalog_page))
        .route("/search", get(handlers::search))
        // Watchlist
        .route("/watchlist/:id", post(handlers::add_to_watchlist))
        .route("/watchlist/:id/remove", post(handlers::remove_from_watchlist))
        .route("/api/watchlist", get(handlers::get_watchlist))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
