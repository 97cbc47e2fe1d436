/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * the route configuration, the tracing layer, and the fallback handler
 * into a single Axum router.
 */

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state carrying the auth and admin services
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    // API routes
    let router = configure_api_routes(Router::new());

    // Request/response tracing for every route
    let router = router.layer(TraceLayer::new_for_http());

    // Fallback handler for 404
    let router = router.fallback(|| async { "404 Not Found" });

    // Use AppState as router state
    router.with_state(app_state)
}
