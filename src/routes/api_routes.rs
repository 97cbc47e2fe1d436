/**
 * API Route Handlers
 *
 * This module wires the authentication and admin endpoints onto the
 * router.
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/register` - Create a pending account
 * - `POST /api/auth/activate` - Redeem an activation token
 * - `POST /api/auth/resend-activation` - Reissue an activation token
 * - `POST /api/auth/login` - Open a session
 * - `POST /api/auth/logout` - Revoke the presented session
 * - `POST /api/auth/logout-all` - Revoke every session of the caller
 * - `GET  /api/auth/me` - Resolve the session to its user
 * - `POST /api/auth/password-reset/request` - Mail a reset token
 * - `POST /api/auth/password-reset/confirm` - Redeem a reset token
 *
 * ## Admin
 * - `POST /api/admin/users/{id}/disable` - Disable an account
 * - `POST /api/admin/users/{id}/enable` - Re-enable a disabled account
 * - `GET  /api/admin/users/{id}/logins` - List recorded logins
 */

use axum::Router;

use crate::auth::handlers::{
    activate, confirm_reset, disable_user, enable_user, get_me, list_logins, login, logout,
    logout_all, register, request_reset, resend_activation,
};
use crate::server::state::AppState;

/// Configure API routes
///
/// Public routes (register, activate, login, the mail-driven flows) sit
/// next to the session-bearing ones; the latter authenticate through the
/// bearer extractor plus the session store, not through route placement.
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Account lifecycle endpoints
        .route(
            "/api/auth/register",
            axum::routing::post(register),
        )
        .route(
            "/api/auth/activate",
            axum::routing::post(activate),
        )
        .route(
            "/api/auth/resend-activation",
            axum::routing::post(resend_activation),
        )
        // Session endpoints
        .route(
            "/api/auth/login",
            axum::routing::post(login),
        )
        .route(
            "/api/auth/logout",
            axum::routing::post(logout),
        )
        .route(
            "/api/auth/logout-all",
            axum::routing::post(logout_all),
        )
        .route(
            "/api/auth/me",
            axum::routing::get(get_me),
        )
        // Password recovery endpoints
        .route(
            "/api/auth/password-reset/request",
            axum::routing::post(request_reset),
        )
        .route(
            "/api/auth/password-reset/confirm",
            axum::routing::post(confirm_reset),
        )
        // Admin endpoints (admin role checked in the service)
        .route(
            "/api/admin/users/{id}/disable",
            axum::routing::post(disable_user),
        )
        .route(
            "/api/admin/users/{id}/enable",
            axum::routing::post(enable_user),
        )
        .route(
            "/api/admin/users/{id}/logins",
            axum::routing::get(list_logins),
        )
}
