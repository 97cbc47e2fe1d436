/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Thread Safety
 *
 * Both services are held behind `Arc` and contain only thread-safe
 * internals (shared stores behind async locks), so cloning the state
 * per request is cheap and safe.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow handlers to take
 * `State<Arc<AuthService>>` or `State<Arc<AdminService>>` directly
 * instead of the whole `AppState`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::admin::AdminService;
use crate::auth::service::AuthService;

/// Application state holding the wired services
#[derive(Clone)]
pub struct AppState {
    /// Account lifecycle and session flows
    pub auth: Arc<AuthService>,
    /// Admin-only account operations
    pub admin: Arc<AdminService>,
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<AdminService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.admin.clone()
    }
}
