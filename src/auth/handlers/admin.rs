/**
 * Admin Handlers
 *
 * This module implements the admin-only account management endpoints:
 *
 * - POST /api/admin/users/{id}/disable
 * - POST /api/admin/users/{id}/enable
 * - GET  /api/admin/users/{id}/logins
 *
 * Every handler authenticates the caller's session and requires the
 * admin role before touching the target account.
 */

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use uuid::Uuid;

use crate::auth::admin::AdminService;
use crate::auth::handlers::types::LoginActivityResponse;
use crate::error::AuthError;
use crate::middleware::BearerHandle;

/// Disable an account
///
/// Cuts off the target immediately: status goes to `disabled`, every
/// session dies, and (by default) live activation/reset tokens die too.
///
/// # Errors
///
/// * `401 Unauthorized` - Caller session invalid
/// * `403 Forbidden` - Caller is not an admin
/// * `400 Bad Request` - Caller targeted their own account
/// * `404 Not Found` - No account with that id
pub async fn disable_user(
    State(admin): State<Arc<AdminService>>,
    BearerHandle(handle): BearerHandle,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AuthError> {
    tracing::info!("Admin disable request for user {}", user_id);

    admin.disable_account(&handle, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Re-enable a disabled account
///
/// # Errors
///
/// * `401 Unauthorized` - Caller session invalid
/// * `403 Forbidden` - Caller is not an admin
/// * `404 Not Found` - No account with that id
/// * `409 Conflict` - Account is pending or already active
pub async fn enable_user(
    State(admin): State<Arc<AdminService>>,
    BearerHandle(handle): BearerHandle,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AuthError> {
    tracing::info!("Admin enable request for user {}", user_id);

    admin.enable_account(&handle, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List the recorded logins of an account, oldest first
///
/// # Errors
///
/// * `401 Unauthorized` - Caller session invalid
/// * `403 Forbidden` - Caller is not an admin
/// * `404 Not Found` - No account with that id
pub async fn list_logins(
    State(admin): State<Arc<AdminService>>,
    BearerHandle(handle): BearerHandle,
    Path(user_id): Path<Uuid>,
) -> Result<Json<LoginActivityResponse>, AuthError> {
    let events = admin.list_login_activity(&handle, user_id).await?;
    Ok(Json(LoginActivityResponse::new(user_id, &events)))
}
