/**
 * Current User Handler
 *
 * This module implements the handler for GET /api/auth/me, which resolves
 * the presented session handle to its owning user. The lookup slides the
 * session's idle window forward.
 */

use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;

use crate::auth::handlers::types::UserResponse;
use crate::auth::service::AuthService;
use crate::error::AuthError;
use crate::middleware::BearerHandle;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - Handle missing, unknown, revoked, or idle-expired
pub async fn get_me(
    State(auth): State<Arc<AuthService>>,
    BearerHandle(handle): BearerHandle,
) -> Result<Json<UserResponse>, AuthError> {
    let user = auth.current_user(&handle).await?;
    Ok(Json(UserResponse::from(&user)))
}
