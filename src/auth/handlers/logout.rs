/**
 * Logout Handlers
 *
 * POST /api/auth/logout revokes the presented session; POST
 * /api/auth/logout-all revokes every session of the caller. Single
 * logout is idempotent and answers 204 even for an already dead handle.
 */

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;

use crate::auth::service::AuthService;
use crate::error::AuthError;
use crate::middleware::BearerHandle;

/// Session logout handler; always `204 No Content`
pub async fn logout(
    State(auth): State<Arc<AuthService>>,
    BearerHandle(handle): BearerHandle,
) -> Result<StatusCode, AuthError> {
    auth.logout(&handle).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Logout-everywhere handler
///
/// The presented handle must still be live; it authenticates the request
/// and then dies with all its siblings.
pub async fn logout_all(
    State(auth): State<Arc<AuthService>>,
    BearerHandle(handle): BearerHandle,
) -> Result<StatusCode, AuthError> {
    auth.logout_everywhere(&handle).await?;
    Ok(StatusCode::NO_CONTENT)
}
