/**
 * Login Handler
 *
 * This module implements the handler for POST /api/auth/login, which
 * authenticates a user by username or email and opens a session.
 *
 * # Security
 *
 * - unknown identifier and wrong password return the same 401 body
 * - account status (pending/disabled) is reported only after the
 *   password verified
 * - the session handle in the response is the only copy the server ever
 *   sends; it travels back as `Authorization: Bearer <handle>`
 */

use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;

use crate::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::auth::service::AuthService;
use crate::error::AuthError;

/// User login handler
///
/// # Arguments
///
/// * `State(auth)` - Auth service
/// * `Json(request)` - Login request with identifier and password
///
/// # Returns
///
/// `200 OK` with the session handle and user info
///
/// # Errors
///
/// * `401 Unauthorized` - Unknown identifier or wrong password
/// * `403 Forbidden` - Account pending activation or disabled
///
/// # Example Request
///
/// ```json
/// {
///   "identifier": "alice@example.com",
///   "password": "correct-horse-battery"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "session": "4f2a9c...64 hex chars...",
///   "user": {
///     "id": "123e4567-e89b-12d3-a456-426614174000",
///     "username": "alice",
///     "email": "alice@example.com",
///     "role": "standard",
///     "status": "active"
///   }
/// }
/// ```
pub async fn login(
    State(auth): State<Arc<AuthService>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    tracing::info!("Login request for identifier: {}", request.identifier);

    let (session, user) = auth.login(&request.identifier, &request.password).await?;

    Ok(Json(AuthResponse {
        session,
        user: UserResponse::from(&user),
    }))
}
