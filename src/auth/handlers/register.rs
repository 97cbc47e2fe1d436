/**
 * Registration Handler
 *
 * This module implements the handler for POST /api/auth/register. A new
 * account starts in the pending state; the activation token leaves by
 * mail only, so the HTTP response carries the user but never the token.
 */

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use crate::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::auth::service::AuthService;
use crate::error::AuthError;

/// User registration handler
///
/// # Arguments
///
/// * `State(auth)` - Auth service
/// * `Json(request)` - Registration request with username, email, password
///
/// # Returns
///
/// `201 Created` with the new user (pending, standard role)
///
/// # Errors
///
/// * `400 Bad Request` - Invalid username/email/password format
/// * `409 Conflict` - Username or email already registered
///
/// # Example Request
///
/// ```json
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "correct-horse-battery"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "id": "123e4567-e89b-12d3-a456-426614174000",
///   "username": "alice",
///   "email": "alice@example.com",
///   "role": "standard",
///   "status": "pending"
/// }
/// ```
pub async fn register(
    State(auth): State<Arc<AuthService>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AuthError> {
    tracing::info!(
        "Registration request for username: {}, email: {}",
        request.username,
        request.email
    );

    let user = auth
        .register(&request.username, &request.email, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}
