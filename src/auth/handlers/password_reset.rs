/**
 * Password Reset Handlers
 *
 * This module implements the two halves of the recovery flow:
 * POST /api/auth/password-reset/request mails a reset token, and
 * POST /api/auth/password-reset/confirm redeems it.
 *
 * # Security
 *
 * - the request endpoint answers 202 with an identical body whether or
 *   not the address has an active account, so it cannot be used to
 *   enumerate users
 * - confirmation revokes every session of the user before the 204 goes
 *   out; a stolen session does not survive a password reset
 */

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use crate::auth::handlers::types::{AcceptedResponse, EmailRequest, ResetConfirmRequest};
use crate::auth::service::AuthService;
use crate::error::AuthError;

/// Reset request handler; always `202 Accepted`
pub async fn request_reset(
    State(auth): State<Arc<AuthService>>,
    Json(request): Json<EmailRequest>,
) -> Result<(StatusCode, Json<AcceptedResponse>), AuthError> {
    tracing::info!("Password reset request");

    auth.request_password_reset(&request.email).await?;

    Ok((StatusCode::ACCEPTED, Json(AcceptedResponse::mail_on_its_way())))
}

/// Reset confirmation handler
///
/// # Errors
///
/// * `400 Bad Request` - New password fails the strength policy (the
///   token is not consumed)
/// * `404 Not Found` - Unknown or superseded token
/// * `410 Gone` - Token expired before use
/// * `409 Conflict` - Token already redeemed
pub async fn confirm_reset(
    State(auth): State<Arc<AuthService>>,
    Json(request): Json<ResetConfirmRequest>,
) -> Result<StatusCode, AuthError> {
    tracing::info!("Password reset confirmation");

    auth.reset_password(&request.token, &request.new_password)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
