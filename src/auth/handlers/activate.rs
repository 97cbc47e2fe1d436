/**
 * Activation Handlers
 *
 * This module implements POST /api/auth/activate, which redeems a mailed
 * activation token, and POST /api/auth/resend-activation, which reissues
 * one. The resend endpoint is enumeration-safe: it answers 202 whether or
 * not the address has a pending account.
 */

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use crate::auth::handlers::types::{AcceptedResponse, ActivateRequest, EmailRequest, UserResponse};
use crate::auth::service::AuthService;
use crate::error::AuthError;

/// Account activation handler
///
/// Redeems the single-use activation token and brings the account to
/// `active`. Redemption is atomic: two concurrent requests with the same
/// token produce exactly one activation.
///
/// # Errors
///
/// * `404 Not Found` - Unknown (or superseded) token
/// * `410 Gone` - Token expired before use
/// * `409 Conflict` - Token already redeemed, or account not pending
/// * `400 Bad Request` - Token issued for a different purpose
pub async fn activate(
    State(auth): State<Arc<AuthService>>,
    Json(request): Json<ActivateRequest>,
) -> Result<Json<UserResponse>, AuthError> {
    tracing::info!("Activation request");

    let user = auth.activate(&request.token).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// Activation resend handler
///
/// Always answers `202 Accepted`. A fresh token goes out only when the
/// address belongs to a pending account; the fresh token supersedes any
/// earlier one.
pub async fn resend_activation(
    State(auth): State<Arc<AuthService>>,
    Json(request): Json<EmailRequest>,
) -> Result<(StatusCode, Json<AcceptedResponse>), AuthError> {
    tracing::info!("Activation resend request");

    auth.resend_activation(&request.email).await?;

    Ok((StatusCode::ACCEPTED, Json(AcceptedResponse::mail_on_its_way())))
}
