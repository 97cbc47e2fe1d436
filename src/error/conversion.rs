/**
 * Error Conversion
 *
 * This module provides conversion implementations for auth errors: the
 * axum `IntoResponse` impl used by every HTTP handler, and the mapping
 * from storage-layer errors into the domain taxonomy.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 *
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 *
 * Storage failures log their detail server-side and render a generic body.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::error::types::AuthError;
use crate::store::StoreError;

impl IntoResponse for AuthError {
    /// Convert an auth error into an HTTP response
    ///
    /// The response body carries the client-safe message from
    /// [`AuthError::message`] and the numeric status code. Storage failures
    /// are logged here with their internal detail, everything else at debug
    /// level since the handlers already log the interesting branches.
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::debug!("request rejected ({}): {}", status.as_u16(), self);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

/// Map storage-layer errors into the domain taxonomy
///
/// Duplicates become `Duplicate` errors (the store is the authority on
/// uniqueness). A `NotFound` reaching this conversion means a record vanished
/// mid-operation, which the stores do not allow for the call sites that use
/// `?`; it is treated as a storage inconsistency. Call sites where absence is
/// an expected outcome match on `StoreError` explicitly instead.
impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => AuthError::duplicate("username"),
            StoreError::DuplicateEmail => AuthError::duplicate("email"),
            StoreError::NotFound => AuthError::storage("record unexpectedly missing"),
            StoreError::Backend { message } => AuthError::storage(message),
        }
    }
}
