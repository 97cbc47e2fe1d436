/**
 * Session Extraction Middleware
 *
 * This module provides the extractor for protected routes. It pulls the
 * opaque session handle out of the Authorization header; the handle is
 * validated against the session store by whichever service operation the
 * handler calls next, so the extractor itself stays stateless.
 */

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::AuthError;

/// Opaque session handle taken from `Authorization: Bearer <handle>`
///
/// Rejects with 401 when the header is missing or not in Bearer format.
/// Possession of a handle proves nothing by itself; every protected
/// operation still resolves it through the session store.
#[derive(Clone, Debug)]
pub struct BearerHandle(pub String);

impl<S> FromRequestParts<S> for BearerHandle
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                tracing::warn!("Missing Authorization header");
                AuthError::InvalidSession
            })?;

        // Extract handle (format: "Bearer <handle>")
        let handle = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            AuthError::InvalidSession
        })?;

        if handle.is_empty() {
            tracing::warn!("Empty bearer handle");
            return Err(AuthError::InvalidSession);
        }

        Ok(BearerHandle(handle.to_string()))
    }
}
