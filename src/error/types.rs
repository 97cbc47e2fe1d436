/**
 * Auth Error Types
 *
 * This module defines the error taxonomy for the credential and token
 * lifecycle manager. Every fallible operation in the crate surfaces one of
 * these variants, and each variant maps to a stable HTTP status code.
 *
 * # Error Categories
 *
 * ## Input errors
 *
 * - `Validation` - malformed input (bad username, short password, ...)
 * - `Duplicate` - username or email already taken at registration
 *
 * ## Credential errors
 *
 * - `InvalidCredentials` - unknown identifier OR wrong password; the two
 *   cases are deliberately indistinguishable to the caller
 * - `AccountNotActive` - correct credentials, but the account is pending
 * - `AccountDisabled` - correct credentials, but the account is disabled
 *
 * ## Session errors
 *
 * - `InvalidSession` - handle unknown or revoked
 * - `ExpiredSession` - handle outlived the idle timeout
 *
 * ## Token errors
 *
 * - `TokenNotFound` - value absent or superseded by a newer token
 * - `TokenExpired` - value past its expiry timestamp
 * - `TokenPurposeMismatch` - wrong purpose for the redeeming operation
 * - `TokenAlreadyUsed` - value was redeemed before
 *
 * ## Authorization and infrastructure
 *
 * - `Forbidden` - caller is not an admin
 * - `UserNotFound` - admin operation targeting a nonexistent user
 * - `AccountState` - state transition not allowed (e.g. activating twice)
 * - `Storage` - storage-layer failure; detail is logged, the client body
 *   stays generic
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Error type for every operation in the crate
///
/// Each variant carries the context needed to build an HTTP response via
/// [`status_code`](AuthError::status_code) and
/// [`message`](AuthError::message). Security-sensitive variants keep their
/// client-facing message intentionally vague.
///
/// # Example
///
/// ```rust
/// use keyward::error::AuthError;
/// use axum::http::StatusCode;
///
/// let err = AuthError::validation("email", "Invalid email format");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.message(), "Invalid email format");
/// ```
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed input (bad username format, short password, ...)
    #[error("validation failed for {field}: {message}")]
    Validation {
        /// Which input field failed validation
        field: String,
        /// Human-readable explanation, safe to return to the client
        message: String,
    },

    /// Username or email already registered
    #[error("{field} already in use")]
    Duplicate {
        /// Which unique field collided (`username` or `email`)
        field: String,
    },

    /// Unknown identifier or wrong password
    ///
    /// The same variant covers both cases so a caller cannot probe which
    /// half of the credential pair was wrong.
    #[error("invalid username/email or password")]
    InvalidCredentials,

    /// Login attempt against an account that never activated
    #[error("account is not activated")]
    AccountNotActive,

    /// Login attempt against an administratively disabled account
    #[error("account is disabled")]
    AccountDisabled,

    /// Account state transition that is not allowed
    #[error("{message}")]
    AccountState {
        /// What was attempted and why it is illegal
        message: String,
    },

    /// Session handle is unknown or was revoked
    #[error("invalid session")]
    InvalidSession,

    /// Session handle exceeded the idle timeout
    #[error("session expired")]
    ExpiredSession,

    /// Token value is unknown (never issued, purged, or superseded)
    #[error("token not found")]
    TokenNotFound,

    /// Token value is past its expiry timestamp
    #[error("token expired")]
    TokenExpired,

    /// Token presented to an operation with a different purpose
    ///
    /// The token is left unconsumed: presenting an activation token to the
    /// reset endpoint must not burn the activation token.
    #[error("token cannot be used for this operation")]
    TokenPurposeMismatch,

    /// Token was already redeemed
    #[error("token already used")]
    TokenAlreadyUsed,

    /// Caller's session resolved to a non-admin user
    #[error("admin privileges required")]
    Forbidden,

    /// Admin operation targeting a user id that does not exist
    #[error("user not found")]
    UserNotFound,

    /// Storage-layer failure
    ///
    /// The detail in `message` is for logs only; `message()` returns a
    /// generic body so infrastructure internals never reach clients.
    #[error("storage failure: {message}")]
    Storage {
        /// Internal detail, logged but never sent to the client
        message: String,
    },
}

impl AuthError {
    /// Create a validation error for a named input field
    ///
    /// # Arguments
    ///
    /// * `field` - The input field that failed validation
    /// * `message` - Client-safe explanation
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate error for a unique field (`username` or `email`)
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }

    /// Create an account-state error for an illegal transition
    pub fn account_state(message: impl Into<String>) -> Self {
        Self::AccountState {
            message: message.into(),
        }
    }

    /// Create a storage error carrying internal detail
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation`, `TokenPurposeMismatch` - 400 Bad Request
    /// - `InvalidCredentials`, `InvalidSession`, `ExpiredSession` - 401 Unauthorized
    /// - `AccountNotActive`, `AccountDisabled`, `Forbidden` - 403 Forbidden
    /// - `TokenNotFound`, `UserNotFound` - 404 Not Found
    /// - `Duplicate`, `AccountState`, `TokenAlreadyUsed` - 409 Conflict
    /// - `TokenExpired` - 410 Gone
    /// - `Storage` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Duplicate { .. } => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::AccountNotActive => StatusCode::FORBIDDEN,
            Self::AccountDisabled => StatusCode::FORBIDDEN,
            Self::AccountState { .. } => StatusCode::CONFLICT,
            Self::InvalidSession => StatusCode::UNAUTHORIZED,
            Self::ExpiredSession => StatusCode::UNAUTHORIZED,
            Self::TokenNotFound => StatusCode::NOT_FOUND,
            Self::TokenExpired => StatusCode::GONE,
            Self::TokenPurposeMismatch => StatusCode::BAD_REQUEST,
            Self::TokenAlreadyUsed => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    ///
    /// For `Storage` this is a generic string; the internal detail only
    /// appears in logs.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Storage { .. } => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}
