/**
 * Request and Response Types
 *
 * This module defines the wire types shared by the authentication and
 * admin handlers. Response types never carry the password hash; `User`
 * is mapped through `UserResponse` before anything leaves the server.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::users::{AccountStatus, Role, User};
use crate::store::LoginEvent;

/// Registration request payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Activation request payload
#[derive(Debug, Deserialize)]
pub struct ActivateRequest {
    pub token: String,
}

/// Login request payload
///
/// `identifier` is a username or an email address; the server resolves
/// either.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Payload for the flows addressed by email only (reset request,
/// activation resend)
#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// Password reset confirmation payload
#[derive(Debug, Deserialize)]
pub struct ResetConfirmRequest {
    pub token: String,
    pub new_password: String,
}

/// User information response (no sensitive data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub status: AccountStatus,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            status: user.status,
        }
    }
}

/// Successful login response: the opaque session handle plus the user
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub session: String,
    pub user: UserResponse,
}

/// Body for the always-accepted flows; deliberately identical whether or
/// not anything was mailed
#[derive(Debug, Serialize, Deserialize)]
pub struct AcceptedResponse {
    pub message: String,
}

impl AcceptedResponse {
    pub fn mail_on_its_way() -> Self {
        Self {
            message: "If the address has a matching account, mail is on its way".to_string(),
        }
    }
}

/// Login audit listing for the admin surface
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginActivityResponse {
    pub user_id: Uuid,
    pub count: usize,
    pub logins: Vec<DateTime<Utc>>,
}

impl LoginActivityResponse {
    pub fn new(user_id: Uuid, events: &[LoginEvent]) -> Self {
        Self {
            user_id,
            count: events.len(),
            logins: events.iter().map(|event| event.at).collect(),
        }
    }
}
