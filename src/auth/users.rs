/**
 * User Model
 *
 * This module defines the user data model: the `User` record itself plus the
 * `Role` and `AccountStatus` enums that drive authorization and the account
 * lifecycle.
 *
 * # Account Lifecycle
 *
 * ```text
 * register() ──> Pending ──activate()──> Active ──disable_account()──> Disabled
 *                                          ^                              │
 *                                          └────────enable_account()──────┘
 * ```
 *
 * Accounts are never physically deleted; `Disabled` is the terminal "gone"
 * state and can be reversed by an admin. Only `Active` accounts can log in.
 *
 * # Security
 *
 * The `password_hash` field never leaves the crate: `User` deliberately does
 * not implement `Serialize`, and its `Debug` impl redacts the hash so it
 * cannot leak through logs. API responses use `UserResponse` instead.
 */

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User role, a closed set
///
/// `Admin` unlocks the account-administration operations
/// (disable/enable/login history). Everything else is `Standard`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular user with no administrative rights
    Standard,
    /// User allowed to manage other accounts
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Standard => write!(f, "standard"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Account status, a closed set
///
/// New registrations start in `Pending` until the activation token is
/// redeemed. Admins can toggle `Active` and `Disabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Registered but never activated; cannot log in yet
    Pending,
    /// Fully usable account
    Active,
    /// Administratively locked out; cannot log in
    Disabled,
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Pending => write!(f, "pending"),
            AccountStatus::Active => write!(f, "active"),
            AccountStatus::Disabled => write!(f, "disabled"),
        }
    }
}

/// A stored user record
///
/// `username` and `email` are unique across the store. The record carries
/// the bcrypt password hash; it is compared exclusively through
/// `PasswordHasher::verify` and never serialized outward.
#[derive(Clone)]
pub struct User {
    /// Unique user id, assigned by the store on insert
    pub id: Uuid,
    /// Unique username (3-30 chars, letter first, alphanumeric + underscore)
    pub username: String,
    /// Unique email address
    pub email: String,
    /// bcrypt digest of the password; never exposed
    pub password_hash: String,
    /// Authorization role
    pub role: Role,
    /// Lifecycle status
    pub status: AccountStatus,
    /// When the record was inserted
    pub created_at: DateTime<Utc>,
    /// Last mutation (status change, password change)
    pub updated_at: DateTime<Utc>,
}

// Hand-written so the password hash cannot end up in debug logs.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("role", &self.role)
            .field("status", &self.status)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl User {
    /// Whether this user may call the admin operations
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Input for inserting a new user record
///
/// The store assigns the id and timestamps, mirroring a SQL backend where
/// the database generates both.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub status: AccountStatus,
}
