//! Store Module
//!
//! This module defines the storage abstraction the rest of the crate is
//! built against: one trait per record family (users, sessions, tokens)
//! plus the record types they persist. The real storage engine lives
//! outside this crate; services receive the traits as injected
//! `Arc<dyn ...>` values, which is also what lets tests substitute the
//! in-memory implementations in [`memory`].
//!
//! # Architecture
//!
//! - **`UserStore`** - user records, uniqueness enforcement, login audit log
//! - **`SessionStore`** - session records keyed by their opaque handle
//! - **`TokenStore`** - single-use tokens keyed by their opaque value, with
//!   an atomic claim operation
//!
//! # Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs    - Traits, record types, StoreError
//! └── memory.rs - In-memory reference implementations
//! ```
//!
//! # Atomicity Contract
//!
//! Two operations carry atomicity requirements that implementations must
//! honor regardless of backend:
//!
//! - `UserStore::insert_user` checks username/email uniqueness and inserts
//!   in one step, so two concurrent registrations of the same name cannot
//!   both succeed.
//! - `TokenStore::claim` evaluates a token and marks it consumed in one
//!   step, so concurrent redemptions of the same value have exactly one
//!   winner.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::tokens::TokenPurpose;
use crate::auth::users::{AccountStatus, NewUser, User};

/// In-memory reference implementations
pub mod memory;

// Re-export commonly used types
pub use memory::{MemorySessionStore, MemoryTokenStore, MemoryUserStore};

/// Storage-layer error
///
/// `NotFound` and the duplicate variants are semantic outcomes the services
/// translate into domain errors; `Backend` is genuine infrastructure failure
/// and surfaces as `AuthError::Storage`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The addressed record does not exist
    #[error("record not found")]
    NotFound,
    /// Username uniqueness violated on insert
    #[error("username already taken")]
    DuplicateUsername,
    /// Email uniqueness violated on insert
    #[error("email already registered")]
    DuplicateEmail,
    /// The backend itself failed (connection loss, corruption, ...)
    #[error("storage backend failure: {message}")]
    Backend { message: String },
}

/// A stored session record
///
/// `handle` is the opaque value the client holds; possession of the handle
/// is possession of the session. `last_seen` advances on every successful
/// validation, giving the sliding idle window.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// Opaque unguessable handle (32 random bytes, hex)
    pub handle: String,
    /// Owning user
    pub user_id: Uuid,
    /// When the session was created
    pub issued_at: DateTime<Utc>,
    /// Last successful validation
    pub last_seen: DateTime<Utc>,
}

/// A stored single-use token record
#[derive(Debug, Clone)]
pub struct TokenRecord {
    /// Opaque unguessable value (32 random bytes, hex)
    pub value: String,
    /// User the token is bound to
    pub user_id: Uuid,
    /// What the token may be redeemed for
    pub purpose: TokenPurpose,
    /// When the token was issued
    pub issued_at: DateTime<Utc>,
    /// Hard expiry; the token is dead past this instant
    pub expires_at: DateTime<Utc>,
    /// Set exactly once, by the winning claim
    pub used_at: Option<DateTime<Utc>>,
}

/// One successful login, as recorded in the audit log
#[derive(Debug, Clone, Serialize)]
pub struct LoginEvent {
    /// User who logged in
    pub user_id: Uuid,
    /// When the login succeeded
    pub at: DateTime<Utc>,
}

/// Outcome of a token claim attempt
///
/// Only `Claimed` mutates the store; every other outcome leaves the token
/// exactly as it was (a purpose mismatch must not burn the token).
#[derive(Debug)]
pub enum TokenClaim {
    /// This call consumed the token; the record is returned as it was
    /// immediately before consumption
    Claimed(TokenRecord),
    /// No token with that value exists (never issued, superseded, purged)
    Missing,
    /// The token was consumed by an earlier claim
    AlreadyUsed,
    /// The token is past its expiry (the store may evict it)
    Expired,
    /// The stored purpose differs from the requested one
    PurposeMismatch,
}

/// User record storage
///
/// Uniqueness of username and email is enforced here, atomically with the
/// insert. The store also owns the login audit log: the auth service reports
/// successful logins through `record_login`, and the admin operations read
/// them back through `login_activity`.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user, enforcing username/email uniqueness atomically
    ///
    /// # Errors
    ///
    /// `DuplicateUsername` / `DuplicateEmail` on collision.
    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Look up a user by username or email, whichever matches
    async fn find_by_username_or_email(&self, identifier: &str)
        -> Result<Option<User>, StoreError>;

    /// Look up a user by email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Set the account status, returning the updated record
    ///
    /// # Errors
    ///
    /// `NotFound` if no user with that id exists.
    async fn update_status(&self, id: Uuid, status: AccountStatus) -> Result<User, StoreError>;

    /// Replace the stored password hash
    ///
    /// # Errors
    ///
    /// `NotFound` if no user with that id exists.
    async fn update_password_hash(&self, id: Uuid, password_hash: &str)
        -> Result<(), StoreError>;

    /// Append a successful login to the audit log
    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Read the audit log for one user, oldest first
    async fn login_activity(&self, id: Uuid) -> Result<Vec<LoginEvent>, StoreError>;
}

/// Session record storage, keyed by the opaque handle
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a new session record
    async fn insert(&self, session: SessionRecord) -> Result<(), StoreError>;

    /// Fetch a session by handle
    async fn get(&self, handle: &str) -> Result<Option<SessionRecord>, StoreError>;

    /// Advance `last_seen`; a no-op if the session vanished meanwhile
    async fn touch(&self, handle: &str, at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Remove a session; idempotent, absent handles are not an error
    async fn remove(&self, handle: &str) -> Result<(), StoreError>;

    /// Remove every session owned by a user, returning how many there were
    async fn remove_all_for(&self, user_id: Uuid) -> Result<usize, StoreError>;

    /// Drop sessions whose `last_seen` is before `cutoff` (sweeper hygiene)
    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError>;
}

/// Token record storage, keyed by the opaque value
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist a token, superseding any live token of the same
    /// `(user, purpose)` pair
    ///
    /// The superseded token is forgotten entirely; redeeming it afterwards
    /// reports `Missing`.
    async fn put(&self, token: TokenRecord) -> Result<(), StoreError>;

    /// Atomically evaluate and, on success, consume a token
    ///
    /// The checks run in order: existence, prior consumption, purpose,
    /// expiry. Only a fully valid token is marked consumed; in particular a
    /// purpose mismatch leaves the token live.
    async fn claim(
        &self,
        value: &str,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<TokenClaim, StoreError>;

    /// Drop the live (unconsumed) token of a `(user, purpose)` pair, if any
    async fn invalidate_for(&self, user_id: Uuid, purpose: TokenPurpose)
        -> Result<usize, StoreError>;

    /// Drop tokens past their expiry (sweeper hygiene)
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError>;
}
