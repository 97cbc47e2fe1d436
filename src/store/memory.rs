/**
 * In-Memory Stores
 *
 * Reference implementations of the storage traits, backed by hash maps
 * behind `tokio::sync::RwLock`. They serve two roles: the storage engine of
 * the standalone server binary, and the substitute stores the test suites
 * inject.
 *
 * # Atomicity
 *
 * Every compound operation (uniqueness check + insert, token claim,
 * supersede-on-put) runs inside a single write-lock critical section, which
 * is what gives these implementations the atomicity the traits demand. A
 * SQL-backed implementation would use unique indexes and conditional
 * UPDATE ... RETURNING for the same effect.
 */

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::tokens::TokenPurpose;
use crate::auth::users::{AccountStatus, NewUser, User};
use crate::store::{
    LoginEvent, SessionRecord, SessionStore, StoreError, TokenClaim, TokenRecord, TokenStore,
    UserStore,
};

use async_trait::async_trait;

/// In-memory user store
///
/// Keeps secondary indexes on username and email so uniqueness checks and
/// identifier lookups stay O(1), plus the per-user login audit log.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<UserStoreInner>,
}

#[derive(Default)]
struct UserStoreInner {
    users: HashMap<Uuid, User>,
    by_username: HashMap<String, Uuid>,
    by_email: HashMap<String, Uuid>,
    logins: HashMap<Uuid, Vec<LoginEvent>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;

        // Uniqueness check and insert under one write guard.
        if inner.by_username.contains_key(&new_user.username) {
            return Err(StoreError::DuplicateUsername);
        }
        if inner.by_email.contains_key(&new_user.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            status: new_user.status,
            created_at: now,
            updated_at: now,
        };

        inner.by_username.insert(user.username.clone(), user.id);
        inner.by_email.insert(user.email.clone(), user.id);
        inner.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        let id = inner
            .by_username
            .get(identifier)
            .or_else(|| inner.by_email.get(identifier));
        Ok(id.and_then(|id| inner.users.get(id)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .by_email
            .get(email)
            .and_then(|id| inner.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(&id).cloned())
    }

    async fn update_status(&self, id: Uuid, status: AccountStatus) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        user.status = status;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_password_hash(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let user = inner.users.get_mut(&id).ok_or(StoreError::NotFound)?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.users.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        inner
            .logins
            .entry(id)
            .or_default()
            .push(LoginEvent { user_id: id, at });
        Ok(())
    }

    async fn login_activity(&self, id: Uuid) -> Result<Vec<LoginEvent>, StoreError> {
        let inner = self.inner.read().await;
        if !inner.users.contains_key(&id) {
            return Err(StoreError::NotFound);
        }
        Ok(inner.logins.get(&id).cloned().unwrap_or_default())
    }
}

/// In-memory session store, keyed by the opaque handle
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: SessionRecord) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.handle.clone(), session);
        Ok(())
    }

    async fn get(&self, handle: &str) -> Result<Option<SessionRecord>, StoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(handle).cloned())
    }

    async fn touch(&self, handle: &str, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        if let Some(session) = sessions.get_mut(handle) {
            session.last_seen = at;
        }
        Ok(())
    }

    async fn remove(&self, handle: &str) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(handle);
        Ok(())
    }

    async fn remove_all_for(&self, user_id: Uuid) -> Result<usize, StoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.user_id != user_id);
        Ok(before - sessions.len())
    }

    async fn purge_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.last_seen >= cutoff);
        Ok(before - sessions.len())
    }
}

/// In-memory token store
///
/// Besides the value-keyed records, a `(user, purpose) -> value` index tracks
/// the single live token per pair; `put` replaces through it and `claim`
/// clears it on consumption.
#[derive(Default)]
pub struct MemoryTokenStore {
    inner: RwLock<TokenStoreInner>,
}

#[derive(Default)]
struct TokenStoreInner {
    by_value: HashMap<String, TokenRecord>,
    live: HashMap<(Uuid, TokenPurpose), String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn put(&self, token: TokenRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let key = (token.user_id, token.purpose);
        // Supersede: the previous live token of this pair is forgotten.
        if let Some(old_value) = inner.live.insert(key, token.value.clone()) {
            inner.by_value.remove(&old_value);
        }
        inner.by_value.insert(token.value.clone(), token);
        Ok(())
    }

    async fn claim(
        &self,
        value: &str,
        purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<TokenClaim, StoreError> {
        let mut inner = self.inner.write().await;

        let Some((used, stored_purpose, expires_at, user_id)) =
            inner.by_value.get(value).map(|token| {
                (
                    token.used_at.is_some(),
                    token.purpose,
                    token.expires_at,
                    token.user_id,
                )
            })
        else {
            return Ok(TokenClaim::Missing);
        };

        if used {
            return Ok(TokenClaim::AlreadyUsed);
        }
        if stored_purpose != purpose {
            return Ok(TokenClaim::PurposeMismatch);
        }
        if now > expires_at {
            // Lazy eviction: an expired token is dead either way.
            inner.by_value.remove(value);
            inner.live.remove(&(user_id, stored_purpose));
            return Ok(TokenClaim::Expired);
        }

        let snapshot = match inner.by_value.get_mut(value) {
            Some(token) => {
                let snapshot = token.clone();
                token.used_at = Some(now);
                snapshot
            }
            None => return Ok(TokenClaim::Missing),
        };
        inner.live.remove(&(user_id, stored_purpose));
        Ok(TokenClaim::Claimed(snapshot))
    }

    async fn invalidate_for(
        &self,
        user_id: Uuid,
        purpose: TokenPurpose,
    ) -> Result<usize, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.live.remove(&(user_id, purpose)) {
            Some(value) => {
                inner.by_value.remove(&value);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut inner = self.inner.write().await;
        let dead: Vec<(String, (Uuid, TokenPurpose))> = inner
            .by_value
            .iter()
            .filter(|(_, token)| now > token.expires_at)
            .map(|(value, token)| (value.clone(), (token.user_id, token.purpose)))
            .collect();

        for (value, owner) in &dead {
            inner.by_value.remove(value);
            if inner.live.get(owner) == Some(value) {
                inner.live.remove(owner);
            }
        }

        Ok(dead.len())
    }
}
