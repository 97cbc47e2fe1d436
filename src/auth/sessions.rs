/**
 * Session Manager
 *
 * This module manages login sessions as opaque server-side handles. The
 * client holds nothing but the handle; ownership, issue time and the
 * sliding idle window all live in the session store, which is what makes
 * revocation immediate (remove the record and the handle is dead).
 *
 * # Session Lifecycle
 *
 * ```text
 * create() ──> active ──(idle timeout)──> expired ──(lazy eviction)──> gone
 *                │
 *                └──revoke()/revoke_all()──> gone
 * ```
 *
 * Expiry is evaluated lazily at validation time: a handle whose idle window
 * lapsed fails with `ExpiredSession` on its next use and is evicted then.
 * There is no path back to active for an expired or revoked handle.
 *
 * # Security
 *
 * - handles are 32 bytes from the OS RNG, hex-encoded; unguessable and
 *   meaningless
 * - validation refreshes `last_seen`, so the timeout measures idleness,
 *   not total session age
 * - a revoked handle is indistinguishable from one that never existed
 */

use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;

use crate::error::AuthError;
use crate::store::{SessionRecord, SessionStore};

/// Generate an opaque session handle: 32 bytes from the OS RNG, hex-encoded
fn generate_handle() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Issues, validates and revokes session handles through an injected store
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    idle_timeout: Duration,
}

impl SessionManager {
    /// Create a manager with the given idle timeout
    ///
    /// A session whose last validation lies more than `idle_timeout` in the
    /// past is expired.
    pub fn new(store: Arc<dyn SessionStore>, idle_timeout: Duration) -> Self {
        Self {
            store,
            idle_timeout,
        }
    }

    /// Create a session for a user and return its opaque handle
    pub async fn create(&self, user_id: Uuid) -> Result<String, AuthError> {
        let handle = generate_handle();
        let now = Utc::now();

        self.store
            .insert(SessionRecord {
                handle: handle.clone(),
                user_id,
                issued_at: now,
                last_seen: now,
            })
            .await?;

        tracing::info!("session created for user {}", user_id);
        Ok(handle)
    }

    /// Validate a handle, refreshing its idle window
    ///
    /// # Returns
    ///
    /// The id of the session's owner.
    ///
    /// # Errors
    ///
    /// * `InvalidSession` - handle unknown or revoked
    /// * `ExpiredSession` - idle window lapsed; the record is evicted
    pub async fn validate(&self, handle: &str) -> Result<Uuid, AuthError> {
        let now = Utc::now();

        let record = match self.store.get(handle).await? {
            Some(record) => record,
            None => {
                tracing::warn!("validation of unknown session handle");
                return Err(AuthError::InvalidSession);
            }
        };

        if now - record.last_seen > self.idle_timeout {
            tracing::info!("session for user {} expired after idle timeout", record.user_id);
            self.store.remove(handle).await?;
            return Err(AuthError::ExpiredSession);
        }

        self.store.touch(handle, now).await?;
        Ok(record.user_id)
    }

    /// Revoke a single handle; idempotent, unknown handles are not an error
    pub async fn revoke(&self, handle: &str) -> Result<(), AuthError> {
        self.store.remove(handle).await?;
        tracing::debug!("session handle revoked");
        Ok(())
    }

    /// Revoke every session a user holds
    ///
    /// Used for password resets, account disabling and "log out everywhere".
    pub async fn revoke_all(&self, user_id: Uuid) -> Result<usize, AuthError> {
        let revoked = self.store.remove_all_for(user_id).await?;
        if revoked > 0 {
            tracing::info!("revoked {} session(s) for user {}", revoked, user_id);
        }
        Ok(revoked)
    }

    /// Drop sessions idle past the timeout; called by the periodic sweeper
    ///
    /// Correctness never depends on this: `validate` rejects expired handles
    /// on its own. This only reclaims memory for handles nobody presents
    /// again.
    pub async fn purge_idle(&self) -> Result<usize, AuthError> {
        let cutoff = Utc::now() - self.idle_timeout;
        Ok(self.store.purge_idle(cutoff).await?)
    }
}
