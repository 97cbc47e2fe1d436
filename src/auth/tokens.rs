/**
 * Token Engine
 *
 * This module issues and redeems the single-use, time-boxed tokens that
 * carry account activation and password recovery. A token is an opaque
 * random value; everything the system knows about it (owner, purpose,
 * expiry, consumption) lives in the token store.
 *
 * # Lifecycle
 *
 * 1. `issue` generates a fresh value and persists it; any prior unconsumed
 *    token of the same `(user, purpose)` pair is invalidated at the same
 *    time, so resending an email leaves exactly one live token.
 * 2. `redeem` hands the value to the store's atomic claim. Under concurrent
 *    redemption exactly one caller wins; the rest observe `TokenAlreadyUsed`.
 * 3. Expired tokens fail at redemption time; the periodic sweeper only
 *    reclaims memory.
 *
 * # Security
 *
 * - values are 32 bytes from the OS RNG, hex-encoded; they encode nothing
 * - a purpose mismatch does not consume the token, so probing an activation
 *   token against the reset endpoint burns nothing
 * - token TTLs are passed in by the caller: policy stays in configuration
 */

use std::fmt;
use std::sync::Arc;

use chrono::{Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;
use crate::store::{TokenClaim, TokenRecord, TokenStore};

/// What a token may be redeemed for
///
/// Stored with the token and checked at redemption; the closed set keeps a
/// reset token from ever activating an account or vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    /// Confirms ownership of the registration email
    Activation,
    /// Authorizes setting a new password
    PasswordReset,
}

impl fmt::Display for TokenPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenPurpose::Activation => write!(f, "activation"),
            TokenPurpose::PasswordReset => write!(f, "password_reset"),
        }
    }
}

/// Generate an opaque token value: 32 bytes from the OS RNG, hex-encoded
pub(crate) fn generate_token_value() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Issues and redeems single-use tokens through an injected store
#[derive(Clone)]
pub struct TokenEngine {
    store: Arc<dyn TokenStore>,
}

impl TokenEngine {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Issue a token for a user and purpose
    ///
    /// Supersedes any live token of the same `(user, purpose)` pair: only
    /// the most recently issued token redeems.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user the token is bound to
    /// * `purpose` - What the token may be redeemed for
    /// * `ttl` - How long the token stays valid from now
    ///
    /// # Returns
    ///
    /// The opaque token value to deliver to the user (by email).
    pub async fn issue(
        &self,
        user_id: Uuid,
        purpose: TokenPurpose,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let value = generate_token_value();
        let now = Utc::now();

        self.store
            .put(TokenRecord {
                value: value.clone(),
                user_id,
                purpose,
                issued_at: now,
                expires_at: now + ttl,
                used_at: None,
            })
            .await?;

        tracing::info!("issued {} token for user {}", purpose, user_id);
        Ok(value)
    }

    /// Redeem a token for the given purpose, consuming it
    ///
    /// # Returns
    ///
    /// The id of the user the token was bound to.
    ///
    /// # Errors
    ///
    /// * `TokenNotFound` - value unknown (never issued, superseded, purged)
    /// * `TokenAlreadyUsed` - a previous redemption won
    /// * `TokenPurposeMismatch` - stored purpose differs; token not consumed
    /// * `TokenExpired` - past expiry
    pub async fn redeem(&self, value: &str, purpose: TokenPurpose) -> Result<Uuid, AuthError> {
        match self.store.claim(value, purpose, Utc::now()).await? {
            TokenClaim::Claimed(record) => {
                tracing::info!("redeemed {} token for user {}", purpose, record.user_id);
                Ok(record.user_id)
            }
            TokenClaim::Missing => {
                tracing::warn!("redemption of unknown {} token", purpose);
                Err(AuthError::TokenNotFound)
            }
            TokenClaim::AlreadyUsed => {
                tracing::warn!("repeat redemption of a consumed {} token", purpose);
                Err(AuthError::TokenAlreadyUsed)
            }
            TokenClaim::Expired => {
                tracing::info!("redemption of expired {} token", purpose);
                Err(AuthError::TokenExpired)
            }
            TokenClaim::PurposeMismatch => {
                tracing::warn!("token presented for {} has a different purpose", purpose);
                Err(AuthError::TokenPurposeMismatch)
            }
        }
    }

    /// Drop the live token of a `(user, purpose)` pair, if one exists
    ///
    /// Used when disabling an account under the revoke-tokens policy.
    /// Returns how many tokens were dropped (0 or 1).
    pub async fn invalidate_for(
        &self,
        user_id: Uuid,
        purpose: TokenPurpose,
    ) -> Result<usize, AuthError> {
        let dropped = self.store.invalidate_for(user_id, purpose).await?;
        if dropped > 0 {
            tracing::info!("invalidated live {} token for user {}", purpose, user_id);
        }
        Ok(dropped)
    }

    /// Evict every token past its expiry; returns the eviction count
    ///
    /// Expired tokens are already dead on redemption; this keeps the
    /// store from accumulating them between redemptions.
    pub async fn purge_expired(&self) -> Result<usize, AuthError> {
        Ok(self.store.purge_expired(Utc::now()).await?)
    }
}
