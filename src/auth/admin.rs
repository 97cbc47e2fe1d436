/**
 * Admin Service
 *
 * Administrative operations over other accounts: disable, re-enable, and
 * login activity inspection. Every operation authenticates the caller's
 * session first and requires the admin role.
 *
 * # Security
 *
 * - disabling revokes every session of the target immediately; by default
 *   its live activation/reset tokens are invalidated too
 *   (`AuthPolicy::revoke_tokens_on_disable`)
 * - an admin cannot disable their own account, so a deployment cannot
 *   lock out its last administrator by accident
 * - role and status are admin-controlled only; no self-service path
 *   reaches these transitions
 */

use std::sync::Arc;

use uuid::Uuid;

use crate::auth::service::AuthPolicy;
use crate::auth::sessions::SessionManager;
use crate::auth::tokens::{TokenEngine, TokenPurpose};
use crate::auth::users::{AccountStatus, User};
use crate::error::AuthError;
use crate::store::{LoginEvent, UserStore};

/// Admin-only account operations
pub struct AdminService {
    users: Arc<dyn UserStore>,
    sessions: SessionManager,
    tokens: TokenEngine,
    policy: AuthPolicy,
}

impl AdminService {
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: SessionManager,
        tokens: TokenEngine,
        policy: AuthPolicy,
    ) -> Self {
        Self {
            users,
            sessions,
            tokens,
            policy,
        }
    }

    /// Resolve the caller's session and require the admin role
    async fn require_admin(&self, handle: &str) -> Result<User, AuthError> {
        let user_id = self.sessions.validate(handle).await?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidSession)?;
        if !user.is_admin() {
            tracing::warn!("admin endpoint called by non-admin user {}", user.id);
            return Err(AuthError::Forbidden);
        }
        Ok(user)
    }

    /// Disable an account and cut off its access
    ///
    /// Revokes every session of the target. When the policy says so, live
    /// activation and reset tokens are invalidated in the same stroke so a
    /// disabled user cannot re-enter through a pre-issued token.
    ///
    /// # Errors
    ///
    /// * `Forbidden` - caller is not an admin
    /// * `Validation` - caller tried to disable their own account
    /// * `UserNotFound` - no account with the target id
    pub async fn disable_account(&self, handle: &str, target: Uuid) -> Result<User, AuthError> {
        let caller = self.require_admin(handle).await?;
        if caller.id == target {
            tracing::warn!("admin {} attempted to disable their own account", caller.id);
            return Err(AuthError::validation(
                "target",
                "cannot disable your own account",
            ));
        }

        let user = self
            .users
            .find_by_id(target)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let user = self
            .users
            .update_status(user.id, AccountStatus::Disabled)
            .await?;

        let revoked = self.sessions.revoke_all(user.id).await?;
        if self.policy.revoke_tokens_on_disable {
            let mut dropped = self.tokens.invalidate_for(user.id, TokenPurpose::Activation).await?;
            dropped += self
                .tokens
                .invalidate_for(user.id, TokenPurpose::PasswordReset)
                .await?;
            tracing::info!(
                "user {} disabled by {}; {} sessions revoked, {} tokens dropped",
                user.id,
                caller.id,
                revoked,
                dropped
            );
        } else {
            tracing::info!(
                "user {} disabled by {}; {} sessions revoked",
                user.id,
                caller.id,
                revoked
            );
        }

        Ok(user)
    }

    /// Re-enable a disabled account
    ///
    /// Only the disabled state can be re-enabled; pending accounts still
    /// have to go through activation. Nothing revoked by the disable comes
    /// back: the user logs in again and old tokens stay dead.
    ///
    /// # Errors
    ///
    /// * `Forbidden` - caller is not an admin
    /// * `UserNotFound` - no account with the target id
    /// * `AccountState` - the account is not disabled
    pub async fn enable_account(&self, handle: &str, target: Uuid) -> Result<User, AuthError> {
        let caller = self.require_admin(handle).await?;

        let user = self
            .users
            .find_by_id(target)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        match user.status {
            AccountStatus::Disabled => {}
            AccountStatus::Pending => {
                return Err(AuthError::account_state(
                    "account is pending activation, not disabled",
                ));
            }
            AccountStatus::Active => {
                return Err(AuthError::account_state("account is already active"));
            }
        }

        let user = self
            .users
            .update_status(user.id, AccountStatus::Active)
            .await?;
        tracing::info!("user {} re-enabled by {}", user.id, caller.id);
        Ok(user)
    }

    /// List the recorded logins of an account, oldest first
    ///
    /// # Errors
    ///
    /// * `Forbidden` - caller is not an admin
    /// * `UserNotFound` - no account with the target id
    pub async fn list_login_activity(
        &self,
        handle: &str,
        target: Uuid,
    ) -> Result<Vec<LoginEvent>, AuthError> {
        let caller = self.require_admin(handle).await?;

        // 404 for a missing target, even with an empty history
        if self.users.find_by_id(target).await?.is_none() {
            return Err(AuthError::UserNotFound);
        }

        let events = self.users.login_activity(target).await?;
        tracing::debug!(
            "admin {} read {} login events for user {}",
            caller.id,
            events.len(),
            target
        );
        Ok(events)
    }
}
