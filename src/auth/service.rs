/**
 * Auth Service
 *
 * This module orchestrates the account lifecycle flows: registration,
 * activation, login/logout, and password recovery. It owns no state of its
 * own; it wires the password hasher, token engine, session manager, user
 * store and mailer together and enforces the ordering rules between them.
 *
 * # Flows
 *
 * 1. **Register**: validate input → hash password → insert pending user →
 *    mail activation token. No session is created.
 * 2. **Activate**: redeem token (purpose activation) → flip account to
 *    active.
 * 3. **Login**: look up by username or email → verify password → check
 *    account status → record login → create session.
 * 4. **Reset**: request mails a reset token (for active accounts only);
 *    confirm redeems it, stores the new hash, and revokes every session
 *    before returning.
 *
 * # Security
 *
 * - unknown identifier and wrong password produce the identical
 *   `InvalidCredentials`; the unknown-identifier path burns a bcrypt
 *   verification against a decoy digest so it does not return early
 * - account status is checked only after the password verified, so pending/
 *   disabled responses never leak account state to a guesser
 * - `request_password_reset` answers success for unknown emails and runs
 *   equivalent-shape work, so the endpoint cannot enumerate accounts
 * - plaintext passwords are never logged or persisted
 */

use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::auth::password::PasswordHasher;
use crate::auth::sessions::SessionManager;
use crate::auth::tokens::{self, TokenEngine, TokenPurpose};
use crate::auth::users::{AccountStatus, NewUser, Role, User};
use crate::email::{MailKind, Mailer, OutboundMail};
use crate::error::AuthError;
use crate::store::{StoreError, UserStore};

/// Tunable lifecycle policy
///
/// Token lifetimes and the disable-cascade behavior are configuration, not
/// code: the engine and the flows take whatever this says.
#[derive(Debug, Clone, Copy)]
pub struct AuthPolicy {
    /// How long an activation token stays valid
    pub activation_ttl: Duration,
    /// How long a password reset token stays valid
    pub reset_ttl: Duration,
    /// Whether disabling an account also invalidates its live tokens
    pub revoke_tokens_on_disable: bool,
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            activation_ttl: Duration::hours(48),
            reset_ttl: Duration::minutes(45),
            revoke_tokens_on_disable: true,
        }
    }
}

/// Validate username format
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    // First character must be a letter
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    // Rest can be alphanumeric or underscore
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a password against the strength policy
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < 8 {
        return Err(AuthError::validation(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    Ok(())
}

/// Orchestrates the account lifecycle flows
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: TokenEngine,
    sessions: SessionManager,
    mailer: Arc<dyn Mailer>,
    policy: AuthPolicy,
    /// Valid digest verified against when the identifier is unknown, so the
    /// unknown-user path costs the same as a wrong password.
    decoy_hash: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: PasswordHasher,
        tokens: TokenEngine,
        sessions: SessionManager,
        mailer: Arc<dyn Mailer>,
        policy: AuthPolicy,
    ) -> Self {
        let decoy_hash = hasher
            .hash("keyward-credential-equalizer")
            .unwrap_or_default();
        Self {
            users,
            hasher,
            tokens,
            sessions,
            mailer,
            policy,
            decoy_hash,
        }
    }

    /// Register a new account
    ///
    /// The account starts in `Pending`; an activation token goes out by
    /// mail and no session is created until the first login after
    /// activation.
    ///
    /// # Errors
    ///
    /// * `Validation` - bad username/email/password format
    /// * `Duplicate` - username or email already registered
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        if !is_valid_username(username) {
            tracing::warn!("registration with invalid username format: {}", username);
            return Err(AuthError::validation(
                "username",
                "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
            ));
        }
        if !email.contains('@') {
            tracing::warn!("registration with invalid email format: {}", email);
            return Err(AuthError::validation("email", "Invalid email format"));
        }
        validate_password(password)?;

        let password_hash = self.hasher.hash(password)?;

        let user = match self
            .users
            .insert_user(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                role: Role::Standard,
                status: AccountStatus::Pending,
            })
            .await
        {
            Ok(user) => user,
            Err(err @ (StoreError::DuplicateUsername | StoreError::DuplicateEmail)) => {
                tracing::warn!("registration rejected: {}", err);
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };

        let token = self
            .tokens
            .issue(user.id, TokenPurpose::Activation, self.policy.activation_ttl)
            .await?;
        self.mailer
            .send(OutboundMail {
                to: user.email.clone(),
                kind: MailKind::Activation,
                token,
            })
            .await;

        tracing::info!("user {} registered with id {}", user.username, user.id);
        Ok(user)
    }

    /// Redeem an activation token and bring the account to `Active`
    ///
    /// # Errors
    ///
    /// * token errors from redemption (`TokenNotFound`, `TokenExpired`, ...)
    /// * `AccountState` - the account is already active or was disabled
    pub async fn activate(&self, token: &str) -> Result<User, AuthError> {
        let user_id = self.tokens.redeem(token, TokenPurpose::Activation).await?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::storage("activation token bound to missing user"))?;

        match user.status {
            AccountStatus::Pending => {}
            AccountStatus::Active => {
                tracing::warn!("activation of already active user {}", user.id);
                return Err(AuthError::account_state("account is already active"));
            }
            AccountStatus::Disabled => {
                tracing::warn!("activation attempt for disabled user {}", user.id);
                return Err(AuthError::account_state("account is disabled"));
            }
        }

        let user = self
            .users
            .update_status(user.id, AccountStatus::Active)
            .await?;
        tracing::info!("user {} activated", user.id);
        Ok(user)
    }

    /// Log in with username or email plus password
    ///
    /// On success the login is recorded in the audit log and a fresh
    /// session handle is returned alongside the user.
    ///
    /// # Errors
    ///
    /// * `InvalidCredentials` - unknown identifier or wrong password; the
    ///   two cases are indistinguishable to the caller
    /// * `AccountNotActive` - correct credentials, account still pending
    /// * `AccountDisabled` - correct credentials, account disabled
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<(String, User), AuthError> {
        let user = match self.users.find_by_username_or_email(identifier).await? {
            Some(user) => user,
            None => {
                // Burn a verification so this path costs what a wrong
                // password costs.
                let _ = self.hasher.verify(password, &self.decoy_hash);
                tracing::warn!("login failed for unknown identifier: {}", identifier);
                return Err(AuthError::InvalidCredentials);
            }
        };

        if !self.hasher.verify(password, &user.password_hash) {
            tracing::warn!("login failed for user {}: wrong password", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        // Status only matters once the caller proved they hold the password.
        match user.status {
            AccountStatus::Active => {}
            AccountStatus::Pending => {
                tracing::warn!("login attempt for pending user {}", user.id);
                return Err(AuthError::AccountNotActive);
            }
            AccountStatus::Disabled => {
                tracing::warn!("login attempt for disabled user {}", user.id);
                return Err(AuthError::AccountDisabled);
            }
        }

        self.users.record_login(user.id, chrono::Utc::now()).await?;
        let handle = self.sessions.create(user.id).await?;

        tracing::info!("user {} logged in", user.id);
        Ok((handle, user))
    }

    /// Terminate one session; idempotent
    pub async fn logout(&self, handle: &str) -> Result<(), AuthError> {
        self.sessions.revoke(handle).await
    }

    /// Terminate every session of the caller ("log out everywhere")
    pub async fn logout_everywhere(&self, handle: &str) -> Result<(), AuthError> {
        let user_id = self.sessions.validate(handle).await?;
        self.sessions.revoke_all(user_id).await?;
        Ok(())
    }

    /// Resolve a session handle to its owning user
    pub async fn current_user(&self, handle: &str) -> Result<User, AuthError> {
        let user_id = self.sessions.validate(handle).await?;
        match self.users.find_by_id(user_id).await? {
            Some(user) => Ok(user),
            None => {
                tracing::warn!("live session bound to missing user {}", user_id);
                Err(AuthError::InvalidSession)
            }
        }
    }

    /// Request a password reset mail
    ///
    /// Always succeeds. If the email belongs to an active account a reset
    /// token is issued (superseding any earlier one) and mailed; otherwise
    /// equivalent-shape decoy work runs so the caller cannot tell the
    /// difference.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        match self.users.find_by_email(email).await? {
            Some(user) if user.status == AccountStatus::Active => {
                let token = self
                    .tokens
                    .issue(user.id, TokenPurpose::PasswordReset, self.policy.reset_ttl)
                    .await?;
                self.mailer
                    .send(OutboundMail {
                        to: user.email.clone(),
                        kind: MailKind::PasswordReset,
                        token,
                    })
                    .await;
                tracing::info!("password reset token issued for user {}", user.id);
            }
            _ => {
                // Same shape as the issuing path, minus persistence.
                let _ = tokens::generate_token_value();
                tracing::info!("password reset requested for address without an active account");
            }
        }
        Ok(())
    }

    /// Request a fresh activation mail
    ///
    /// Always succeeds, with the same enumeration resistance as
    /// [`request_password_reset`](Self::request_password_reset). Only
    /// pending accounts get a token; the new token supersedes the one from
    /// registration.
    pub async fn resend_activation(&self, email: &str) -> Result<(), AuthError> {
        match self.users.find_by_email(email).await? {
            Some(user) if user.status == AccountStatus::Pending => {
                let token = self
                    .tokens
                    .issue(user.id, TokenPurpose::Activation, self.policy.activation_ttl)
                    .await?;
                self.mailer
                    .send(OutboundMail {
                        to: user.email.clone(),
                        kind: MailKind::Activation,
                        token,
                    })
                    .await;
                tracing::info!("activation token reissued for user {}", user.id);
            }
            _ => {
                let _ = tokens::generate_token_value();
                tracing::info!("activation resend requested for address without a pending account");
            }
        }
        Ok(())
    }

    /// Redeem a reset token and set a new password
    ///
    /// The new password is validated before the token is consumed, so a
    /// too-short password does not burn the token. On success every session
    /// of the user is revoked before this returns.
    ///
    /// # Errors
    ///
    /// * `Validation` - new password fails the strength policy
    /// * token errors from redemption (`TokenNotFound`, `TokenExpired`, ...)
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        validate_password(new_password)?;

        let user_id = self
            .tokens
            .redeem(token, TokenPurpose::PasswordReset)
            .await?;

        let password_hash = self.hasher.hash(new_password)?;
        self.users
            .update_password_hash(user_id, &password_hash)
            .await?;

        // Every open session dies with the old password.
        self.sessions.revoke_all(user_id).await?;

        tracing::info!("password reset completed for user {}", user_id);
        Ok(())
    }
}
