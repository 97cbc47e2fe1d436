/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP
 * server: store creation, service wiring, admin bootstrap, route
 * configuration, and the background sweeper.
 *
 * # Initialization Process
 *
 * 1. Create the in-memory stores
 * 2. Build the core services (hasher, token engine, session manager)
 * 3. Choose the outbound mailer
 * 4. Wire the auth and admin services
 * 5. Ensure the bootstrap admin account exists
 * 6. Create the router
 * 7. Start the periodic sweeper for idle sessions and expired tokens
 */

use std::sync::Arc;

use axum::Router;

use crate::auth::admin::AdminService;
use crate::auth::password::PasswordHasher;
use crate::auth::service::AuthService;
use crate::auth::sessions::SessionManager;
use crate::auth::tokens::TokenEngine;
use crate::auth::users::{AccountStatus, NewUser, Role};
use crate::email::LogMailer;
use crate::routes::create_router;
use crate::server::config::{AppConfig, DEFAULT_ADMIN_PASSWORD};
use crate::server::state::AppState;
use crate::store::{
    MemorySessionStore, MemoryTokenStore, MemoryUserStore, StoreError, UserStore,
};

/// Create and configure the Axum application
///
/// # Arguments
///
/// * `config` - Runtime configuration, usually `AppConfig::from_env()`
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Error Handling
///
/// The function is designed to be resilient: a failed admin bootstrap is
/// logged but does not prevent startup, and the sweeper task restarts its
/// own loop body on every tick.
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing keyward server");

    // Step 1: Create the in-memory stores
    let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    let session_store = Arc::new(MemorySessionStore::new());
    let token_store = Arc::new(MemoryTokenStore::new());

    // Step 2: Build the core services
    let hasher = PasswordHasher::new(config.bcrypt_cost);
    let tokens = TokenEngine::new(token_store);
    let sessions = SessionManager::new(session_store, config.idle_timeout);

    tracing::info!(
        "Stores initialized (bcrypt cost {}, idle timeout {} min)",
        config.bcrypt_cost,
        config.idle_timeout.num_minutes()
    );

    // Step 3: Mailer. The log sink stands in for a real transport; mail
    // is fire-and-forget either way.
    let mailer = Arc::new(LogMailer);

    // Step 4: Wire the services
    let policy = config.auth_policy();
    let auth = Arc::new(AuthService::new(
        users.clone(),
        hasher,
        tokens.clone(),
        sessions.clone(),
        mailer,
        policy,
    ));
    let admin = Arc::new(AdminService::new(
        users.clone(),
        sessions.clone(),
        tokens.clone(),
        policy,
    ));

    // Step 5: Ensure the bootstrap admin exists
    bootstrap_admin(&users, hasher, &config).await;

    // Step 6: Create router with all routes
    let app_state = AppState { auth, admin };
    let app = create_router(app_state);

    // Step 7: Start the periodic sweeper
    let sweep_interval = config.sweep_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_interval);
        loop {
            interval.tick().await;
            match sessions.purge_idle().await {
                Ok(purged) if purged > 0 => {
                    tracing::debug!("sweeper purged {} idle sessions", purged)
                }
                Ok(_) => {}
                Err(e) => tracing::error!("session sweep failed: {}", e),
            }
            match tokens.purge_expired().await {
                Ok(purged) if purged > 0 => {
                    tracing::debug!("sweeper purged {} expired tokens", purged)
                }
                Ok(_) => {}
                Err(e) => tracing::error!("token sweep failed: {}", e),
            }
        }
    });

    tracing::info!(
        "Router configured with sweeper every {} seconds",
        sweep_interval.as_secs()
    );

    app
}

/// Create the bootstrap admin account if it does not exist yet
///
/// Without at least one admin the disable/enable/audit surface would be
/// unreachable; a deployment that already has the account just logs and
/// moves on.
async fn bootstrap_admin(users: &Arc<dyn UserStore>, hasher: PasswordHasher, config: &AppConfig) {
    if config.admin_password == DEFAULT_ADMIN_PASSWORD {
        tracing::warn!(
            "KEYWARD_ADMIN_PASSWORD not set; admin account uses the built-in placeholder. \
             Set a real password before exposing this server."
        );
    }

    let password_hash = match hasher.hash(&config.admin_password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("admin bootstrap failed at hashing: {}", e);
            return;
        }
    };

    match users
        .insert_user(NewUser {
            username: config.admin_username.clone(),
            email: config.admin_email.clone(),
            password_hash,
            role: Role::Admin,
            status: AccountStatus::Active,
        })
        .await
    {
        Ok(user) => tracing::info!("bootstrap admin {} created ({})", user.username, user.id),
        Err(StoreError::DuplicateUsername) | Err(StoreError::DuplicateEmail) => {
            tracing::debug!("bootstrap admin already present")
        }
        Err(e) => tracing::error!("admin bootstrap failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_config() -> AppConfig {
        AppConfig {
            port: 0,
            bcrypt_cost: 4,
            idle_timeout: Duration::minutes(30),
            activation_ttl: Duration::hours(48),
            reset_ttl: Duration::minutes(45),
            revoke_tokens_on_disable: true,
            sweep_interval: std::time::Duration::from_secs(300),
            admin_username: "admin".to_string(),
            admin_email: "admin@localhost".to_string(),
            admin_password: "BootPass1!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_bootstrap_admin_creates_active_admin() {
        let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let config = test_config();

        bootstrap_admin(&users, PasswordHasher::new(4), &config).await;

        let admin = users
            .find_by_username_or_email("admin")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.status, AccountStatus::Active);
    }

    #[tokio::test]
    async fn test_bootstrap_admin_is_idempotent() {
        let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
        let config = test_config();

        bootstrap_admin(&users, PasswordHasher::new(4), &config).await;
        let first = users
            .find_by_username_or_email("admin")
            .await
            .unwrap()
            .unwrap();

        // second boot leaves the existing account untouched
        bootstrap_admin(&users, PasswordHasher::new(4), &config).await;
        let second = users
            .find_by_username_or_email("admin")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.password_hash, second.password_hash);
    }

    #[tokio::test]
    async fn test_create_app_builds_router() {
        // the router assembles without panicking; behavior is covered by
        // the HTTP integration tests
        let _app = create_app(test_config()).await;
    }
}
