//! Common test utilities and helpers
//!
//! Builds a fully wired service stack on the in-memory stores, with a
//! capturing mailer so tests can fish out the tokens that would have
//! left by email. bcrypt runs at the minimum cost to keep the suite
//! fast.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chrono::Duration;

use keyward::auth::users::NewUser;
use keyward::auth::{
    AccountStatus, AdminService, AuthPolicy, AuthService, PasswordHasher, Role, SessionManager,
    TokenEngine, User,
};
use keyward::email::{MailKind, MemoryMailer};
use keyward::routes::create_router;
use keyward::server::AppState;
use keyward::store::{MemorySessionStore, MemoryTokenStore, MemoryUserStore, UserStore};

pub const TEST_PASSWORD: &str = "Secret1!";
pub const ADMIN_PASSWORD: &str = "RootPass1!";

/// Everything a test needs: the wired services plus handles to the
/// in-memory internals
pub struct TestHarness {
    pub auth: Arc<AuthService>,
    pub admin: Arc<AdminService>,
    pub mailer: Arc<MemoryMailer>,
    pub users: Arc<MemoryUserStore>,
    hasher: PasswordHasher,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with(AuthPolicy::default(), Duration::minutes(30))
    }

    pub fn with(policy: AuthPolicy, idle_timeout: Duration) -> Self {
        let users = Arc::new(MemoryUserStore::new());
        let mailer = Arc::new(MemoryMailer::new());
        let hasher = PasswordHasher::new(4);
        let tokens = TokenEngine::new(Arc::new(MemoryTokenStore::new()));
        let sessions = SessionManager::new(Arc::new(MemorySessionStore::new()), idle_timeout);

        let auth = Arc::new(AuthService::new(
            users.clone(),
            hasher,
            tokens.clone(),
            sessions.clone(),
            mailer.clone(),
            policy,
        ));
        let admin = Arc::new(AdminService::new(users.clone(), sessions, tokens, policy));

        Self {
            auth,
            admin,
            mailer,
            users,
            hasher,
        }
    }

    /// HTTP test server over the full router
    pub fn server(&self) -> TestServer {
        let state = AppState {
            auth: self.auth.clone(),
            admin: self.admin.clone(),
        };
        TestServer::new(create_router(state)).expect("test server")
    }

    /// Register a user and walk it through activation
    pub async fn register_and_activate(&self, username: &str, email: &str) -> User {
        self.auth
            .register(username, email, TEST_PASSWORD)
            .await
            .expect("register");
        let token = self.activation_token(email).await;
        self.auth.activate(&token).await.expect("activate")
    }

    /// Seed an active admin straight into the store and log it in
    pub async fn seed_admin(&self) -> (User, String) {
        let admin = self
            .users
            .insert_user(NewUser {
                username: "root".to_string(),
                email: "root@example.com".to_string(),
                password_hash: self.hasher.hash(ADMIN_PASSWORD).expect("hash"),
                role: Role::Admin,
                status: AccountStatus::Active,
            })
            .await
            .expect("seed admin");
        let (handle, _) = self
            .auth
            .login("root", ADMIN_PASSWORD)
            .await
            .expect("admin login");
        (admin, handle)
    }

    /// Most recent activation token mailed to `email`
    pub async fn activation_token(&self, email: &str) -> String {
        self.mailer
            .last_token_for(email, MailKind::Activation)
            .await
            .expect("activation mail")
    }

    /// Most recent reset token mailed to `email`
    pub async fn reset_token(&self, email: &str) -> String {
        self.mailer
            .last_token_for(email, MailKind::PasswordReset)
            .await
            .expect("reset mail")
    }
}

/// Create authorization header value
pub fn auth_header(handle: &str) -> String {
    format!("Bearer {}", handle)
}
