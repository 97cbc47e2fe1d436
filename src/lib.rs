//! Keyward - Main Library
//!
//! Keyward is a credential and token lifecycle manager: it owns password
//! hashing, opaque-handle sessions with a sliding idle timeout, and the
//! single-use tokens that drive account activation and password recovery.
//! A reference HTTP binding (Axum) exposes the flows over `/api`.
//!
//! # Overview
//!
//! This library provides:
//! - bcrypt password hashing and verification
//! - Opaque session handles with sliding idle expiry
//! - Time-boxed, single-use, purpose-bound activation and reset tokens
//! - The account lifecycle flows: register, activate, login, logout,
//!   password recovery
//! - Admin operations: disable, enable, login activity audit
//!
//! # Module Structure
//!
//! - **`auth`** - Lifecycle flows, password hashing, sessions, tokens
//! - **`store`** - Storage traits and the in-memory reference stores
//! - **`email`** - Outbound mail trait and the shipped sinks
//! - **`error`** - The `AuthError` taxonomy and its HTTP mapping
//! - **`middleware`** - Bearer-handle extraction for protected routes
//! - **`routes`** - HTTP route configuration
//! - **`server`** - Configuration, state, and server assembly
//!
//! # Usage
//!
//! The services compose from small pieces; the server module wires the
//! default stack, and tests wire their own:
//!
//! ```rust,no_run
//! use keyward::server::{create_app, AppConfig};
//!
//! # async fn example() {
//! let app = create_app(AppConfig::from_env()).await;
//! // Use app with axum::serve
//! # }
//! ```

/// Lifecycle flows, password hashing, sessions, tokens
pub mod auth;

/// Outbound mail trait and sinks
pub mod email;

/// Error taxonomy and HTTP mapping
pub mod error;

/// Request-processing middleware
pub mod middleware;

/// HTTP route configuration
pub mod routes;

/// Configuration, state, and server assembly
pub mod server;

/// Storage traits and in-memory stores
pub mod store;

// Re-export commonly used types
pub use auth::{
    AccountStatus, AdminService, AuthPolicy, AuthService, PasswordHasher, Role, SessionManager,
    TokenEngine, TokenPurpose, User,
};
pub use error::AuthError;
