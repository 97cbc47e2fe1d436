//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for the authentication and
//! admin endpoints. Handlers are organized into focused submodules for
//! maintainability; each one is a thin adapter between the wire types
//! and a service operation.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs            - Module exports and documentation
//! ├── types.rs          - Request and response types
//! ├── register.rs       - User registration handler
//! ├── activate.rs       - Activation and resend handlers
//! ├── login.rs          - User authentication handler
//! ├── logout.rs         - Single and all-session logout handlers
//! ├── me.rs             - Get current user handler
//! ├── password_reset.rs - Reset request and confirmation handlers
//! └── admin.rs          - Admin account management handlers
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - Create a pending account
//! - **`activate`** - POST /api/auth/activate - Redeem an activation token
//! - **`resend_activation`** - POST /api/auth/resend-activation
//! - **`login`** - POST /api/auth/login - Open a session
//! - **`logout`** - POST /api/auth/logout - Revoke one session
//! - **`logout_all`** - POST /api/auth/logout-all - Revoke every session
//! - **`get_me`** - GET /api/auth/me - Resolve the session to its user
//! - **`request_reset`** - POST /api/auth/password-reset/request
//! - **`confirm_reset`** - POST /api/auth/password-reset/confirm
//! - **`disable_user`** - POST /api/admin/users/{id}/disable
//! - **`enable_user`** - POST /api/admin/users/{id}/enable
//! - **`list_logins`** - GET /api/admin/users/{id}/logins
//!
//! # Security
//!
//! - passwords are bcrypt-hashed before storage and never echoed back
//! - sessions are opaque random handles carried as `Authorization: Bearer`
//! - activation and reset tokens leave the server by mail only
//! - credential failures return 401 with no information leakage

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Activation handlers
pub mod activate;

/// Login handler
pub mod login;

/// Logout handlers
pub mod logout;

/// Get current user handler
pub mod me;

/// Password reset handlers
pub mod password_reset;

/// Admin handlers
pub mod admin;

// Re-export commonly used types
pub use types::{
    AcceptedResponse, ActivateRequest, AuthResponse, EmailRequest, LoginActivityResponse,
    LoginRequest, RegisterRequest, ResetConfirmRequest, UserResponse,
};

// Re-export handlers
pub use activate::{activate, resend_activation};
pub use admin::{disable_user, enable_user, list_logins};
pub use login::login;
pub use logout::{logout, logout_all};
pub use me::get_me;
pub use password_reset::{confirm_reset, request_reset};
pub use register::register;
