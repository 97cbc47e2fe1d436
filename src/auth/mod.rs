//! Authentication Module
//!
//! This module handles the whole credential and session lifecycle:
//! registration, activation, login, logout, password recovery, and the
//! admin operations over accounts.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`users`** - User model, roles, and account status
//! - **`password`** - bcrypt hashing and verification
//! - **`tokens`** - Single-use activation and reset tokens
//! - **`sessions`** - Opaque session handles with a sliding idle timeout
//! - **`service`** - The lifecycle flows wired together
//! - **`admin`** - Admin-only account operations
//! - **`handlers`** - HTTP handlers for the endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and account states
//! ├── password.rs     - Password hashing
//! ├── tokens.rs       - Token engine (issue/redeem)
//! ├── sessions.rs     - Session manager
//! ├── service.rs      - Auth service (register, login, reset, ...)
//! ├── admin.rs        - Admin service (disable, enable, audit)
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Account Lifecycle
//!
//! 1. **Register**: account created as `pending`, activation token mailed
//! 2. **Activate**: token redeemed, account becomes `active`
//! 3. **Login**: credentials verified, status checked, session opened
//! 4. **Reset**: reset token mailed, redeemed, every session revoked
//! 5. **Disable/Enable**: admin cuts access off and restores it
//!
//! # Security
//!
//! - passwords are hashed with bcrypt; plaintext is never stored or logged
//! - session handles and tokens are 32 bytes from the OS RNG, hex-encoded
//! - tokens are single-use, time-boxed, and purpose-bound
//! - credential failures are indistinguishable to the caller

/// User model and account states
pub mod users;

/// Password hashing and verification
pub mod password;

/// Single-use token engine
pub mod tokens;

/// Session management
pub mod sessions;

/// Account lifecycle flows
pub mod service;

/// Admin account operations
pub mod admin;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use admin::AdminService;
pub use password::PasswordHasher;
pub use service::{AuthPolicy, AuthService};
pub use sessions::SessionManager;
pub use tokens::{TokenEngine, TokenPurpose};
pub use users::{AccountStatus, NewUser, Role, User};
