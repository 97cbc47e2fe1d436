//! Route Configuration Module
//!
//! This module configures all HTTP routes for the server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint wiring
//! ```
//!
//! # Route Types
//!
//! ## Authentication Routes
//!
//! - `POST /api/auth/register` - User registration
//! - `POST /api/auth/activate` - Account activation
//! - `POST /api/auth/resend-activation` - Activation token resend
//! - `POST /api/auth/login` - User login
//! - `POST /api/auth/logout` - Session logout
//! - `POST /api/auth/logout-all` - Logout everywhere
//! - `GET  /api/auth/me` - Get current user
//! - `POST /api/auth/password-reset/request` - Request a reset token
//! - `POST /api/auth/password-reset/confirm` - Confirm a password reset
//!
//! ## Admin Routes
//!
//! - `POST /api/admin/users/{id}/disable` - Disable an account
//! - `POST /api/admin/users/{id}/enable` - Re-enable an account
//! - `GET  /api/admin/users/{id}/logins` - Login activity listing
//!
//! Unknown routes fall through to a plain 404.

/// Main router creation
pub mod router;

/// API endpoint wiring
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
