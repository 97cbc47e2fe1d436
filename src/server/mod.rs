//! Server Module
//!
//! This module contains the code for initializing and configuring the
//! Axum HTTP server. It provides the foundation for the application's
//! runtime: configuration, shared state, and assembly.
//!
//! # Architecture
//!
//! The server module is organized into focused submodules:
//!
//! - **`config`** - Configuration loading from environment variables
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── config.rs       - Environment-driven configuration
//! ├── state.rs        - AppState and FromRef implementations
//! └── init.rs         - Service wiring, admin bootstrap, sweeper
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `AppConfig::from_env()` with defaults
//! 2. **Store Creation**: in-memory user/session/token stores
//! 3. **Service Wiring**: hasher, token engine, session manager, mailer
//! 4. **Admin Bootstrap**: ensure one admin account exists
//! 5. **Router Creation**: all routes plus the tracing layer
//! 6. **Background Tasks**: periodic sweeper for idle sessions and
//!    expired tokens

/// Server configuration loading
pub mod config;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::AppConfig;
pub use init::create_app;
pub use state::AppState;
