//! Error Module
//!
//! This module defines the error taxonomy for the crate and its HTTP
//! conversion. Every fallible operation returns [`AuthError`], and handlers
//! can return it directly thanks to the `IntoResponse` implementation.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - Error conversion implementations (IntoResponse, From)
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # HTTP Response Conversion
//!
//! All errors implement `IntoResponse` from axum, converting to a JSON body
//! with a stable status code. Storage failures render a generic body; their
//! detail only reaches the logs.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::AuthError;
