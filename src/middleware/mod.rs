//! Middleware Module
//!
//! This module contains the request-processing layer that runs before
//! handlers. Today that is session extraction; anything cross-cutting
//! (rate limiting, request shaping) belongs here too.
//!
//! # Architecture
//!
//! - **`session`** - Bearer-handle extractor for protected routes

pub mod session;

pub use session::BearerHandle;
