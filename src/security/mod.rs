//! Request authentication.
//!
//! # Data Flow
//! ```text
//! endpoint definition `auth` ("Header:Token")
//!     → auth.rs (split, trim, validate header name)
//!     → AuthRequirement stored on the Endpoint
//!
//! Matched request
//!     → AuthRequirement::verify(headers)
//!     → mismatch: 401, request handling stops
//! ```
//!
//! # Design Decisions
//! - Single shared secret per endpoint, no other authorization
//! - Exact, case-sensitive token comparison
//! - The token never appears in logs or listings

pub mod auth;

pub use auth::{AuthError, AuthRequirement};
