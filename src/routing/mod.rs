//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     endpoint definition uri
//!     → pattern.rs (template → anchored matcher)
//!     → stored on the compiled Endpoint
//!
//! Incoming Request (method, path)
//!     → router.rs (ordered scan of the registry)
//!     → Return: RouteMatch (endpoint + path variables) or no match
//! ```
//!
//! # Design Decisions
//! - Patterns compiled at startup, immutable at runtime
//! - Method comparison is exact and case-sensitive
//! - Deterministic: registry order decides, first match wins

pub mod pattern;
pub mod router;

pub use pattern::{PathPattern, PatternError};
pub use router::{first_match, RouteMatch};
