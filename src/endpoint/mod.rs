//! Endpoint definitions and the registry.
//!
//! # Data Flow
//! ```text
//! endpoints dir (*.json, recursive)
//!     → registry.rs (discover, read, deserialize)
//!     → definition.rs (validate: fields → auth → ttl → error → defaults → uri)
//!     → Registry (sorted by uri, immutable)
//!     → shared via Arc with every request handler
//! ```
//!
//! # Design Decisions
//! - Fail fast: one bad definition aborts startup
//! - No hot reload; the registry lives as long as the process

pub mod definition;
pub mod duration;
pub mod registry;

pub use definition::{
    DefinitionError, Endpoint, EndpointDefinition, EndpointSummary, DEFAULT_ERROR_STATUS, DEFAULT_TTL,
};
pub use registry::{LoadError, Registry};
