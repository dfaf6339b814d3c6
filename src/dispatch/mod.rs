//! Request-scoped dispatch stages.
//!
//! # Data Flow
//! ```text
//! RouteMatch (endpoint + path variables) + request query + request body
//!     → params.rs (merge sources by precedence)
//!     → template.rs (substitute {name} into the script argv)
//!     → exec (run the expanded argv)
//! ```
//!
//! # Design Decisions
//! - Everything here is owned by one request and dropped with it
//! - Missing or malformed bodies never fail a request; only template syntax does

pub mod params;
pub mod template;

pub use params::{render_json_value, resolve, Params};
pub use template::{expand, TemplateError};
