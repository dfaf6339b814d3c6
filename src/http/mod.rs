//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → request.rs (assign/propagate x-request-id)
//!     → /health → 200 "ok" (no registry, no auth)
//!     → handler.rs (route → auth → params → template → exec)
//!     → response.rs (status + text/plain body)
//! ```

pub mod handler;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use server::{AppState, GatewayServer};
