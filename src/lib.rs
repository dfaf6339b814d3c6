//! Configuration-driven HTTP gateway mapping requests to command invocations.

pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod exec;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::GatewayConfig;
pub use endpoint::{Endpoint, EndpointDefinition, Registry};
pub use exec::Executor;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
