//! Command execution subsystem.
//!
//! # Data Flow
//! ```text
//! expanded argv + endpoint timeout
//!     → runner.rs (spawn with PATH-only environment, kill on drop)
//!     → capture.rs (stdout + stderr into one buffer)
//!     → exit status within deadline? output : ExecError carrying output
//! ```
//!
//! # Design Decisions
//! - argv[0] is executed directly, never through a shell
//! - Every invocation is a single attempt; nothing is retried
//! - Deadline expiry kills the child and returns what was captured so far
//! - Dropping the request future (client gone) kills the child

pub mod capture;
pub mod runner;

pub use capture::CombinedOutput;
pub use runner::{ExecError, Executor, DEFAULT_PATH, TIMEOUT_MARKER};
