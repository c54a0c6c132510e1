//! Per-client request throttling
//!
//! Keeps a sliding window of admitted request timestamps per client key and
//! rejects requests once a client has used its allowance for the window.
//! The state lives in process memory and is lost on restart.

pub mod config;
pub mod error;
pub mod identity;
pub mod limiter;
pub mod middleware;

pub use config::{RateLimitConfig, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW};
pub use error::{RateLimitError, RATE_LIMIT_MESSAGE};
pub use identity::{ClientIdentity, UNKNOWN_CLIENT};
pub use limiter::RateLimiter;
pub use middleware::rate_limit_middleware;
