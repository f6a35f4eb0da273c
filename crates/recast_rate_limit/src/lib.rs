//! Rate limiting and error recovery for recast text generators.
//!
//! Resilience is a generator-level concern: [`ResilientGenerator`] wraps any
//! [`recast_interface::TextGenerator`] with a rate limit permit, a per-call
//! timeout and bounded retries, so sequence runners can stay strictly linear.

mod config;
mod error;
mod limiter;
mod resilient;
mod tokens;

pub use config::{RateLimitConfig, RetryConfig};
pub use error::{RateLimitError, RateLimitErrorKind};
pub use limiter::{RateLimiter, RateLimiterGuard};
pub use resilient::ResilientGenerator;
pub use tokens::estimate_tokens;
