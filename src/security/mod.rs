//! Security middleware.
//!
//! # Design Decisions
//! - Fail closed: over-quota and oversized requests are rejected before the
//!   router runs
//! - Rejections are inline responses, not errors for the trailing handler

pub mod headers;
pub mod rate_limit;

pub use rate_limit::{RateLimiterState, RATE_LIMIT_MESSAGE};
