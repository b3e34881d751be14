//! Core building blocks for the SafeSus client
//!
//! - **Response cache**: session-scoped, TTL-bounded memoization of read responses
//! - **Clock**: injectable time source so expiry can be tested without sleeping
//!
//! # Example
//!
//! ```
//! use safesus_core::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let clock = Arc::new(ManualClock::new());
//! let cache = ResponseCache::with_clock(CacheConfig::default(), clock.clone());
//!
//! cache.set("https://safesus.app/api/waitlist-count", json!({"count": 42}));
//! clock.advance(Duration::from_secs(60));
//! assert!(cache.get("https://safesus.app/api/waitlist-count").is_none());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod clock;

pub use cache::{CacheConfig, CacheStats, ResponseCache, DEFAULT_TTL_SECS};
pub use clock::{Clock, ManualClock, SystemClock};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cache::{CacheConfig, CacheStats, ResponseCache};
    pub use crate::clock::{Clock, ManualClock, SystemClock};
}
