//! REST client for the SafeSus API
//!
//! This crate provides a typed HTTP client for the SafeSus travel-safety API.
//!
//! # Features
//!
//! - **Environment-based configuration**: Load the API URL, keys and timeouts from environment variables
//! - **Response cache**: Cacheable reads are served from a session-scoped, TTL-bounded cache
//! - **Session handling**: Bearer token per session; switching sessions drops cached responses
//! - **Request correlation**: Track requests with unique IDs for debugging
//! - **Live pipeline**: Ranked pins and tips around a position, by city or by radius
//!
//! # Example
//!
//! ```rust,no_run
//! use safesus_api_client::SafeSusClient;
//! use safesus_geo::Coordinate;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SafeSusClient::new()?;
//!
//!     let catalog = client.cities().catalog().await?;
//!     let city = catalog.match_place("Sukhumvit");
//!
//!     let content = client
//!         .live()
//!         .load_nearby_content(Coordinate::new(13.7380, 100.5608), city)
//!         .await?;
//!     println!("{} pins nearby", content.pins.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
#[allow(missing_docs)]
pub mod models;

pub use client::SafeSusClient;
pub use config::{ClientConfig, Environment};
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::SafeSusClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::endpoints::{
        CitiesApi, Include, LiveApi, NearbyContent, NearbyOptions, NotificationsApi, PinsApi,
        TipsApi, WaitlistApi,
    };
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::models::*;
}
