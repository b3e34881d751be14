//! Supported-city catalog and place-name matching for SafeSus.
//!
//! This crate provides:
//! - The [`SupportedCity`] catalog entry and a [`CityCatalog`] wrapper
//! - The Bangkok district alias table
//! - An ordered cascade of match rules from a free-text place name to a catalog entry
//! - City detection from a reverse-geocoded place
//!
//! # Example
//!
//! ```
//! use safesus_city::{match_city, SupportedCity};
//!
//! let catalog = vec![
//!     SupportedCity::new(1, "Bangkok", "bangkok", "Thailand"),
//!     SupportedCity::new(2, "Chiang Mai", "chiang-mai", "Thailand"),
//! ];
//!
//! assert_eq!(match_city("Sukhumvit", &catalog).map(|c| c.id), Some(1));
//! assert!(match_city("Nonexistentville", &catalog).is_none());
//! ```

mod alias;
mod catalog;
mod detect;
mod matcher;

pub use alias::{is_bangkok_alias, BANGKOK, BANGKOK_DISTRICTS};
pub use catalog::{CityCatalog, SupportedCity};
pub use detect::{detect_city, resolve_place_name, CityDetection, GeocodedPlace};
pub use matcher::{
    match_city, match_city_with_rule, normalize, CityKey, CityMatch, MatchRule, RuleKind, CASCADE,
};
