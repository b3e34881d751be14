//! CLI command implementations

pub mod cities;
pub mod detect;
pub mod distance;
pub mod nearby;
pub mod tips;
