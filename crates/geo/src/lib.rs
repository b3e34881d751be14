//! Geospatial helpers for SafeSus.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - Coordinate extraction from mixed-shape API records
//! - PostGIS point and polygon parsing (GeoJSON and WKT)
//! - Distance ranking of record lists, with optional parallelism
//! - Distance formatting for display
//!
//! # Example
//!
//! ```
//! use safesus_geo::{distance_meters, extract_coordinates, format_distance};
//! use serde_json::json;
//!
//! let pin = json!({"location": {"type": "Point", "coordinates": [100.5018, 13.7563]}});
//! let coord = extract_coordinates(&pin).unwrap();
//!
//! let meters = distance_meters(13.7465, 100.5348, coord.latitude, coord.longitude);
//! assert_eq!(format_distance(meters), "3.7km");
//! ```

mod error;
mod extract;
mod format;
mod haversine;
mod postgis;
pub mod batch;

pub use batch::{annotate_distances, rank_by_distance, MissingPosition, RankOptions, Ranked};
pub use error::{GeoError, GeoErrorCode, Result};
pub use extract::{extract_coordinates, Geometry, Locatable, LocatableRecord, PositionShape};
pub use format::{format_distance, format_distance_away};
pub use haversine::{
    distance_meters, haversine_distance, haversine_distance_meters, EARTH_RADIUS_KM,
    EARTH_RADIUS_M,
};
pub use postgis::{parse_polygon_ring, parse_wkt_point, parse_wkt_polygon};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Builds a coordinate from a GeoJSON-ordered `[longitude, latitude]` pair.
    #[inline]
    pub fn from_lng_lat(longitude: f64, latitude: f64) -> Self {
        Self::new(latitude, longitude)
    }

    /// Returns true if both values are finite and inside the valid ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Creates a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    /// [`GeoError::InvalidCoordinate`] when the pair fails [`Coordinate::is_valid`].
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate(format!("({latitude}, {longitude}) is out of range")))
        }
    }

    /// Returns `Some(self)` when the coordinate is valid.
    #[inline]
    pub fn validated(self) -> Option<Self> {
        self.is_valid().then_some(self)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(13.7563, 100.5018);
        assert_eq!(coord.latitude, 13.7563);
        assert_eq!(coord.longitude, 100.5018);
    }

    #[test]
    fn test_from_lng_lat_swaps_order() {
        let coord = Coordinate::from_lng_lat(100.5, 13.7);
        assert_eq!(coord.latitude, 13.7);
        assert_eq!(coord.longitude, 100.5);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(Coordinate::new(0.0, f64::INFINITY).validated().is_none());
    }

    #[test]
    fn test_try_new_reports_coded_error() {
        assert_eq!(Coordinate::try_new(13.75, 100.5).unwrap(), Coordinate::new(13.75, 100.5));

        let err = Coordinate::try_new(95.0, 100.5).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::InvalidCoordinate);
        assert_eq!(err.code() as u32, 10002);
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (13.7563, 100.5018).into();
        assert_eq!(coord.latitude, 13.7563);
    }
}
