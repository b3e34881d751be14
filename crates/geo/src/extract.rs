//! Coordinate extraction from mixed-shape API records.
//!
//! Records coming back from the SafeSus API carry their position in one of
//! several shapes. [`LocatableRecord`] captures every shape a record may expose,
//! [`LocatableRecord::shapes`] lists the ones present in priority order and
//! [`extract_coordinates`] resolves the first one that yields a valid coordinate:
//!
//! 1. flat `latitude` / `longitude`
//! 2. flat `lat` / `lng`
//! 3. `geom`: GeoJSON `coordinates` (`[lng, lat]`), then `x` / `y`, then WKT text
//! 4. `location`: same geometry forms as `geom`
//!
//! Malformed shapes are skipped, never reported as errors.

use crate::postgis::parse_wkt_point;
use crate::Coordinate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Anything that may carry a position.
pub trait Locatable {
    /// Returns the position, or `None` when the record has no usable one.
    fn coordinate(&self) -> Option<Coordinate>;
}

/// The position-bearing fields of an API record.
///
/// Fields are kept as raw JSON so a malformed value in one shape does not stop
/// the record from deserializing; the shape is simply skipped at resolution.
/// Designed to be `#[serde(flatten)]`-ed into typed records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocatableRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geom: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
}

/// A single way a record can express its position.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionShape {
    /// Flat `latitude` / `longitude` fields
    LatitudeLongitude { latitude: f64, longitude: f64 },
    /// Flat `lat` / `lng` fields
    LatLng { lat: f64, lng: f64 },
    /// Nested `geom` field
    Geometry(Geometry),
    /// Nested `location` field
    Location(Geometry),
}

/// Geometry forms accepted for a point.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// GeoJSON-style `coordinates: [lng, lat, ...]`
    Coordinates { longitude: f64, latitude: f64 },
    /// Explicit `x` (longitude) and `y` (latitude)
    Xy { x: f64, y: f64 },
    /// PostGIS text output, e.g. `POINT(100.5 13.7)`
    Wkt(String),
}

impl Geometry {
    /// Reads a point geometry out of a JSON value.
    ///
    /// An object with a well-formed `coordinates` pair wins over `x` / `y`.
    /// Anything else (polygons, short arrays, non-numeric entries) is `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Object(map) => {
                let pair = map
                    .get("coordinates")
                    .and_then(Value::as_array)
                    .filter(|coords| coords.len() >= 2)
                    .and_then(|coords| Some((coords[0].as_f64()?, coords[1].as_f64()?)));

                if let Some((longitude, latitude)) = pair {
                    return Some(Geometry::Coordinates { longitude, latitude });
                }

                let x = map.get("x").and_then(Value::as_f64)?;
                let y = map.get("y").and_then(Value::as_f64)?;
                Some(Geometry::Xy { x, y })
            }
            Value::String(text) => Some(Geometry::Wkt(text.clone())),
            _ => None,
        }
    }

    /// Resolves the geometry to a validated coordinate.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let coord = match self {
            Geometry::Coordinates { longitude, latitude } => {
                Coordinate::from_lng_lat(*longitude, *latitude)
            }
            Geometry::Xy { x, y } => Coordinate::from_lng_lat(*x, *y),
            Geometry::Wkt(text) => parse_wkt_point(text).ok()?,
        };
        coord.validated()
    }
}

impl PositionShape {
    /// Resolves the shape to a validated coordinate.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            PositionShape::LatitudeLongitude { latitude, longitude } => {
                Coordinate::new(*latitude, *longitude).validated()
            }
            PositionShape::LatLng { lat, lng } => Coordinate::new(*lat, *lng).validated(),
            PositionShape::Geometry(geometry) | PositionShape::Location(geometry) => {
                geometry.coordinate()
            }
        }
    }
}

impl LocatableRecord {
    /// Picks the position fields out of an arbitrary JSON record.
    ///
    /// Non-object values produce an empty record.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Self::deserialize(value).unwrap_or_default()
    }

    /// Record carrying only flat `latitude` / `longitude` fields.
    pub fn from_coordinate(coord: Coordinate) -> Self {
        Self {
            latitude: Some(coord.latitude.into()),
            longitude: Some(coord.longitude.into()),
            ..Self::default()
        }
    }

    /// Lists the shapes present on this record in resolution priority order.
    pub fn shapes(&self) -> Vec<PositionShape> {
        let mut shapes = Vec::with_capacity(4);

        if let Some((latitude, longitude)) = numeric_pair(&self.latitude, &self.longitude) {
            shapes.push(PositionShape::LatitudeLongitude { latitude, longitude });
        }
        if let Some((lat, lng)) = numeric_pair(&self.lat, &self.lng) {
            shapes.push(PositionShape::LatLng { lat, lng });
        }
        if let Some(geometry) = self.geom.as_ref().and_then(Geometry::from_value) {
            shapes.push(PositionShape::Geometry(geometry));
        }
        if let Some(geometry) = self.location.as_ref().and_then(Geometry::from_value) {
            shapes.push(PositionShape::Location(geometry));
        }

        shapes
    }

    /// Returns true if no position field is present at all.
    pub fn is_empty(&self) -> bool {
        self.latitude.is_none()
            && self.longitude.is_none()
            && self.lat.is_none()
            && self.lng.is_none()
            && self.geom.is_none()
            && self.location.is_none()
    }
}

impl Locatable for LocatableRecord {
    fn coordinate(&self) -> Option<Coordinate> {
        self.shapes().iter().find_map(PositionShape::coordinate)
    }
}

impl Locatable for Value {
    fn coordinate(&self) -> Option<Coordinate> {
        LocatableRecord::from_value(self).coordinate()
    }
}

impl Locatable for Coordinate {
    fn coordinate(&self) -> Option<Coordinate> {
        self.validated()
    }
}

impl<T: Locatable + ?Sized> Locatable for &T {
    fn coordinate(&self) -> Option<Coordinate> {
        (**self).coordinate()
    }
}

/// Extracts a coordinate from an API record of unknown shape.
///
/// # Returns
/// * `Some(Coordinate)` for the first shape (in priority order) that resolves
/// * `None` if no shape is present or every present shape is malformed
///
/// # Example
/// ```
/// use safesus_geo::extract_coordinates;
/// use serde_json::json;
///
/// let coord = extract_coordinates(&json!({"geom": {"coordinates": [100.5, 13.7]}})).unwrap();
/// assert_eq!((coord.latitude, coord.longitude), (13.7, 100.5));
///
/// assert!(extract_coordinates(&json!({})).is_none());
/// ```
pub fn extract_coordinates(record: &Value) -> Option<Coordinate> {
    record.coordinate()
}

fn numeric_pair(a: &Option<Value>, b: &Option<Value>) -> Option<(f64, f64)> {
    Some((a.as_ref()?.as_f64()?, b.as_ref()?.as_f64()?))
}
