//! PostGIS geometry parsing utilities.
//!
//! Supports:
//! - WKT points: `POINT(lng lat)`
//! - GeoJSON polygons: `{"type": "Polygon", "coordinates": [[[lng, lat], ...]]}`
//! - WKT polygons: `POLYGON((lng lat, lng lat, ...))`

use crate::{Coordinate, GeoError, Result};
use serde_json::Value;

/// Parse a WKT POINT string.
///
/// Format: `POINT(longitude latitude)`, keyword case-insensitive.
pub fn parse_wkt_point(wkt: &str) -> Result<Coordinate> {
    let body = wkt_body(wkt, "POINT")?;
    let body = body
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .ok_or_else(|| GeoError::InvalidWkt("Invalid parentheses".into()))?;

    parse_wkt_pair(body)
}

/// Parse the outer ring of a WKT POLYGON string.
///
/// Pairs that fail to parse are skipped. An empty ring is an error.
pub fn parse_wkt_polygon(wkt: &str) -> Result<Vec<Coordinate>> {
    let body = wkt_body(wkt, "POLYGON")?;
    let ring = body
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .map(str::trim)
        .and_then(|b| b.strip_prefix('('))
        .ok_or_else(|| GeoError::InvalidWkt("Invalid parentheses".into()))?;

    // Only the outer ring is rendered; holes are ignored.
    let outer = ring.split(')').next().unwrap_or(ring);

    let coords: Vec<Coordinate> = outer
        .split(',')
        .filter_map(|pair| parse_wkt_pair(pair).ok())
        .collect();

    if coords.is_empty() {
        return Err(GeoError::InvalidWkt("Polygon ring has no valid coordinates".into()));
    }

    Ok(coords)
}

/// Parse a zone geometry into its outer ring.
///
/// Accepts a GeoJSON Polygon object (first ring of `[lng, lat]` pairs) or a WKT
/// `POLYGON` string. Returns `None` when nothing usable is found.
///
/// # Example
/// ```
/// use safesus_geo::parse_polygon_ring;
/// use serde_json::json;
///
/// let ring = parse_polygon_ring(&json!("POLYGON((100.5 13.7, 100.6 13.7, 100.6 13.8, 100.5 13.7))")).unwrap();
/// assert_eq!(ring.len(), 4);
/// assert_eq!(ring[0].latitude, 13.7);
/// ```
pub fn parse_polygon_ring(value: &Value) -> Option<Vec<Coordinate>> {
    match value {
        Value::Object(_) => {
            let ring = value
                .get("coordinates")
                .and_then(Value::as_array)?
                .first()?
                .as_array()?;

            let coords: Vec<Coordinate> = ring
                .iter()
                .filter_map(|pair| {
                    let pair = pair.as_array()?;
                    if pair.len() < 2 {
                        return None;
                    }
                    Coordinate::from_lng_lat(pair[0].as_f64()?, pair[1].as_f64()?).validated()
                })
                .collect();

            (!coords.is_empty()).then_some(coords)
        }
        Value::String(wkt) => parse_wkt_polygon(wkt).ok(),
        _ => None,
    }
}

/// Strips the geometry keyword and returns the trimmed remainder.
fn wkt_body<'a>(wkt: &'a str, keyword: &str) -> Result<&'a str> {
    let wkt = wkt.trim();

    let matches_keyword = wkt
        .get(..keyword.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword));

    if !matches_keyword {
        return Err(GeoError::InvalidWkt(format!("Expected {keyword}, got: {wkt}")));
    }

    Ok(wkt[keyword.len()..].trim())
}

/// Parses `"lng lat"` into a validated coordinate.
fn parse_wkt_pair(pair: &str) -> Result<Coordinate> {
    let parts: Vec<&str> = pair.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(GeoError::InvalidWkt(format!(
            "Expected 2 coordinates, got {}",
            parts.len()
        )));
    }

    let lng: f64 = parts[0]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid longitude: {}", parts[0])))?;
    let lat: f64 = parts[1]
        .parse()
        .map_err(|_| GeoError::InvalidWkt(format!("Invalid latitude: {}", parts[1])))?;

    Coordinate::try_new(lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_wkt_point() {
        let coord = parse_wkt_point("POINT(100.5018 13.7563)").unwrap();
        assert!((coord.latitude - 13.7563).abs() < 0.0001);
    }

    #[test]
    fn test_parse_wkt_with_space_and_lowercase() {
        let coord = parse_wkt_point("point (100.5 13.7)").unwrap();
        assert_eq!(coord, Coordinate::new(13.7, 100.5));
    }

    #[test]
    fn test_parse_invalid_wkt_point() {
        assert!(parse_wkt_point("POLYGON((0 0, 1 1, 1 0, 0 0))").is_err());
        assert!(parse_wkt_point("POINT(100.5)").is_err());
        assert!(parse_wkt_point("POINT(abc 13.7)").is_err());
        assert!(parse_wkt_point("POINT 100.5 13.7").is_err());
    }

    #[test]
    fn test_out_of_range_point_rejected() {
        let err = parse_wkt_point("POINT(13.7 100.5)").unwrap_err();
        assert!(matches!(err, GeoError::InvalidCoordinate(_)));
    }

    #[test]
    fn test_parse_negative_coordinates() {
        let coord = parse_wkt_point("POINT(-74.0060 40.7128)").unwrap();
        assert!((coord.latitude - 40.7128).abs() < 0.0001);
        assert!((coord.longitude - (-74.0060)).abs() < 0.0001);
    }

    #[test]
    fn test_parse_wkt_polygon() {
        let ring = parse_wkt_polygon("POLYGON((100.5 13.7, 100.6 13.7, 100.6 13.8, 100.5 13.7))").unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[1], Coordinate::new(13.7, 100.6));
    }

    #[test]
    fn test_parse_wkt_polygon_skips_bad_pairs() {
        let ring = parse_wkt_polygon("polygon (( 100.5 13.7, oops, 100.6 13.8 ))").unwrap();
        assert_eq!(ring.len(), 2);
    }

    #[test]
    fn test_parse_wkt_polygon_ignores_holes() {
        let ring = parse_wkt_polygon("POLYGON((0 0, 10 0, 10 10, 0 0), (1 1, 2 1, 2 2, 1 1))").unwrap();
        assert_eq!(ring.len(), 4);
    }

    #[test]
    fn test_parse_wkt_polygon_errors() {
        assert!(parse_wkt_polygon("POINT(1 2)").is_err());
        assert!(parse_wkt_polygon("POLYGON((a b, c d))").is_err());
        assert!(parse_wkt_polygon("POLYGON(1 2, 3 4)").is_err());
    }

    #[test]
    fn test_parse_geojson_polygon_ring() {
        let value = json!({
            "type": "Polygon",
            "coordinates": [[[100.5, 13.7], [100.6, 13.7], [100.6, 13.8], [100.5, 13.7]]]
        });
        let ring = parse_polygon_ring(&value).unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[2], Coordinate::new(13.8, 100.6));
    }

    #[test]
    fn test_polygon_ring_rejects_other_values() {
        assert!(parse_polygon_ring(&json!(null)).is_none());
        assert!(parse_polygon_ring(&json!({"coordinates": []})).is_none());
        assert!(parse_polygon_ring(&json!({"coordinates": [100.5, 13.7]})).is_none());
        assert!(parse_polygon_ring(&json!(42)).is_none());
    }
}
