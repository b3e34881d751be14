//! Distance formatting for display.

/// Renders a distance in meters for display.
///
/// Below 1000 m the value is a rounded meter count, otherwise kilometers with
/// one decimal place.
///
/// # Example
/// ```
/// use safesus_geo::format_distance;
///
/// assert_eq!(format_distance(500.0), "500m");
/// assert_eq!(format_distance(1500.0), "1.5km");
/// ```
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.round())
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}

/// Same as [`format_distance`] with the `" away"` suffix used in list badges.
pub fn format_distance_away(meters: f64) -> String {
    format!("{} away", format_distance(meters))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meters() {
        assert_eq!(format_distance(0.0), "0m");
        assert_eq!(format_distance(500.0), "500m");
        assert_eq!(format_distance(42.4), "42m");
        assert_eq!(format_distance(42.5), "43m");
    }

    #[test]
    fn test_kilometers() {
        assert_eq!(format_distance(1000.0), "1.0km");
        assert_eq!(format_distance(1500.0), "1.5km");
        assert_eq!(format_distance(12_345.0), "12.3km");
    }

    #[test]
    fn test_just_below_threshold_rounds_up() {
        assert_eq!(format_distance(999.6), "1000m");
    }

    #[test]
    fn test_away_suffix() {
        assert_eq!(format_distance_away(250.0), "250m away");
        assert_eq!(format_distance_away(2500.0), "2.5km away");
    }
}
