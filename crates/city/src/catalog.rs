//! Supported-city catalog.

use crate::detect::{detect_city, CityDetection, GeocodedPlace};
use crate::matcher::{match_city, normalize};
use serde::{Deserialize, Serialize};

/// A city entry as served by `GET /cities`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedCity {
    /// Backend identifier
    pub id: i64,
    /// Display name, e.g. "Chiang Mai"
    pub name: String,
    /// URL-safe identifier, e.g. "chiang-mai"
    pub slug: String,
    /// Country name
    #[serde(default)]
    pub country: String,
    /// Whether the city has curated safety content
    #[serde(default)]
    pub supported: bool,
}

impl SupportedCity {
    /// Creates a supported catalog entry.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        slug: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            country: country.into(),
            supported: true,
        }
    }
}

/// Read-only catalog of cities, loaded once per session.
///
/// Order is significant: matching walks entries in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityCatalog {
    cities: Vec<SupportedCity>,
}

impl CityCatalog {
    /// Wraps a list of cities, keeping their order.
    pub fn new(cities: Vec<SupportedCity>) -> Self {
        Self { cities }
    }

    /// All entries in catalog order.
    pub fn cities(&self) -> &[SupportedCity] {
        &self.cities
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns true if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Looks a city up by slug, case-insensitively.
    pub fn find_by_slug(&self, slug: &str) -> Option<&SupportedCity> {
        let slug = normalize(slug);
        self.cities.iter().find(|c| normalize(&c.slug) == slug)
    }

    /// Looks a city up by id.
    pub fn find_by_id(&self, id: i64) -> Option<&SupportedCity> {
        self.cities.iter().find(|c| c.id == id)
    }

    /// Matches a free-text place name against the catalog.
    pub fn match_place(&self, place: &str) -> Option<&SupportedCity> {
        match_city(place, &self.cities)
    }

    /// Detects the city for a reverse-geocoded place.
    pub fn detect(&self, place: &GeocodedPlace) -> CityDetection {
        detect_city(place, &self.cities)
    }
}

impl From<Vec<SupportedCity>> for CityCatalog {
    fn from(cities: Vec<SupportedCity>) -> Self {
        Self::new(cities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CityCatalog {
        CityCatalog::new(vec![
            SupportedCity::new(1, "Bangkok", "bangkok", "Thailand"),
            SupportedCity::new(2, "Chiang Mai", "chiang-mai", "Thailand"),
        ])
    }

    #[test]
    fn test_find_by_slug_case_insensitive() {
        assert_eq!(catalog().find_by_slug(" Chiang-Mai ").map(|c| c.id), Some(2));
        assert!(catalog().find_by_slug("phuket").is_none());
    }

    #[test]
    fn test_find_by_id() {
        assert_eq!(catalog().find_by_id(1).map(|c| c.name.as_str()), Some("Bangkok"));
    }

    #[test]
    fn test_deserialize_from_api() {
        let json = r#"[{"id": 7, "name": "Phuket", "slug": "phuket", "country": "Thailand", "supported": false}]"#;
        let catalog: CityCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.cities()[0].supported);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let city: SupportedCity = serde_json::from_str(r#"{"id": 3, "name": "Krabi", "slug": "krabi"}"#).unwrap();
        assert_eq!(city.country, "");
        assert!(!city.supported);
    }
}
