//! City detection from a reverse-geocoded place.

use crate::alias::{is_bangkok_alias, BANGKOK};
use crate::catalog::SupportedCity;
use crate::matcher::{match_city_with_rule, RuleKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The fields of a reverse-geocoding result the matcher cares about.
///
/// Providers fill these at their own discretion; any of them may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    /// Locality, e.g. "Chiang Mai"
    pub city: Option<String>,
    /// Sub-region, e.g. a province or district
    pub subregion: Option<String>,
    /// Region or state
    pub region: Option<String>,
    /// Finer-grained district, when the provider reports one
    pub district: Option<String>,
}

impl GeocodedPlace {
    /// Place with only a locality name.
    pub fn named(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
            ..Self::default()
        }
    }

    /// Builder-style method to set the district
    #[must_use]
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    /// Most specific name available: city, then subregion, then region.
    pub fn place_name(&self) -> Option<&str> {
        [&self.city, &self.subregion, &self.region]
            .into_iter()
            .find_map(|field| non_blank(field.as_deref()))
    }

    /// District, falling back to the subregion.
    pub fn district(&self) -> Option<&str> {
        non_blank(self.district.as_deref()).or_else(|| non_blank(self.subregion.as_deref()))
    }
}

/// Outcome of city detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CityDetection {
    /// No usable place name: the location itself is unknown
    Unknown,
    /// The place is known but not in the catalog
    Unsupported {
        /// Name the place resolved to
        place_name: String,
    },
    /// The place matched a catalog entry
    Supported {
        /// The matched entry
        city: SupportedCity,
        /// Name the place resolved to
        place_name: String,
        /// Rule that produced the match
        #[serde(skip)]
        rule: RuleKind,
    },
}

impl CityDetection {
    /// The matched city, if any.
    pub fn city(&self) -> Option<&SupportedCity> {
        match self {
            CityDetection::Supported { city, .. } => Some(city),
            _ => None,
        }
    }

    /// The resolved place name, if any.
    pub fn place_name(&self) -> Option<&str> {
        match self {
            CityDetection::Unknown => None,
            CityDetection::Unsupported { place_name }
            | CityDetection::Supported { place_name, .. } => Some(place_name),
        }
    }
}

/// Resolves the name to match for a geocoded place.
///
/// A Bangkok district, in either the district or the place name, forces
/// "Bangkok", even when the provider gave no city.
pub fn resolve_place_name(place: &GeocodedPlace) -> Option<String> {
    let place_name = place.place_name();
    if place.district().is_some_and(is_bangkok_alias) || place_name.is_some_and(is_bangkok_alias) {
        return Some(BANGKOK.to_string());
    }
    place_name.map(str::to_string)
}

/// Detects which supported city, if any, a geocoded place is in.
///
/// # Example
/// ```
/// use safesus_city::{detect_city, CityDetection, GeocodedPlace, SupportedCity};
///
/// let catalog = vec![SupportedCity::new(1, "Bangkok", "bangkok", "Thailand")];
///
/// let place = GeocodedPlace::named("Khet Watthana").with_district("Khlong Toei Nuea");
/// assert_eq!(detect_city(&place, &catalog).city().map(|c| c.id), Some(1));
///
/// let place = GeocodedPlace::named("Luang Prabang");
/// assert!(matches!(detect_city(&place, &catalog), CityDetection::Unsupported { .. }));
///
/// assert_eq!(detect_city(&GeocodedPlace::default(), &catalog), CityDetection::Unknown);
/// ```
pub fn detect_city(place: &GeocodedPlace, catalog: &[SupportedCity]) -> CityDetection {
    let Some(place_name) = resolve_place_name(place) else {
        debug!("No place name in geocoding result");
        return CityDetection::Unknown;
    };

    match match_city_with_rule(&place_name, catalog) {
        Some(found) => {
            debug!(
                place = %place_name,
                city = %found.city.slug,
                rule = found.rule.as_str(),
                "Matched supported city"
            );
            CityDetection::Supported {
                city: found.city.clone(),
                place_name,
                rule: found.rule,
            }
        }
        None => {
            debug!(place = %place_name, "Place is not a supported city");
            CityDetection::Unsupported { place_name }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<SupportedCity> {
        vec![
            SupportedCity::new(1, "Bangkok", "bangkok", "Thailand"),
            SupportedCity::new(2, "Chiang Mai", "chiang-mai", "Thailand"),
        ]
    }

    #[test]
    fn test_place_name_priority() {
        let place = GeocodedPlace {
            city: None,
            subregion: Some("Mueang Chiang Mai".into()),
            region: Some("Chiang Mai Province".into()),
            district: None,
        };
        assert_eq!(place.place_name(), Some("Mueang Chiang Mai"));
        assert_eq!(place.district(), Some("Mueang Chiang Mai"));
    }

    #[test]
    fn test_blank_fields_are_skipped() {
        let place = GeocodedPlace {
            city: Some("  ".into()),
            subregion: None,
            region: Some("Phuket".into()),
            district: Some(String::new()),
        };
        assert_eq!(place.place_name(), Some("Phuket"));
        assert_eq!(place.district(), None);
    }

    #[test]
    fn test_district_forces_bangkok() {
        let place = GeocodedPlace::named("Some Locality").with_district("Sukhumvit");
        assert_eq!(resolve_place_name(&place).as_deref(), Some("Bangkok"));
    }

    #[test]
    fn test_place_name_alias_forces_bangkok() {
        let place = GeocodedPlace::named("Khet Pathum Wan");
        assert_eq!(resolve_place_name(&place).as_deref(), Some("Bangkok"));
        assert_eq!(detect_city(&place, &catalog()).city().map(|c| c.id), Some(1));
    }

    #[test]
    fn test_district_rescues_missing_city() {
        let place = GeocodedPlace::default().with_district("Silom");
        let detection = detect_city(&place, &catalog());
        assert_eq!(detection.city().map(|c| c.id), Some(1));
        assert_eq!(detection.place_name(), Some("Bangkok"));
    }

    #[test]
    fn test_supported_city() {
        let detection = detect_city(&GeocodedPlace::named("Chiang Mai"), &catalog());
        match detection {
            CityDetection::Supported { city, place_name, rule } => {
                assert_eq!(city.id, 2);
                assert_eq!(place_name, "Chiang Mai");
                assert_eq!(rule, RuleKind::ExactName);
            }
            other => panic!("unexpected detection: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_is_distinct_from_unknown() {
        let unsupported = detect_city(&GeocodedPlace::named("Nonexistentville"), &catalog());
        assert_eq!(
            unsupported,
            CityDetection::Unsupported { place_name: "Nonexistentville".into() }
        );
        assert!(unsupported.city().is_none());

        let unknown = detect_city(&GeocodedPlace::default(), &catalog());
        assert_eq!(unknown, CityDetection::Unknown);
        assert!(unknown.place_name().is_none());
    }

    #[test]
    fn test_unsupported_serializes_with_status() {
        let detection = CityDetection::Unsupported { place_name: "Hanoi".into() };
        let json = serde_json::to_value(&detection).unwrap();
        assert_eq!(json["status"], "unsupported");
        assert_eq!(json["place_name"], "Hanoi");
    }
}
