//! Place-name to catalog matching.
//!
//! Matching runs an ordered cascade of rules over the catalog. Each rule is a
//! pure predicate on a normalized place name and a normalized catalog entry;
//! the first rule that matches any entry wins, and within a rule the first
//! entry in catalog order wins.

use crate::alias::{is_bangkok_alias, BANGKOK};
use crate::catalog::SupportedCity;
use unicode_segmentation::UnicodeSegmentation;

/// Number of leading characters compared by the prefix rule.
const PREFIX_LEN: usize = 4;

/// Trims and lowercases a name for comparison.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Identifies a rule of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Place equals the display name
    ExactName,
    /// Place equals the slug
    ExactSlug,
    /// Place contains the slug
    PlaceContainsSlug,
    /// Slug contains the place
    SlugContainsPlace,
    /// Display name starts with the first four characters of the place
    NamePrefix,
}

impl RuleKind {
    /// Short name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::ExactName => "exact_name",
            RuleKind::ExactSlug => "exact_slug",
            RuleKind::PlaceContainsSlug => "place_contains_slug",
            RuleKind::SlugContainsPlace => "slug_contains_place",
            RuleKind::NamePrefix => "name_prefix",
        }
    }
}

/// Normalized view of a catalog entry.
#[derive(Debug, Clone)]
pub struct CityKey {
    name: String,
    slug: String,
}

impl CityKey {
    /// Normalizes a catalog entry.
    pub fn new(city: &SupportedCity) -> Self {
        Self {
            name: normalize(&city.name),
            slug: normalize(&city.slug),
        }
    }
}

/// One step of the matching cascade.
#[derive(Debug, Clone, Copy)]
pub struct MatchRule {
    /// Which rule this is
    pub kind: RuleKind,
    predicate: fn(&str, &CityKey) -> bool,
}

impl MatchRule {
    /// Evaluates the rule for a normalized, non-empty place name.
    pub fn matches(&self, place: &str, city: &CityKey) -> bool {
        (self.predicate)(place, city)
    }
}

/// The cascade, in evaluation order.
pub const CASCADE: [MatchRule; 5] = [
    MatchRule { kind: RuleKind::ExactName, predicate: exact_name },
    MatchRule { kind: RuleKind::ExactSlug, predicate: exact_slug },
    MatchRule { kind: RuleKind::PlaceContainsSlug, predicate: place_contains_slug },
    MatchRule { kind: RuleKind::SlugContainsPlace, predicate: slug_contains_place },
    MatchRule { kind: RuleKind::NamePrefix, predicate: name_prefix },
];

fn exact_name(place: &str, city: &CityKey) -> bool {
    city.name == place
}

fn exact_slug(place: &str, city: &CityKey) -> bool {
    !city.slug.is_empty() && city.slug == place
}

fn place_contains_slug(place: &str, city: &CityKey) -> bool {
    !city.slug.is_empty() && place.contains(city.slug.as_str())
}

fn slug_contains_place(place: &str, city: &CityKey) -> bool {
    city.slug.contains(place)
}

fn name_prefix(place: &str, city: &CityKey) -> bool {
    let prefix: String = place.graphemes(true).take(PREFIX_LEN).collect();
    city.name.starts_with(prefix.as_str())
}

/// A successful match and the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityMatch<'a> {
    /// The matched catalog entry
    pub city: &'a SupportedCity,
    /// The rule that matched
    pub rule: RuleKind,
}

/// Matches a place name against the catalog, reporting the winning rule.
///
/// Bangkok aliases are rewritten to "Bangkok" first. Empty place names never
/// match.
pub fn match_city_with_rule<'a>(place: &str, catalog: &'a [SupportedCity]) -> Option<CityMatch<'a>> {
    let place = if is_bangkok_alias(place) {
        normalize(BANGKOK)
    } else {
        normalize(place)
    };

    if place.is_empty() {
        return None;
    }

    let keys: Vec<CityKey> = catalog.iter().map(CityKey::new).collect();

    CASCADE.iter().find_map(|rule| {
        catalog
            .iter()
            .zip(&keys)
            .find(|(_, key)| rule.matches(&place, key))
            .map(|(city, _)| CityMatch { city, rule: rule.kind })
    })
}

/// Matches a free-text place name to a catalog entry.
///
/// # Returns
/// * `Some(city)` for the first entry matched by the earliest rule
/// * `None` when the place is not a supported city
pub fn match_city<'a>(place: &str, catalog: &'a [SupportedCity]) -> Option<&'a SupportedCity> {
    match_city_with_rule(place, catalog).map(|m| m.city)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn catalog() -> Vec<SupportedCity> {
        vec![
            SupportedCity::new(1, "Bangkok", "bangkok", "Thailand"),
            SupportedCity::new(2, "Chiang Mai", "chiang-mai", "Thailand"),
            SupportedCity::new(3, "Phuket", "phuket", "Thailand"),
            SupportedCity::new(4, "Ho Chi Minh City", "hcmc", "Vietnam"),
            SupportedCity::new(5, "Pattaya", "pattaya", "Thailand"),
        ]
    }

    fn key(name: &str, slug: &str) -> CityKey {
        CityKey { name: name.into(), slug: slug.into() }
    }

    fn matched(place: &str) -> Option<(i64, RuleKind)> {
        let catalog = catalog();
        match_city_with_rule(place, &catalog).map(|m| (m.city.id, m.rule))
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Chiang Mai \n"), "chiang mai");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_rule_exact_name() {
        assert!(exact_name("chiang mai", &key("chiang mai", "chiang-mai")));
        assert!(!exact_name("chiang", &key("chiang mai", "chiang-mai")));
    }

    #[test]
    fn test_rule_exact_slug() {
        assert!(exact_slug("hcmc", &key("ho chi minh city", "hcmc")));
        assert!(!exact_slug("", &key("x", "")));
    }

    #[test]
    fn test_rule_place_contains_slug() {
        assert!(place_contains_slug("amphoe mueang phuket", &key("phuket", "phuket")));
        assert!(!place_contains_slug("anything", &key("x", "")));
    }

    #[test]
    fn test_rule_slug_contains_place() {
        assert!(slug_contains_place("chiang", &key("chiang mai", "chiang-mai")));
        assert!(!slug_contains_place("mai chiang", &key("chiang mai", "chiang-mai")));
    }

    #[test]
    fn test_rule_name_prefix() {
        assert!(name_prefix("pattay", &key("pattaya", "pattaya")));
        assert!(name_prefix("ho chi minh", &key("ho chi minh city", "hcmc")));
        assert!(!name_prefix("phan", &key("phuket", "phuket")));
        // Shorter than four characters compares the whole place name.
        assert!(name_prefix("ph", &key("phuket", "phuket")));
    }

    #[test]
    fn test_exact_name_match() {
        assert_eq!(matched("Chiang Mai"), Some((2, RuleKind::ExactName)));
        assert_eq!(matched("  PHUKET "), Some((3, RuleKind::ExactName)));
    }

    #[test]
    fn test_exact_slug_match() {
        assert_eq!(matched("HCMC"), Some((4, RuleKind::ExactSlug)));
    }

    #[test]
    fn test_place_contains_slug_match() {
        assert_eq!(matched("Mueang Pattaya"), Some((5, RuleKind::PlaceContainsSlug)));
    }

    #[test]
    fn test_slug_contains_place_match() {
        assert_eq!(matched("Chiang"), Some((2, RuleKind::SlugContainsPlace)));
    }

    #[test]
    fn test_prefix_match() {
        assert_eq!(matched("Ho Chi Minh"), Some((4, RuleKind::NamePrefix)));
    }

    #[test]
    fn test_bangkok_district_alias() {
        assert_eq!(matched("Sukhumvit"), Some((1, RuleKind::ExactName)));
        assert_eq!(matched("Krung Thep Maha Nakhon"), Some((1, RuleKind::ExactName)));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(matched("Nonexistentville"), None);
        assert_eq!(matched(""), None);
        assert_eq!(matched("   "), None);
    }

    #[test]
    fn test_earlier_rule_beats_catalog_order() {
        // "phuket" is a substring match for entry 10 but an exact match for entry 3.
        let mut cities = vec![SupportedCity::new(10, "Phuket Old Town", "phuket-old-town", "Thailand")];
        cities.extend(catalog());
        let m = match_city_with_rule("Phuket", &cities).unwrap();
        assert_eq!((m.city.id, m.rule), (3, RuleKind::ExactName));
    }

    #[test]
    fn test_catalog_order_breaks_ties_within_rule() {
        let catalog = vec![
            SupportedCity::new(1, "Porto", "porto", "Portugal"),
            SupportedCity::new(2, "Portland", "portland", "United States"),
        ];
        let m = match_city_with_rule("Port", &catalog).unwrap();
        assert_eq!((m.city.id, m.rule), (1, RuleKind::SlugContainsPlace));
    }

    #[test]
    fn test_bangkok_alias_without_bangkok_entry() {
        let catalog = vec![SupportedCity::new(2, "Chiang Mai", "chiang-mai", "Thailand")];
        assert!(match_city("Silom", &catalog).is_none());
    }

    #[test]
    fn test_empty_catalog() {
        assert!(match_city("Bangkok", &[]).is_none());
    }

    proptest! {
        #[test]
        fn prop_result_comes_from_catalog(place in "\\PC{0,24}") {
            let catalog = catalog();
            if let Some(city) = match_city(&place, &catalog) {
                prop_assert!(catalog.iter().any(|c| c == city));
            }
        }

        #[test]
        fn prop_exact_names_match_themselves(idx in 0usize..5) {
            let catalog = catalog();
            let city = &catalog[idx];
            prop_assert_eq!(match_city(&city.name, &catalog).map(|c| c.id), Some(city.id));
        }
    }
}
