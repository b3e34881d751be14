//! Bangkok district aliases.
//!
//! Reverse geocoders routinely report a Bangkok district ("Sukhumvit",
//! "Khlong Toei") as the city. Any place name that hits this table resolves to
//! [`BANGKOK`] before general matching.

use crate::matcher::normalize;

/// Canonical place name the aliases resolve to.
pub const BANGKOK: &str = "Bangkok";

/// Substrings that always mean Bangkok (English and Thai romanized names).
const BANGKOK_NAMES: &[&str] = &["bangkok", "krung thep"];

/// Known Bangkok districts and neighbourhoods, lowercase.
pub const BANGKOK_DISTRICTS: &[&str] = &[
    // Khet (administrative districts)
    "phra nakhon",
    "dusit",
    "nong chok",
    "bang rak",
    "bang khen",
    "bang kapi",
    "pathum wan",
    "pathumwan",
    "pom prap sattru phai",
    "phra khanong",
    "min buri",
    "lat krabang",
    "yan nawa",
    "samphanthawong",
    "phaya thai",
    "thon buri",
    "thonburi",
    "huai khwang",
    "khlong san",
    "taling chan",
    "bang khun thian",
    "phasi charoen",
    "nong khaem",
    "rat burana",
    "bang phlat",
    "din daeng",
    "bueng kum",
    "sathon",
    "sathorn",
    "bang sue",
    "chatuchak",
    "bang kho laem",
    "prawet",
    "khlong toei",
    "khlong toei nuea",
    "suan luang",
    "chom thong",
    "don mueang",
    "ratchathewi",
    "lat phrao",
    "watthana",
    "bang khae",
    "lak si",
    "sai mai",
    "khan na yao",
    "saphan sung",
    "wang thonglang",
    "khlong sam wa",
    "bang na",
    "thawi watthana",
    "thung khru",
    "bang bon",
    // Neighbourhoods commonly returned as the locality
    "sukhumvit",
    "silom",
    "siam",
    "ratchada",
    "ratchadaphisek",
    "thong lo",
    "thonglor",
    "ekkamai",
    "asok",
    "phrom phong",
    "on nut",
    "pratunam",
    "yaowarat",
    "khao san",
    "ploenchit",
    "chit lom",
    "ratchaprasong",
];

/// Returns true if `text` names Bangkok or one of its districts.
///
/// Matches when the normalized text contains "bangkok" or "krung thep", contains
/// a district, or is itself contained in a district name. Empty text never
/// matches.
///
/// # Example
/// ```
/// use safesus_city::is_bangkok_alias;
///
/// assert!(is_bangkok_alias("Sukhumvit"));
/// assert!(is_bangkok_alias("Krung Thep Maha Nakhon"));
/// assert!(!is_bangkok_alias("Chiang Mai"));
/// ```
pub fn is_bangkok_alias(text: &str) -> bool {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return false;
    }

    if BANGKOK_NAMES.iter().any(|name| normalized.contains(name)) {
        return true;
    }

    BANGKOK_DISTRICTS
        .iter()
        .any(|district| normalized.contains(district) || district.contains(normalized.as_str()))
}
