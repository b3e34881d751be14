//! Request and response types for the SafeSus API
//!
//! Enumerations fall back to an `Other`/`Unknown` variant for values this
//! client does not know about, so new backend values never fail a whole response.

use safesus_city::SupportedCity;
use safesus_geo::{parse_polygon_ring, Coordinate, Locatable, LocatableRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Geometry
// ============================================================================

/// A GeoJSON point, as sent in submissions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    kind: PointType,
    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum PointType {
    Point,
}

impl GeoPoint {
    /// Position of the point
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::from_lng_lat(self.coordinates[0], self.coordinates[1])
    }
}

impl From<Coordinate> for GeoPoint {
    fn from(coord: Coordinate) -> Self {
        Self {
            kind: PointType::Point,
            coordinates: [coord.longitude, coord.latitude],
        }
    }
}

// ============================================================================
// Zones
// ============================================================================

/// Safety level of a zone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneLevel {
    Recommended,
    Neutral,
    Caution,
    Avoid,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A polygon area with a safety rating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: i64,
    #[serde(default)]
    pub city_id: Option<i64>,
    pub label: String,
    #[serde(default)]
    pub level: ZoneLevel,
    #[serde(default)]
    pub reason_short: String,
    #[serde(default)]
    pub reason_long: Option<String>,
    /// GeoJSON polygon or WKT text, as stored
    #[serde(default)]
    pub geom: Option<Value>,
    #[serde(default)]
    pub verified_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Zone {
    /// Outer ring of the zone polygon, if it parses
    pub fn ring(&self) -> Option<Vec<Coordinate>> {
        self.geom.as_ref().and_then(parse_polygon_ring)
    }
}

// ============================================================================
// Pins
// ============================================================================

/// Kind of incident a pin marks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinType {
    Scam,
    Harassment,
    Overcharge,
    #[default]
    #[serde(other)]
    Other,
}

/// Moderation status of user content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Approved,
    Pending,
    Rejected,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Where a pin came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinSource {
    Curated,
    User,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A point of interest with a safety note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub id: i64,
    #[serde(default)]
    pub city_id: Option<i64>,
    #[serde(rename = "type", default)]
    pub pin_type: PinType,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub status: ModerationStatus,
    #[serde(default)]
    pub source: PinSource,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Server-computed distance in meters, on nearby results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(flatten)]
    pub position: LocatableRecord,
}

impl Locatable for Pin {
    fn coordinate(&self) -> Option<Coordinate> {
        self.position.coordinate()
    }
}

// ============================================================================
// Tips
// ============================================================================

/// Topic of a tip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipCategory {
    Transportation,
    Shopping,
    Dining,
    Accommodation,
    GeneralSafety,
    Attractions,
    Cultural,
    Communication,
    Money,
    #[default]
    #[serde(other)]
    Other,
}

/// A piece of safety advice, optionally tied to a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tip {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub city_id: Option<i64>,
    #[serde(default)]
    pub category: TipCategory,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub status: ModerationStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Category as reported by search results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip_category: Option<TipCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_slug: Option<String>,
    /// Server-computed distance in meters, on nearby results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(flatten)]
    pub position: LocatableRecord,
}

impl Locatable for Tip {
    fn coordinate(&self) -> Option<Coordinate> {
        self.position.coordinate()
    }
}

// ============================================================================
// Cities
// ============================================================================

/// A city with its zones, pins and tips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityDetail {
    #[serde(flatten)]
    pub city: SupportedCity,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub pins: Vec<Pin>,
    #[serde(default)]
    pub tips: Vec<Tip>,
}

/// `GET /cities`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitiesResponse {
    pub cities: Vec<SupportedCity>,
}

/// `GET /city/{slug}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityDetailResponse {
    pub city: CityDetail,
}

/// `POST`/`DELETE /save`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SaveCityRequest {
    pub city_id: i64,
}

/// Bare acknowledgement
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}

// ============================================================================
// Nearby
// ============================================================================

/// `GET /live/nearby`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyResponse {
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(rename = "nearbyPins", default)]
    pub nearby_pins: Vec<Pin>,
}

/// Search center echoed by `GET /nearby`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearbyCenter {
    pub lat: f64,
    pub lng: f64,
}

/// Result counts reported by `GET /nearby`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearbyCount {
    #[serde(default)]
    pub pins: Option<u64>,
    #[serde(default)]
    pub tips: Option<u64>,
}

/// `GET /nearby`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyUnifiedResponse {
    #[serde(default)]
    pub pins: Vec<Pin>,
    #[serde(default)]
    pub tips: Vec<Tip>,
    #[serde(default)]
    pub center: Option<NearbyCenter>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub count: Option<NearbyCount>,
}

// ============================================================================
// Tips endpoints
// ============================================================================

/// `GET /recent-tips` and `GET /featured-tips`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipsResponse {
    #[serde(default)]
    pub tips: Vec<Tip>,
}

/// `GET /search-tips`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTipsResponse {
    #[serde(default)]
    pub results: Vec<Tip>,
}

/// `POST /submit-tip`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitTipRequest {
    pub city_id: i64,
    pub category: TipCategory,
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurred_at: Option<String>,
}

/// Created submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response to `POST /submit-tip`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTipResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub submission: Option<Submission>,
}

// ============================================================================
// Pins endpoints
// ============================================================================

/// `POST /submit-pin`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitPinRequest {
    #[serde(rename = "type")]
    pub pin_type: PinType,
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
}

/// Response to `POST /submit-pin`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitPinResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Submission>,
}

// ============================================================================
// Notifications
// ============================================================================

/// An in-app notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// `GET /notifications`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsResponse {
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(rename = "unreadCount", default)]
    pub unread_count: u64,
}

/// `GET /waitlist-count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistCountResponse {
    pub count: u64,
}
