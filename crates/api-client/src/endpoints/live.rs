//! Live mode: content around the user's position
//!
//! Besides the raw `/live/nearby` and `/nearby` routes this module builds the
//! ranked pin and tip lists the live screen shows. With a matched city the
//! city detail is used as the source; otherwise the radius search is.

use crate::client::SafeSusClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{ModerationStatus, NearbyResponse, NearbyUnifiedResponse, Pin, Tip, Zone};
use safesus_city::SupportedCity;
use safesus_geo::{annotate_distances, rank_by_distance, Coordinate, RankOptions, Ranked};
use serde::Serialize;
use tracing::{debug, instrument};

/// Default `/nearby` search radius in meters
pub const DEFAULT_NEARBY_RADIUS_M: u32 = 1000;

/// Default `/nearby` result limit
pub const DEFAULT_NEARBY_LIMIT: u32 = 200;

/// Radius used by the live pipeline when no city matched
pub const LIVE_RADIUS_M: u32 = 5000;

/// Result limit used by the live pipeline when no city matched
pub const LIVE_LIMIT: u32 = 100;

/// Which content kinds `/nearby` returns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Include {
    /// Pins only
    Pins,
    /// Tips only
    Tips,
    /// Both pins and tips
    #[default]
    PinsAndTips,
}

impl Include {
    /// Query-string value
    pub fn as_str(&self) -> &'static str {
        match self {
            Include::Pins => "pins",
            Include::Tips => "tips",
            Include::PinsAndTips => "pins,tips",
        }
    }
}

/// Options for `GET /nearby`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NearbyOptions {
    /// Search radius in meters
    pub radius_m: u32,
    /// Content kinds to return
    pub include: Include,
    /// Maximum number of results
    pub limit: u32,
}

impl Default for NearbyOptions {
    fn default() -> Self {
        Self {
            radius_m: DEFAULT_NEARBY_RADIUS_M,
            include: Include::default(),
            limit: DEFAULT_NEARBY_LIMIT,
        }
    }
}

impl NearbyOptions {
    /// Builder-style method to set the radius
    #[must_use]
    pub fn with_radius(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }

    /// Builder-style method to set the content kinds
    #[must_use]
    pub fn with_include(mut self, include: Include) -> Self {
        self.include = include;
        self
    }

    /// Builder-style method to set the limit
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

/// Ranked content around a position
#[derive(Debug, Clone, Serialize)]
pub struct NearbyContent {
    /// City the content came from, when one matched
    pub city: Option<SupportedCity>,
    /// Located pins, nearest first
    pub pins: Vec<Ranked<Pin>>,
    /// Tips, nearest first, unlocated tips last
    pub tips: Vec<Ranked<Tip>>,
    /// Zones of the matched city
    pub zones: Vec<Zone>,
}

/// Live API interface
#[derive(Clone)]
pub struct LiveApi {
    client: SafeSusClient,
}

impl LiveApi {
    /// Create a new live API interface
    pub(crate) fn new(client: SafeSusClient) -> Self {
        Self { client }
    }

    /// Zones and pins around a position
    ///
    /// GET /live/nearby?lat&lng[&cityId]
    pub async fn nearby_legacy(
        &self,
        origin: Coordinate,
        city_id: Option<i64>,
    ) -> ApiResult<NearbyResponse> {
        let mut query = position_query(origin)?;
        if let Some(id) = city_id.filter(|id| *id > 0) {
            query.push(("cityId", id.to_string()));
        }
        self.client.get(&["live", "nearby"], &query).await
    }

    /// Pins and tips within a radius
    ///
    /// GET /nearby?lat&lng&radius&include&limit
    pub async fn nearby(
        &self,
        origin: Coordinate,
        options: &NearbyOptions,
    ) -> ApiResult<NearbyUnifiedResponse> {
        let mut query = position_query(origin)?;
        query.push(("radius", options.radius_m.to_string()));
        query.push(("include", options.include.as_str().to_string()));
        query.push(("limit", options.limit.to_string()));
        self.client.get(&["nearby"], &query).await
    }

    /// Ranked pins, tips and zones for the live view.
    ///
    /// With a city, only approved pins and tips of that city are used and its
    /// zones are returned. Without one, `/nearby` is searched within
    /// [`LIVE_RADIUS_M`] and server-provided distances are kept.
    #[instrument(skip(self, city), fields(city = city.map(|c| c.slug.as_str())))]
    pub async fn load_nearby_content(
        &self,
        origin: Coordinate,
        city: Option<&SupportedCity>,
    ) -> ApiResult<NearbyContent> {
        if !origin.is_valid() {
            return Err(ApiError::invalid_input("Invalid coordinates"));
        }

        let content = match city {
            Some(city) => {
                let detail = self.client.cities().get(&city.slug).await?;
                let pins = approved(detail.pins, |p| p.status);
                let tips = approved(detail.tips, |t| t.status);

                NearbyContent {
                    city: Some(detail.city),
                    pins: rank_by_distance(origin, pins, &RankOptions::exclude_missing()),
                    tips: rank_by_distance(origin, tips, &RankOptions::missing_last()),
                    zones: detail.zones,
                }
            }
            None => {
                let options = NearbyOptions::default()
                    .with_radius(LIVE_RADIUS_M)
                    .with_limit(LIVE_LIMIT);
                let response = self.nearby(origin, &options).await?;

                NearbyContent {
                    city: None,
                    pins: rank_with_server_distance(origin, response.pins, |p| p.distance, &RankOptions::exclude_missing()),
                    tips: rank_with_server_distance(origin, response.tips, |t| t.distance, &RankOptions::missing_last()),
                    zones: Vec::new(),
                }
            }
        };

        debug!(
            pins = content.pins.len(),
            tips = content.tips.len(),
            zones = content.zones.len(),
            "Loaded nearby content"
        );
        Ok(content)
    }
}

fn position_query(origin: Coordinate) -> ApiResult<Vec<(&'static str, String)>> {
    if !origin.is_valid() {
        return Err(ApiError::invalid_input("Invalid coordinates"));
    }
    Ok(vec![
        ("lat", origin.latitude.to_string()),
        ("lng", origin.longitude.to_string()),
    ])
}

fn approved<T>(items: Vec<T>, status: impl Fn(&T) -> ModerationStatus) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| status(item) == ModerationStatus::Approved)
        .collect()
}

/// Ranks records, preferring a positive server distance over the computed one.
fn rank_with_server_distance<T: safesus_geo::Locatable + Send>(
    origin: Coordinate,
    items: Vec<T>,
    server_distance: impl Fn(&T) -> Option<f64>,
    options: &RankOptions,
) -> Vec<Ranked<T>> {
    let mut ranked = annotate_distances(origin, items);
    for entry in &mut ranked {
        if let Some(d) = server_distance(&entry.item).filter(|d| d.is_finite() && *d > 0.0) {
            entry.distance_m = Some(d);
        }
    }
    options.apply(ranked)
}
