//! Batch distance ranking with optional parallelism.
//!
//! Annotates a list of locatable records with their distance from an origin and
//! orders them nearest first. Records without a usable position are either
//! dropped or kept at the end, depending on [`MissingPosition`].

use crate::{haversine_distance_meters, Coordinate, Locatable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// What to do with records that have no usable position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPosition {
    /// Drop them from the result
    #[default]
    Exclude,
    /// Keep them after every located record, in input order
    Last,
}

/// Ranking options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankOptions {
    /// Policy for records without a position
    pub missing: MissingPosition,
    /// Drop located records farther than this many meters
    pub radius_m: Option<f64>,
    /// Maximum number of results to return (None for all)
    pub max_results: Option<usize>,
}

impl RankOptions {
    /// Options that drop unlocated records.
    pub fn exclude_missing() -> Self {
        Self::default()
    }

    /// Options that keep unlocated records at the end.
    pub fn missing_last() -> Self {
        Self {
            missing: MissingPosition::Last,
            ..Self::default()
        }
    }

    /// Builder-style method to set a radius filter
    #[must_use]
    pub fn with_radius(mut self, radius_m: f64) -> Self {
        self.radius_m = Some(radius_m);
        self
    }

    /// Builder-style method to cap the result count
    #[must_use]
    pub fn with_max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Filters, sorts and truncates already annotated records.
    ///
    /// The sort is stable: equal distances keep their input order.
    pub fn apply<T>(&self, mut ranked: Vec<Ranked<T>>) -> Vec<Ranked<T>> {
        ranked.retain(|r| match r.distance_m {
            Some(d) => self.radius_m.is_none_or(|radius| d <= radius),
            None => self.missing == MissingPosition::Last,
        });

        ranked.sort_by(|a, b| compare_distance(a.distance_m, b.distance_m));

        if let Some(max) = self.max_results {
            ranked.truncate(max);
        }

        ranked
    }
}

/// A record annotated with its position and distance from the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranked<T> {
    /// The record
    pub item: T,
    /// Resolved position, if any
    pub coordinate: Option<Coordinate>,
    /// Distance from the origin in meters, if the record is located
    pub distance_m: Option<f64>,
}

impl<T: Locatable> Ranked<T> {
    /// Annotates a single record.
    #[inline]
    pub fn from_origin(origin: &Coordinate, item: T) -> Self {
        let coordinate = item.coordinate();
        let distance_m = coordinate.map(|c| haversine_distance_meters(origin, &c));
        Self {
            item,
            coordinate,
            distance_m,
        }
    }
}

/// Annotates every record with its distance from `origin`, preserving order.
pub fn annotate_distances<T: Locatable + Send>(origin: Coordinate, items: Vec<T>) -> Vec<Ranked<T>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items
            .into_par_iter()
            .map(|item| Ranked::from_origin(&origin, item))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items
            .into_iter()
            .map(|item| Ranked::from_origin(&origin, item))
            .collect()
    }
}

/// Annotates and ranks records by distance from `origin`.
///
/// # Example
/// ```
/// use safesus_geo::{rank_by_distance, Coordinate, RankOptions};
/// use serde_json::json;
///
/// let items = vec![
///     json!({"id": 1, "location": {"coordinates": [98.9853, 18.7883]}}),
///     json!({"id": 2, "lat": 13.75, "lng": 100.50}),
///     json!({"id": 3}),
/// ];
///
/// let origin = Coordinate::new(13.7563, 100.5018);
/// let ranked = rank_by_distance(origin, items, &RankOptions::missing_last());
/// let ids: Vec<_> = ranked.iter().map(|r| r.item["id"].as_i64().unwrap()).collect();
/// assert_eq!(ids, vec![2, 1, 3]);
/// ```
pub fn rank_by_distance<T: Locatable + Send>(
    origin: Coordinate,
    items: Vec<T>,
    options: &RankOptions,
) -> Vec<Ranked<T>> {
    options.apply(annotate_distances(origin, items))
}

/// Nearest first; unlocated records after every located one.
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
