//! Nearby command - ranked pins and tips around a position

use crate::output::{format_count, print_json, Status};
use crate::OutputFormat;
use super::distance::position;
use anyhow::Result;
use owo_colors::OwoColorize;
use safesus_api_client::SafeSusClient;
use safesus_city::{GeocodedPlace, SupportedCity};
use safesus_geo::format_distance_away;
use tracing::debug;

/// Load and print content around `lat`/`lng`
///
/// When the place names a supported city, that city's content is used;
/// otherwise a radius search around the position is.
pub async fn run(
    client: &SafeSusClient,
    lat: f64,
    lng: f64,
    place: &GeocodedPlace,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    let origin = position(lat, lng)?;

    let city = resolve_city(client, place).await?;
    debug!(city = city.as_ref().map(|c| c.slug.as_str()), "Resolved city for nearby search");

    let mut content = client.live().load_nearby_content(origin, city.as_ref()).await?;
    content.pins.truncate(limit);
    content.tips.truncate(limit);

    if format == OutputFormat::Json {
        return print_json(&content);
    }

    match &content.city {
        Some(city) => Status::header(&format!("Around you in {}", city.name)),
        None => Status::header("Around you"),
    }

    println!("  {}", "Pins".bold());
    for ranked in &content.pins {
        println!("    {:<40} {}", ranked.item.title, distance_label(ranked.distance_m));
    }
    if content.pins.is_empty() {
        println!("    {}", "none".dimmed());
    }

    println!("  {}", "Tips".bold());
    for ranked in &content.tips {
        println!("    {:<40} {}", ranked.item.title, distance_label(ranked.distance_m));
    }
    if content.tips.is_empty() {
        println!("    {}", "none".dimmed());
    }

    println!();
    Status::info(&format!(
        "{}, {}, {}",
        format_count(content.pins.len(), "pin", "pins"),
        format_count(content.tips.len(), "tip", "tips"),
        format_count(content.zones.len(), "zone", "zones")
    ));
    Ok(())
}

/// Catalog lookup, skipped when the place carries no usable name.
async fn resolve_city(client: &SafeSusClient, place: &GeocodedPlace) -> Result<Option<SupportedCity>> {
    if place.place_name().is_none() && place.district().is_none() {
        return Ok(None);
    }
    let catalog = client.cities().catalog().await?;
    Ok(catalog.detect(place).city().cloned())
}

fn distance_label(distance_m: Option<f64>) -> String {
    match distance_m {
        Some(meters) => format_distance_away(meters).dimmed().to_string(),
        None => "general".dimmed().to_string(),
    }
}
