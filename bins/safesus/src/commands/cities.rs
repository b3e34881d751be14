//! Cities commands - catalog listing and city detail

use crate::output::{format_count, print_json, Status};
use crate::OutputFormat;
use anyhow::Result;
use owo_colors::OwoColorize;
use safesus_api_client::models::{ModerationStatus, ZoneLevel};
use safesus_api_client::SafeSusClient;
use safesus_city::SupportedCity;
use serde::Serialize;

/// List every city in the catalog
pub async fn list(client: &SafeSusClient, format: OutputFormat) -> Result<()> {
    let cities = client.cities().list().await?;

    if format == OutputFormat::Json {
        return print_json(&cities);
    }

    Status::header("Supported Cities");
    println!(
        "  {} {} {} {}",
        format!("{:<5}", "ID").dimmed(),
        format!("{:<20}", "Name").dimmed(),
        format!("{:<20}", "Slug").dimmed(),
        "Country".dimmed()
    );
    for city in &cities {
        println!("{}", city_row(city));
    }
    println!();
    Status::info(&format_count(cities.len(), "city", "cities"));
    Ok(())
}

/// One catalog line; the name is padded before it is coloured so columns align.
fn city_row(city: &SupportedCity) -> String {
    let name = format!("{:<20}", city.name);
    let name = if city.supported {
        name.green().to_string()
    } else {
        name.dimmed().to_string()
    };
    format!("  {:<5} {} {:<20} {}", city.id, name, city.slug, city.country)
}

#[derive(Debug, Serialize)]
struct JsonCitySummary<'a> {
    id: i64,
    name: &'a str,
    slug: &'a str,
    country: &'a str,
    zones: usize,
    approved_pins: usize,
    approved_tips: usize,
}

/// Summarize one city's safety content
pub async fn show(client: &SafeSusClient, slug: &str, format: OutputFormat) -> Result<()> {
    let detail = client.cities().get(slug).await?;

    let approved_pins = detail
        .pins
        .iter()
        .filter(|p| p.status == ModerationStatus::Approved)
        .count();
    let approved_tips = detail
        .tips
        .iter()
        .filter(|t| t.status == ModerationStatus::Approved)
        .count();

    if format == OutputFormat::Json {
        return print_json(&JsonCitySummary {
            id: detail.city.id,
            name: &detail.city.name,
            slug: &detail.city.slug,
            country: &detail.city.country,
            zones: detail.zones.len(),
            approved_pins,
            approved_tips,
        });
    }

    Status::header(&format!("{}, {}", detail.city.name, detail.city.country));

    for zone in &detail.zones {
        let level = match zone.level {
            ZoneLevel::Recommended => "recommended".green().to_string(),
            ZoneLevel::Neutral => "neutral".to_string(),
            ZoneLevel::Caution => "caution".yellow().to_string(),
            ZoneLevel::Avoid => "avoid".red().to_string(),
            ZoneLevel::Unknown => "unrated".dimmed().to_string(),
        };
        println!("  {:<30} {}", zone.label, level);
    }
    if detail.zones.is_empty() {
        Status::info("No zones mapped yet");
    }

    println!();
    Status::success(&format!(
        "{}, {}",
        format_count(approved_pins, "pin", "pins"),
        format_count(approved_tips, "tip", "tips")
    ));
    Ok(())
}
