//! Detect command - resolve a geocoded place to a supported city

use crate::output::{print_json, Status};
use crate::OutputFormat;
use anyhow::Result;
use owo_colors::OwoColorize;
use safesus_api_client::SafeSusClient;
use safesus_city::{CityDetection, GeocodedPlace};

/// Assemble a geocoded place from command-line fields
pub fn place(
    city: Option<String>,
    district: Option<String>,
    subregion: Option<String>,
    region: Option<String>,
) -> GeocodedPlace {
    GeocodedPlace {
        city,
        subregion,
        region,
        district,
    }
}

/// Match the place against the live catalog and print the outcome
pub async fn run(client: &SafeSusClient, place: &GeocodedPlace, format: OutputFormat) -> Result<()> {
    let catalog = client.cities().catalog().await?;
    let detection = catalog.detect(place);

    if format == OutputFormat::Json {
        return print_json(&detection);
    }

    match &detection {
        CityDetection::Unknown => Status::warning("Location unknown: no place name to match"),
        CityDetection::Unsupported { place_name } => {
            Status::info(&format!("{} is not a supported city yet", place_name.bold()));
        }
        CityDetection::Supported { city, place_name, rule } => {
            Status::success(&format!(
                "{} → {} ({})",
                place_name,
                city.name.green().bold(),
                city.slug.dimmed()
            ));
            println!("  {} {}", "matched by".dimmed(), rule.as_str());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_keeps_fields() {
        let geocoded = place(None, Some("Sukhumvit".into()), None, Some("Bangkok".into()));
        assert_eq!(geocoded.district(), Some("Sukhumvit"));
        assert_eq!(geocoded.place_name(), Some("Bangkok"));
    }
}
