//! Distance command - offline haversine distance

use crate::output::print_json;
use crate::OutputFormat;
use anyhow::{anyhow, Result};
use safesus_geo::{distance_meters, format_distance, Coordinate};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonDistanceOutput {
    from: Coordinate,
    to: Coordinate,
    meters: f64,
    formatted: String,
}

/// Validated position from command-line degrees, tagged with the geo error code.
pub fn position(lat: f64, lng: f64) -> Result<Coordinate> {
    Coordinate::try_new(lat, lng).map_err(|e| anyhow!("{e} (code {})", e.code() as u32))
}

/// Print the distance between two points
pub fn run(lat1: f64, lng1: f64, lat2: f64, lng2: f64, format: OutputFormat) -> Result<()> {
    let from = position(lat1, lng1)?;
    let to = position(lat2, lng2)?;

    let meters = distance_meters(lat1, lng1, lat2, lng2);
    let formatted = format_distance(meters);

    match format {
        OutputFormat::Json => print_json(&JsonDistanceOutput { from, to, meters, formatted }),
        OutputFormat::Text => {
            println!("{formatted}");
            Ok(())
        }
    }
}
