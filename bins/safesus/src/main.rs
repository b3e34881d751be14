//! SafeSus CLI
//!
//! Browse supported cities, resolve places to cities and list ranked safety
//! content around a position from the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use safesus_api_client::{ClientConfig, SafeSusClient};
use safesus_telemetry::TelemetryConfig;
use std::process::ExitCode;

mod commands;
mod output;

use commands::{cities, detect, distance, nearby, tips};

/// Travel safety data from SafeSus
#[derive(Parser)]
#[command(name = "safesus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// API base URL (overrides SAFESUS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print request and cache counters to stderr when done
    #[arg(long, global = true)]
    stats: bool,

    #[command(subcommand)]
    command: Commands,
}

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported cities
    Cities,

    /// Show zones, pins and tips for a city
    City {
        /// City slug, e.g. "chiang-mai"
        slug: String,
    },

    /// Resolve a geocoded place to a supported city
    Detect {
        /// Locality name
        #[arg(short, long)]
        place: Option<String>,

        /// District or neighbourhood
        #[arg(short, long)]
        district: Option<String>,

        /// Sub-region, e.g. province
        #[arg(long)]
        subregion: Option<String>,

        /// Region or state
        #[arg(long)]
        region: Option<String>,
    },

    /// Pins and tips around a position, nearest first
    Nearby {
        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,

        /// Locality name used to pick a city
        #[arg(short, long)]
        place: Option<String>,

        /// District used to pick a city
        #[arg(short, long)]
        district: Option<String>,

        /// Maximum pins and tips to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Browse and search tips
    Tips {
        #[command(subcommand)]
        action: TipsAction,
    },

    /// Number of people on the waitlist
    Waitlist,

    /// Great-circle distance between two points (offline)
    Distance {
        /// Latitude of the first point
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        /// Longitude of the first point
        #[arg(allow_negative_numbers = true)]
        lng1: f64,
        /// Latitude of the second point
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        /// Longitude of the second point
        #[arg(allow_negative_numbers = true)]
        lng2: f64,
    },
}

#[derive(Subcommand)]
pub enum TipsAction {
    /// Most recent tips
    Recent {
        #[arg(short, long, default_value = "5")]
        limit: u32,
    },

    /// Featured tips
    Featured {
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },

    /// Full-text search (at least 2 characters)
    Search {
        query: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = if cli.verbose {
        TelemetryConfig::verbose()
    } else {
        TelemetryConfig::default()
    };
    if let Err(e) = safesus_telemetry::init_with_config(telemetry.with_json(cli.format == OutputFormat::Json)) {
        eprintln!("{} {}", "Warning:".yellow().bold(), e);
    }

    let Cli { format, api_url, stats, command, .. } = cli;

    let result = run(command, format, api_url).await;

    if stats {
        output::print_metrics();
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, format: OutputFormat, api_url: Option<String>) -> Result<()> {
    match command {
        Commands::Distance { lat1, lng1, lat2, lng2 } => distance::run(lat1, lng1, lat2, lng2, format),

        Commands::Cities => cities::list(&connect(api_url)?, format).await,

        Commands::City { slug } => cities::show(&connect(api_url)?, &slug, format).await,

        Commands::Detect { place, district, subregion, region } => {
            let geocoded = detect::place(place, district, subregion, region);
            detect::run(&connect(api_url)?, &geocoded, format).await
        }

        Commands::Nearby { lat, lng, place, district, limit } => {
            let geocoded = detect::place(place, district, None, None);
            nearby::run(&connect(api_url)?, lat, lng, &geocoded, limit, format).await
        }

        Commands::Tips { action } => tips::run(&connect(api_url)?, action, format).await,

        Commands::Waitlist => tips::waitlist(&connect(api_url)?, format).await,
    }
}

/// Builds a client from the environment, with an optional base URL override.
fn connect(api_url: Option<String>) -> Result<SafeSusClient> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = api_url {
        config = config.with_base_url(url);
    }
    config.validate()?;
    Ok(SafeSusClient::with_config(config)?)
}
