//! CityPulse CLI
//!
//! Finds places of interest around an event venue and prints them as a
//! GeoJSON FeatureCollection.

#![allow(clippy::print_stdout)]

mod location;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use application::{AssemblyRequest, GeoJsonAssembler, LocationInput, PlaceSearchPort};
use clap::{Args, Parser, Subcommand};
use domain::{EventLocation, known_search_types, resolve_categories};
use infrastructure::{AppConfig, GeoapifyPlacesAdapter, TelemetryConfig, init_telemetry};
use tracing::{info, warn};

/// CityPulse CLI
#[derive(Parser)]
#[command(name = "citypulse-cli")]
#[command(author, version, about = "Places of interest around event venues", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "CITYPULSE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate places around a coordinate
    ///
    /// Example: citypulse-cli places --lat 40.7505 --lon -73.9934 --types restaurants,bars
    Places {
        /// Event latitude
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Event longitude
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Event name
        #[arg(long, default_value = domain::DEFAULT_EVENT_NAME)]
        name: String,

        /// Event street address
        #[arg(long, default_value = "")]
        address: String,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Aggregate places around the venue in a JSON file
    ///
    /// The file holds a Ticketmaster event or a `{lat, lon}` object; `-` reads stdin.
    Venue {
        /// Path to the event JSON
        file: PathBuf,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// List places of a single search type, nearest first
    Nearby {
        /// Event latitude
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Event longitude
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Search type tag
        #[arg(short = 't', long = "type", default_value = domain::FALLBACK_SEARCH_TYPE)]
        search_type: String,

        /// Search radius in meters
        #[arg(short, long, default_value_t = application::DEFAULT_RADIUS_METERS)]
        radius: u32,

        /// Maximum number of places
        #[arg(short, long, default_value_t = application::DEFAULT_SINGLE_SEARCH_LIMIT)]
        limit: u32,

        /// Report API failures instead of printing no places
        #[arg(long)]
        strict: bool,
    },

    /// List supported search types and their provider categories
    Categories,

    /// Check that the places API accepts the configured key
    Health,
}

/// Options shared by the aggregating commands; unset values come from config
#[derive(Args, Debug, Default)]
struct SearchArgs {
    /// Search radius in meters
    #[arg(short, long)]
    radius: Option<u32>,

    /// Maximum places per search type
    #[arg(short, long)]
    limit: Option<u32>,

    /// Comma-separated search types (e.g. restaurants,bars)
    #[arg(short, long, value_delimiter = ',')]
    types: Vec<String>,

    /// Overall deadline in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Report API failures per category instead of counting zero places
    #[arg(long)]
    strict: bool,
}

impl SearchArgs {
    /// Merge with configured defaults
    fn to_request(&self, config: &AppConfig) -> AssemblyRequest {
        let mut request = config.search.to_request();
        if let Some(radius) = self.radius {
            request.radius_meters = radius;
        }
        if let Some(limit) = self.limit {
            request.limit_per_category = limit;
        }
        if !self.types.is_empty() {
            request.search_types.clone_from(&self.types);
        }
        request
    }
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => AppConfig::load().context("failed to load configuration")?,
    };
    if let Err(e) = config.validate() {
        bail!("invalid configuration: {e}");
    }
    Ok(config)
}

fn build_adapter(config: &AppConfig, strict: bool) -> anyhow::Result<GeoapifyPlacesAdapter> {
    if !config.geoapify.has_api_key() {
        warn!("No Geoapify API key configured; searches will return no places");
    }
    let adapter = GeoapifyPlacesAdapter::new(&config.geoapify.to_geoapify_config())?;
    Ok(if strict {
        adapter.with_strict_errors()
    } else {
        adapter
    })
}

async fn aggregate(
    config: &AppConfig,
    input: LocationInput,
    search: &SearchArgs,
) -> anyhow::Result<()> {
    let adapter = build_adapter(config, search.strict)?;
    let mut assembler = GeoJsonAssembler::new(Arc::new(adapter));
    if let Some(deadline) = search
        .timeout
        .map(std::time::Duration::from_secs)
        .or_else(|| config.search.total_timeout())
    {
        assembler = assembler.with_total_timeout(deadline);
    }

    let request = search.to_request(config);
    let collection = assembler.assemble(input, &request).await?;
    info!(
        total_places = collection.properties.total_places,
        "Aggregation finished"
    );

    println!("{}", serde_json::to_string_pretty(&collection)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    // Set up logging based on verbosity, falling back to the configured filter
    let telemetry = if cli.verbose > 0 {
        TelemetryConfig {
            log_filter: log_filter_from_verbosity(cli.verbose).to_string(),
            ..config.telemetry.clone()
        }
    } else {
        config.telemetry.clone()
    };
    init_telemetry(&telemetry)?;

    match cli.command {
        Commands::Places {
            lat,
            lon,
            name,
            address,
            search,
        } => {
            let event = EventLocation::new(name, lat, lon)?.with_address(address);
            aggregate(&config, event.into(), &search).await?;
        },

        Commands::Venue { file, search } => {
            let input = location::read_location(&file)?;
            aggregate(&config, input, &search).await?;
        },

        Commands::Nearby {
            lat,
            lon,
            search_type,
            radius,
            limit,
            strict,
        } => {
            let event = EventLocation::new(domain::DEFAULT_EVENT_NAME, lat, lon)?;
            let assembler = GeoJsonAssembler::new(Arc::new(build_adapter(&config, strict)?));
            let places = assembler
                .search_places_near_event(event, &search_type, radius, limit)
                .await?;

            println!("{}", serde_json::to_string_pretty(&places)?);
        },

        Commands::Categories => {
            for search_type in known_search_types() {
                println!("{search_type}: {}", resolve_categories(search_type).join(", "));
            }
        },

        Commands::Health => {
            let adapter = build_adapter(&config, true)?;
            if adapter.is_available().await {
                println!("✅ Geoapify places API reachable");
            } else {
                println!("❌ Geoapify places API unavailable");
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
