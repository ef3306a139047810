//! Seismicity Service - catalogue query and statistics
//!
//! Loads an earthquake catalogue once, applies a location / radius /
//! magnitude / time query, and prints the full analysis report (filtered
//! events, Gutenberg-Richter fit, magnitude and depth histograms, temporal
//! breakdown, energy) as JSON on stdout for a charting front end.
//!
//! Usage:
//!   cargo run --release                              # bundled catalogue, default query
//!   cargo run --release -- --catalogue path/to.csv   # another ISC-GEM CSV file
//!   cargo run --release -- --feed                    # USGS live feed for the query window
//!   cargo run --release -- --config other.toml --lat 35.68 --lon 139.69 --radius 300
//!
//! Query overrides: --lat, --lon, --radius, --min-mag, --start, --end
//!
//! Environment:
//!   RUST_LOG - log level (e.g. `info`, `seismicity_service=debug`)

use log::{error, info, warn};
use seismicity_service::config::{self, AppConfig};
use seismicity_service::ingest::{self, fdsn, RawCatalogue};
use seismicity_service::report::build_report;
use std::env;
use std::error::Error;
use std::fs;
use std::process;

enum Source {
    Catalogue(String),
    Feed,
}

struct Args {
    config_path: String,
    source: Option<Source>,
    overrides: Vec<(String, String)>,
}

fn usage(program: &str) -> ! {
    eprintln!(
        "Usage: {} [--config PATH] [--catalogue PATH | --feed] \
         [--lat DEG] [--lon DEG] [--radius KM] [--min-mag M] [--start DATE] [--end DATE]",
        program
    );
    process::exit(1);
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("seismicity_service");

    let mut parsed = Args {
        config_path: config::DEFAULT_CONFIG_PATH.to_string(),
        source: None,
        overrides: Vec::new(),
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--feed" => {
                parsed.source = Some(Source::Feed);
                i += 1;
            }
            "--config" | "--catalogue" | "--lat" | "--lon" | "--radius" | "--min-mag"
            | "--start" | "--end" => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("Error: {} requires a value", flag);
                    usage(program);
                };
                match flag {
                    "--config" => parsed.config_path = value.clone(),
                    "--catalogue" => parsed.source = Some(Source::Catalogue(value.clone())),
                    _ => parsed.overrides.push((flag.to_string(), value.clone())),
                }
                i += 2;
            }
            _ => {
                eprintln!("Unknown argument: {}", flag);
                usage(program);
            }
        }
    }

    parsed
}

/// Applies command-line query overrides on top of the configured query.
fn apply_overrides(config: &mut AppConfig, overrides: &[(String, String)]) -> Result<(), Box<dyn Error>> {
    for (flag, value) in overrides {
        let number = || {
            value
                .parse::<f64>()
                .map_err(|e| format!("{} expects a number, got '{}': {}", flag, value, e))
        };
        match flag.as_str() {
            "--lat" => config.query.latitude = number()?,
            "--lon" => config.query.longitude = number()?,
            "--radius" => config.query.radius_km = number()?,
            "--min-mag" => config.query.min_magnitude = number()?,
            "--start" => config.query.start_date = value.clone(),
            "--end" => config.query.end_date = value.clone(),
            _ => {}
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut config = config::load_config_from(&args.config_path)?;
    apply_overrides(&mut config, &args.overrides)?;

    let query = config.query.to_parameters()?;
    query.validate()?;

    let text;
    let raw = match args.source {
        Some(Source::Feed) => {
            let client = fdsn::build_client(config.feed.timeout_secs)?;
            let url = fdsn::build_query_url(&config.feed.base_url, &query)?;
            text = fdsn::fetch_feed(&client, &url)?;
            RawCatalogue::GeoJsonFeed(&text)
        }
        Some(Source::Catalogue(path)) => {
            text = fs::read_to_string(&path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
            RawCatalogue::IscGemCsv(&text)
        }
        None => {
            let path = &config.catalogue.path;
            text = fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
            RawCatalogue::IscGemCsv(&text)
        }
    };

    let catalogue = ingest::load_catalogue(raw)?;
    let report = build_report(&catalogue, &query, &config.analysis)?;

    if report.is_empty() {
        warn!("No earthquakes matched; try a larger radius, lower magnitude or wider date range");
    } else {
        info!(
            "{} of {} events matched, b-value {}",
            report.match_count,
            report.catalogue_size,
            report
                .gutenberg_richter
                .b_value
                .map(|b| format!("{:.3}", b))
                .unwrap_or_else(|| "n/a".to_string())
        );
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    env_logger::init();

    let args = parse_args();
    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
