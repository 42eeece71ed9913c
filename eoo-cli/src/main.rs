//! Extent-of-occurrence calculator.
//!
//! Reads a tab-separated localities file and writes the convex-hull area (km²) of the historical, current
//! maximum and current minimum locality sets.

mod io;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use eoo_core::{CategoryPipeline, CoveragePolicy, GeoEngine, Zones, DEFAULT_LOG_LEVEL};

use crate::io::{Columns, Format};

#[derive(Parser)]
#[command(name = "eoo")]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("EOO_BUILD_SHA"), ")"))]
#[command(about = "Extent of occurrence from point localities", long_about = None)]
struct Cli {
    /// Tab-separated localities file, with a header row
    input: PathBuf,

    /// Output file, or `-` for stdout
    output: PathBuf,

    /// Zones (JSON array) to use instead of UTM 32S–37S
    #[arg(short, long)]
    zones: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Tsv)]
    format: Format,

    /// Evaluate the three categories in parallel
    #[arg(short, long)]
    parallel: bool,

    /// Fail when part of a hull lies outside every zone, instead of warning
    #[arg(long)]
    strict_coverage: bool,

    /// Longitude column (decimal degrees east)
    #[arg(long, default_value = "DDE")]
    lon_column: String,

    /// Latitude column (decimal degrees, negative south)
    #[arg(long, default_value = "DDS")]
    lat_column: String,

    /// Locality status column
    #[arg(long, default_value = "LocStatus")]
    status_column: String,

    /// error, warn, info, debug or trace (overrides RUST_LOG)
    #[arg(short, long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_LEVEL));
    if let Some(level) = cli.log_level.as_deref() {
        logger.filter_level(eoo_core::parse_log_level(Some(level))?);
    }
    logger.init();

    let zones = match &cli.zones {
        Some(path) => io::load_zones(path)?,
        None => Zones::southern_africa(),
    };
    let columns = Columns {
        longitude: cli.lon_column,
        latitude: cli.lat_column,
        status: cli.status_column,
    };
    let records = io::load_records(&cli.input, &columns)?;
    info!("{} records, {} zones", records.len(), zones.len());

    let coverage = if cli.strict_coverage { CoveragePolicy::Strict } else { CoveragePolicy::Warn };
    let pipeline = CategoryPipeline::new(&zones, &GeoEngine).with_coverage(coverage);
    let results = if cli.parallel { pipeline.run_parallel(&records)? } else { pipeline.run(&records)? };

    io::save(&cli.output, &results, cli.format)
}
