//! tap-airtable: Singer tap for Airtable bases
//!
//! Usage:
//!   # Describe the base's tables, print a catalog
//!   tap-airtable --config config.json --discover > catalog.json
//!
//!   # Sync the selected streams in a catalog to stdout
//!   tap-airtable --config config.json --catalog catalog.json
//!
//! Logs go to stderr; set RUST_LOG to change verbosity.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{stdout, BufWriter};
use tap_airtable::{discover, sync, AirtableClient, Catalog, SingerWriter, TapConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tap-airtable")]
#[command(about = "Extract Airtable bases as Singer streams", long_about = None)]
struct Args {
    /// Config file (metadata_url, records_url, token, base_id, ...)
    #[arg(long, short = 'c', value_name = "FILE")]
    config: String,

    /// Print a catalog of the base's tables instead of syncing
    #[arg(long, short = 'd')]
    discover: bool,

    /// Catalog of streams to sync
    #[arg(long, alias = "properties", short = 'p', value_name = "FILE")]
    catalog: Option<String>,

    /// Accepted for compatibility; every run is a full sync
    #[arg(long, short = 's', value_name = "FILE")]
    state: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = TapConfig::load(&args.config)
        .with_context(|| format!("Failed to load config: {}", args.config))?;
    let client = AirtableClient::new(&config).context("Failed to build HTTP client")?;

    if let Some(state) = &args.state {
        warn!(state = %state, "State files are ignored; running a full sync");
    }

    if args.discover {
        let catalog = discover(&client, &config).context("Discovery failed")?;
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else if let Some(catalog_path) = &args.catalog {
        let contents = fs::read_to_string(catalog_path)
            .with_context(|| format!("Failed to read catalog: {}", catalog_path))?;
        let catalog: Catalog = serde_json::from_str(&contents).context("Failed to parse catalog")?;

        let mut writer = SingerWriter::new(BufWriter::new(stdout().lock()));
        let summary = sync(&client, &config, catalog, &mut writer).context("Sync failed")?;
        writer.flush()?;

        info!(
            streams = summary.streams.len(),
            relations = summary.relations,
            "Sync complete"
        );
    } else {
        info!("No properties were selected");
    }

    Ok(())
}
