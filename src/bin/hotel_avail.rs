// Runs one availability request against a rate table and an offer catalog
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use hotel_avail_engine::processor::{SAMPLE_CATALOG_PATH, SAMPLE_RATES_PATH, SAMPLE_REQUEST_PATH};
use hotel_avail_engine::{AvailabilityProcessor, ProcessingOutcome, ProcessorConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Validate an availability request and price matching room offers")]
struct Args {
    /// AvailRQ XML payload
    #[arg(long, default_value = SAMPLE_REQUEST_PATH)]
    request: PathBuf,

    /// Currency rate table (JSON)
    #[arg(long, default_value = SAMPLE_RATES_PATH)]
    rates: PathBuf,

    /// Room offer catalog (JSON)
    #[arg(long, default_value = SAMPLE_CATALOG_PATH)]
    catalog: PathBuf,

    /// Optional processor settings (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ProcessorConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ProcessorConfig::default(),
    };

    let outcome = AvailabilityProcessor::with_config(config)
        .process_files(&args.request, &args.rates, &args.catalog)
        .context("processing availability request")?;

    println!("{}", outcome.render()?);

    if let ProcessingOutcome::Rejected(errors) = &outcome {
        tracing::warn!(errors = errors.len(), "request rejected");
    }
    Ok(())
}
