//! cable-label - CLI tool to generate DXF cable labels from a CSV schedule.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cable_label::model::specification_parts;
use cable_label::{generate_files, pack, parse_csv_file, LayoutParameters, OutputOptions};

/// Generate DXF cable labels for laser cutting from a CSV cable schedule.
#[derive(Parser, Debug)]
#[command(name = "cable-label")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the CSV cable schedule
    csv_file: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    /// Generate an individual DXF file for each cable
    #[arg(long)]
    individual: bool,

    /// Skip combined sheet generation
    #[arg(long)]
    no_combined: bool,

    /// JSON file overriding label, hole and sheet dimensions
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the packed sheets as JSON instead of writing files
    #[arg(long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let params = match &args.config {
        Some(path) => LayoutParameters::from_json_file(path)
            .with_context(|| format!("Failed to load layout config {}", path.display()))?,
        None => LayoutParameters::default(),
    };

    info!("Processing: {}", args.csv_file.display());

    let records = parse_csv_file(&args.csv_file)
        .with_context(|| format!("Failed to read {}", args.csv_file.display()))?;

    info!("Found {} cable(s)", records.len());

    for (i, record) in records.iter().take(5).enumerate() {
        let parts = specification_parts(&record.specification);
        info!(
            "  {}. {} [{} | {}] {} -> {}",
            i + 1,
            record.id,
            parts.size,
            parts.cable_type,
            record.origin,
            record.destination
        );
    }

    // Debug output
    if args.debug {
        let pages = pack(&records, &params)?;
        let json = serde_json::to_string_pretty(&pages)?;
        println!("{}", json);
        return Ok(());
    }

    let options = OutputOptions {
        output_dir: args.output,
        individual: args.individual,
        combined: !args.no_combined,
    };

    if !options.individual && !options.combined {
        anyhow::bail!("Nothing to generate: --no-combined given without --individual");
    }

    let files = generate_files(&records, &params, &options)?;

    info!("Generated {} file(s) in {}", files.len(), options.output_dir.display());
    for file in &files {
        info!("  {}", file.display());
    }

    Ok(())
}
