//! Pharmacy Counting CLI
//!
//! Reads prescription records and writes per-drug totals, sorted by cost.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- input/itcont.txt output/top_cost_drug.txt
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `info`, `debug` or `warn` to control logging verbosity

use log::info;
use pharmacy_counting::{sort_rows, write_report, Aggregator, PharmacyError, Result};
use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(PharmacyError::MissingArgument);
    }

    let input_path = PathBuf::from(&args[1]);
    let output_path = PathBuf::from(&args[2]);
    let start = Instant::now();

    let file = File::open(&input_path).map_err(|source| PharmacyError::InputUnreadable {
        path: input_path.clone(),
        source,
    })?;

    info!("Reading {}", input_path.display());
    let mut aggregator = Aggregator::new();
    aggregator.process_input(BufReader::new(file))?;

    let rows = sort_rows(aggregator.finalize());
    info!("Sorted {} drugs by cost and name", rows.len());

    let output = File::create(&output_path).map_err(|source| PharmacyError::OutputUnwritable {
        path: output_path.clone(),
        source,
    })?;
    write_report(&rows, BufWriter::new(output))?;

    let summary = aggregator.summary();
    println!(
        "Processed {} records, skipped {} corrupt records.",
        summary.records_aggregated, summary.corrupt_records
    );
    info!(
        "{} unique prescribers across {} drugs, finished in {:.2?}",
        summary.unique_prescribers,
        summary.unique_drugs,
        start.elapsed()
    );

    Ok(())
}
