use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use transfer_tables::layout::{DEFAULT_CSV_DIR, DEFAULT_INPUT_ROOT};
use transfer_tables::logging::setup_logging;
use transfer_tables::{convert, Layout, SeasonRange};

/// Convert a season's unified transfer JSON files into
/// players.csv, transfers.csv and clubs.csv.
///
/// Reads unified_transfers/<FROM_YEAR>_<TO_YEAR>/*.json and resolves
/// countries through docs/csv/countries.csv (name,id).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// First year of the season range (only used to build the input path)
    from_year: String,

    /// Last year of the season range
    to_year: String,

    /// Directory holding the per-season input directories
    #[arg(long, default_value = DEFAULT_INPUT_ROOT)]
    input_root: PathBuf,

    /// Directory holding countries.csv and receiving the output tables
    #[arg(long, default_value = DEFAULT_CSV_DIR)]
    csv_dir: PathBuf,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let layout = Layout::new(args.input_root, args.csv_dir);
    let range = SeasonRange::new(args.from_year, args.to_year);

    let summary = convert(&layout, &range)
        .with_context(|| format!("❌ Failed to convert season {}", range.dir_name()))?;

    println!("✅ {summary}");

    Ok(())
}
