//! News vs. non-news event study
//!
//! Reads `matching_dates.csv` and `non_matching_dates.csv`, compares returns
//! and rolling volatility between the two groups, and writes the summary,
//! processed tables and histograms.
//!
//! Usage:
//! ```
//! cargo run --release
//! cargo run --release -- --data-dir data --output-dir results -v
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use news_event_study::utils::level_for_verbosity;
use news_event_study::{setup_logging, Config, EventStudy};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Returns and volatility on news vs. non-news days")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the input CSV files
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Directory for the CSV and PNG outputs
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Rolling volatility window, in rows
    #[arg(short, long)]
    window: Option<usize>,

    /// Histogram bin count
    #[arg(short, long)]
    bins: Option<usize>,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(dir) = args.data_dir {
        config.data.dir = dir;
    }
    if let Some(dir) = args.output_dir {
        config.output.dir = dir;
    }
    if let Some(window) = args.window {
        config.analysis.window = window;
    }
    if let Some(bins) = args.bins {
        config.analysis.bins = bins;
    }

    setup_logging(level_for_verbosity(args.verbose, &config.logging.level));

    if let Some(path) = args.write_config {
        config.save(&path)?;
        info!("Configuration written to {}", path.display());
        return Ok(());
    }

    println!("{}", "=".repeat(60).blue());
    println!("{}", "News vs. Non-News Event Study".bold().blue());
    println!("{}", "=".repeat(60).blue());

    let alpha = config.analysis.alpha;
    let outcome = EventStudy::new(config)
        .run()
        .context("Event study failed")?;

    println!();
    println!("{}", outcome.tests);

    for (name, test) in [
        ("Returns", &outcome.tests.returns),
        ("Volatility", &outcome.tests.volatility),
    ] {
        let verdict = if test.is_undefined() {
            "not enough data".yellow()
        } else if test.is_significant(alpha) {
            format!("significant at {}", alpha).green()
        } else {
            format!("not significant at {}", alpha).normal()
        };
        println!("  {:<11} {}", format!("{}:", name), verdict);
    }

    println!("\n{}", "Summary".bold());
    println!("{}", "-".repeat(40));
    print!("{}", outcome.summary);

    println!("\n{}", "Outputs".bold());
    println!("{}", "-".repeat(40));
    for path in &outcome.written {
        println!("  {}", path.display());
    }

    println!("\n{}", "Done!".green().bold());
    Ok(())
}
