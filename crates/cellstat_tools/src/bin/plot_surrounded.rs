use anyhow::Context;
use cellstat_core::config::{AnalysisConfig, DEFAULT_CONFIG_PATH};
use cellstat_core::init_logging;
use cellstat_io::Table;
use cellstat_tools::chart::render_grouped_bars;
use cellstat_tools::surrounded::{group_rates, RATE_COLUMN, SURROUNDED_COLUMN};
use clap::Parser;
use std::path::PathBuf;

/// Plots reproduction rate by treatment, split by channel surround status.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Table with Treatment, Reproduction Rate and Channel 1 Surrounded columns
    input: PathBuf,

    /// Output SVG (defaults to the configured name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    let config = AnalysisConfig::load(&args.config)?;

    let table = Table::read(&args.input)?;
    let bars = group_rates(&table, &config.plot)
        .with_context(|| format!("grouping {}", args.input.display()))?;

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.plot.surrounded_output));
    render_grouped_bars(
        &output,
        &bars,
        SURROUNDED_COLUMN,
        RATE_COLUMN,
        (config.plot.width, config.plot.height),
    )?;
    println!("Output saved to {}", output.display());
    Ok(())
}
