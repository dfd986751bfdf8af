use anyhow::Context;
use cellstat_core::config::{AnalysisConfig, DEFAULT_CONFIG_PATH};
use cellstat_core::duration::{fill_missing_bins, mean_series, weighted_mean_duration};
use cellstat_core::init_logging;
use cellstat_tools::channel_duration::{
    default_inputs, load_samples, PLOT_CAPTION, PLOT_X_DESC, PLOT_Y_DESC,
};
use cellstat_tools::chart::render_log_line;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Plots how often level 1 channels of each duration occur across seeds.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Frequency tables; defaults to every
    /// level-1-channel-dur-channel-weighted-frequency_*.csv in the working directory
    inputs: Vec<PathBuf>,

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

    let inputs = if args.inputs.is_empty() {
        default_inputs(Path::new("."))?
    } else {
        args.inputs
    };
    anyhow::ensure!(!inputs.is_empty(), "No channel duration tables found");
    tracing::info!(files = inputs.len(), "Reading channel duration tables");

    let mut samples = load_samples(&inputs)?;
    let added = fill_missing_bins(&mut samples);
    tracing::info!(rows = samples.len(), added, "Filled missing duration bins");

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.plot.duration_output));
    render_log_line(
        &output,
        &mean_series(&samples),
        PLOT_CAPTION,
        PLOT_X_DESC,
        PLOT_Y_DESC,
        (config.plot.width, config.plot.height),
    )?;
    println!("Output saved to {}", output.display());

    let weighted = weighted_mean_duration(&samples)
        .context("Cannot average channel durations")?;
    println!("Level 1 Channel-Weighted Duration");
    println!("{weighted}");
    Ok(())
}
