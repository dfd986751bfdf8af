use anyhow::Result;
use cellstat_core::config::{AnalysisConfig, DEFAULT_CONFIG_PATH};
use cellstat_core::{init_logging, UpdateRange};
use cellstat_lib::report::{run_apoptosis, run_resource, save_table};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Per-cell-update apoptosis rate of each run, written as CSV
    Apoptosis {
        #[command(flatten)]
        runs: RunArgs,

        /// Output CSV (defaults to the configured name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Mean and standard deviation of resource-contribution metrics across runs
    Resource {
        #[command(flatten)]
        runs: RunArgs,
    },
}

#[derive(clap::Args, Debug)]
struct RunArgs {
    /// First update of the range (inclusive)
    first_update: u64,

    /// Last update of the range (exclusive)
    last_update: u64,

    /// Run files
    #[arg(required = true, num_args = 1..)]
    files: Vec<PathBuf>,
}

impl RunArgs {
    fn range(&self) -> Result<UpdateRange> {
        Ok(UpdateRange::new(self.first_update, self.last_update)?)
    }
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = AnalysisConfig::load(&args.config)?;

    match args.command {
        Command::Apoptosis { runs, output } => {
            let range = runs.range()?;
            println!("num files: {}", runs.files.len());
            let table = run_apoptosis(&runs.files, range, &config.apoptosis)?;
            let output = output.unwrap_or_else(|| PathBuf::from(&config.apoptosis.output));
            save_table(&table, &output)?;
            println!("Output saved to {}", output.display());
        }
        Command::Resource { runs } => {
            let range = runs.range()?;
            println!("num files: {}", runs.files.len());
            for summary in run_resource(&runs.files, range, &config.resource)? {
                println!("{summary}");
            }
        }
    }

    Ok(())
}
