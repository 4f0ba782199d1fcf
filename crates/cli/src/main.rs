mod args;
mod commands;
pub mod defaults;
mod printing;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use args::ConfigArgs;
use commands::{init, run, schedule};

/// purgesim: genetic load through a population bottleneck
///
/// Simulates a diploid population carrying deleterious mutations while its
/// effective size follows a burn-in, bottleneck and recovery trajectory, and
/// reports how load is purged or fixed along the way.
#[derive(Parser, Debug)]
#[command(name = "purgesim")]
#[command(author, version, about = "Simulates genetic load through a population bottleneck", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a simulation configuration file.
    ///
    /// Combines the defaults with any flags given and saves the result as
    /// JSON for `purgesim run --config`.
    Init {
        /// Configuration file to write
        #[arg(short, long, default_value = defaults::CONFIG_FILE)]
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        params: Box<ConfigArgs>,
    },

    /// Run a simulation and write the reports.
    Run {
        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,

        #[command(flatten)]
        params: Box<ConfigArgs>,
    },

    /// Print the demographic schedule without simulating.
    Schedule {
        #[command(flatten)]
        params: Box<ConfigArgs>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match cli.command {
        Commands::Init {
            file,
            force,
            params,
        } => {
            init::init_config(&params, &file, force)?;
        }
        Commands::Run {
            no_progress,
            params,
        } => {
            run::run_simulation(&params, !no_progress)?;
        }
        Commands::Schedule { params } => {
            schedule::print_schedule(&params)?;
        }
    }

    Ok(())
}
