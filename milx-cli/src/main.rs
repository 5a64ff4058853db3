//! Command-line front end for the milx solver.

mod model_file;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use milx_mip::{solve, SolveOptions};

#[derive(Parser)]
#[command(name = "milx")]
#[command(about = "Dense mixed-integer linear programming solver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a model file and solve it
    Run {
        /// Path to the model file
        file: String,

        /// Print solver progress
        #[arg(long)]
        verbose: bool,

        /// Worker cap for the branch-and-bound search (0 = auto)
        #[arg(long, default_value = "0")]
        threads: usize,
    },
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            file,
            verbose,
            threads,
        } => {
            let program =
                model_file::parse_file(&file).with_context(|| format!("failed to parse {file}"))?;
            println!("{program}");

            let options = SolveOptions::default()
                .with_logging(verbose)
                .with_threads(threads);
            let solution = solve(&program, &options).context("solve failed")?;

            println!("Status: {}", solution.status);
            println!("Objective: {:.6}", solution.objective_value);
            println!("Primal: {:?}", solution.primal.as_slice());
            Ok(())
        }
        Commands::Version => {
            println!("milx {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
