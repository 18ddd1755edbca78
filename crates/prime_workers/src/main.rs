//! Command-line entry point.
//!
//! Usage:
//!   prime_workers <bound> <worker_count> <thread|process>
//!
//! Exit codes:
//!   0  success
//!   1  wrong number of arguments
//!   2  bound is negative or not an integer
//!   3  worker_count is negative or not an integer
//!   4  mode is neither "thread" nor "process"
//!   5  a worker thread could not be created
//!   6  a worker process could not be forked

use clap::error::ErrorKind;
use clap::Parser;
use std::process;

use prime_workers::error::{exit_code_for, EXIT_USAGE};
use prime_workers::{executor, RunConfig};

/// Count primes below a bound across parallel threads or processes
#[derive(Parser, Debug)]
#[command(name = "prime_workers", version)]
struct Cli {
    /// Exclusive upper bound on the primes counted
    #[arg(allow_negative_numbers = true)]
    bound: String,

    /// Number of worker threads or processes
    #[arg(allow_negative_numbers = true)]
    worker_count: String,

    /// Execution mode: "thread" or "process"
    mode: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            if let Err(print_err) = e.print() {
                log::warn!("failed to print usage error: {}", print_err);
            }
            process::exit(EXIT_USAGE);
        }
    };

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        process::exit(exit_code_for(&e));
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = RunConfig::from_args(&cli.bound, &cli.worker_count, &cli.mode)?;
    let summary = executor::run(&config)?;
    println!("{}", summary.line());
    Ok(())
}
