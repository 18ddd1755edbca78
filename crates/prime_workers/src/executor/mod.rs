//! src/executor/mod.rs
//!
//! Execution strategies for worker units.
//!
//! Both strategies hand every worker a [`WorkerSpec`] built from the same
//! partitioner, so they count exactly the same candidates:
//! - `thread`: shared-memory units, joined at the end
//! - `process`: isolated-memory units created with `fork`, reaped with
//!   wait-for-any
//!
//! Workers print their own report lines. [`run`] times the span from just
//! before the first spawn to just after the last join/wait and returns a
//! [`RunSummary`] for the caller to print.

use anyhow::Result;
use std::time::Instant;

use crate::config::{Mode, RunConfig};
use crate::worker::WorkerResult;

#[cfg(unix)]
pub mod process;
pub mod thread;

#[cfg(unix)]
pub use process::ChildExit;

/// What the units of a finished run reported back to the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Units {
    /// Results returned through each thread's join handle, in worker order.
    Threads(Vec<WorkerResult>),
    /// Exit records in the order the children were reaped.
    #[cfg(unix)]
    Processes(Vec<ChildExit>),
}

/// Outcome of a complete run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub bound: u64,
    pub worker_count: usize,
    pub mode: Mode,
    pub elapsed_ms: u128,
    pub units: Units,
}

impl RunSummary {
    pub fn line(&self) -> String {
        format!(
            "This machine calculated all prime numbers under {} using {} slaves in {} milliseconds.",
            self.bound, self.worker_count, self.elapsed_ms
        )
    }
}

/// Runs every worker described by `config` and waits for all of them.
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    log::debug!(
        "starting {} {} workers below {}",
        config.worker_count,
        config.mode,
        config.bound
    );

    let start = Instant::now();
    let units = match config.mode {
        Mode::Thread => Units::Threads(thread::run(config.worker_count, config.bound)?),
        Mode::Process => spawn_processes(config)?,
    };
    let elapsed_ms = start.elapsed().as_millis();

    Ok(RunSummary {
        bound: config.bound,
        worker_count: config.worker_count,
        mode: config.mode,
        elapsed_ms,
        units,
    })
}

#[cfg(unix)]
fn spawn_processes(config: &RunConfig) -> Result<Units> {
    Ok(Units::Processes(process::run(
        config.worker_count,
        config.bound,
    )?))
}

#[cfg(not(unix))]
fn spawn_processes(_config: &RunConfig) -> Result<Units> {
    Err(crate::error::SpawnError::Process {
        worker_id: 0,
        source: std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "process mode needs fork, which this platform lacks",
        ),
    }
    .into())
}
