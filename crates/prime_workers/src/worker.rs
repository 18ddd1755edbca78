//! src/worker.rs
//!
//! The routine every worker unit runs, regardless of whether it is a thread or
//! a forked process: walk its partition, count primes, time itself, print one
//! line.

use anyhow::{Context, Result};
use std::fmt;
use std::io::Write;
use std::time::Instant;

use crate::partition::Partition;
use crate::prime::is_prime;

/// Label used in the per-unit report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Thread,
    Process,
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitKind::Thread => f.write_str("Thread"),
            UnitKind::Process => f.write_str("Process"),
        }
    }
}

/// Immutable description of one worker's job.
///
/// Created once per worker before launch and moved into the unit that runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSpec {
    pub worker_id: usize,
    pub worker_count: usize,
    pub bound: u64,
}

impl WorkerSpec {
    pub fn new(worker_id: usize, worker_count: usize, bound: u64) -> Self {
        Self {
            worker_id,
            worker_count,
            bound,
        }
    }

    pub fn partition(&self) -> Result<Partition> {
        Partition::new(self.worker_id, self.worker_count, self.bound)
    }

    /// Counts the primes in this worker's partition.
    ///
    /// Timing covers partition setup and the whole primality scan.
    pub fn run(&self) -> Result<WorkerResult> {
        let start = Instant::now();
        let partition = self
            .partition()
            .with_context(|| format!("Worker {} has an invalid partition", self.worker_id))?;

        log::debug!(
            "worker {} scanning {} candidates below {}",
            self.worker_id,
            partition.len(),
            self.bound
        );

        let prime_count = partition.iter().filter(|&n| is_prime(n)).count() as u64;

        Ok(WorkerResult {
            worker_id: self.worker_id,
            prime_count,
            elapsed_ms: start.elapsed().as_millis(),
        })
    }

    /// Runs the worker and writes its report line to `out`.
    pub fn run_and_report<W: Write>(&self, kind: UnitKind, out: &mut W) -> Result<WorkerResult> {
        let result = self.run()?;
        result
            .report(kind, out)
            .with_context(|| format!("Worker {} failed to write its report", self.worker_id))?;
        Ok(result)
    }
}

/// What a worker produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerResult {
    pub worker_id: usize,
    pub prime_count: u64,
    pub elapsed_ms: u128,
}

impl WorkerResult {
    pub fn line(&self, kind: UnitKind) -> String {
        format!(
            "{} {} computed {} prime numbers in {} milliseconds.",
            kind, self.worker_id, self.prime_count, self.elapsed_ms
        )
    }

    /// Writes the report line with a single `write_all`, so lines from
    /// concurrent workers never interleave mid-line.
    pub fn report<W: Write>(&self, kind: UnitKind, out: &mut W) -> std::io::Result<()> {
        let mut line = self.line(kind);
        line.push('\n');
        out.write_all(line.as_bytes())?;
        out.flush()
    }
}
