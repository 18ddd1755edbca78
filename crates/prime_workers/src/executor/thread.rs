//! src/executor/thread.rs
//!
//! Shared-memory strategy: one OS thread per worker, all joined before
//! returning.
//!
//! Workers share nothing mutable. Each thread owns its `WorkerSpec` and its
//! counters, and the only shared value is the output sink factory, which is
//! read-only. There are no locks apart from the one the sink takes per line.
//!
//! # Spawn failure
//! If a thread cannot be created, the threads that already started are joined
//! before the `SpawnError` is returned, so no worker outlives the call.

use anyhow::{anyhow, Context, Result};
use std::io::{self, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::SpawnError;
use crate::worker::{UnitKind, WorkerResult, WorkerSpec};

/// Body handed to a worker thread.
pub type WorkerBody = Box<dyn FnOnce() -> Result<WorkerResult> + Send + 'static>;

/// Handle to a running worker thread.
pub type WorkerHandle = JoinHandle<Result<WorkerResult>>;

/// Runs `worker_count` threads that report to stdout.
pub fn run(worker_count: usize, bound: u64) -> Result<Vec<WorkerResult>> {
    run_with_sink(worker_count, bound, io::stdout)
}

/// Runs `worker_count` threads, each writing its report line to a writer
/// obtained from `sink`.
///
/// Returns the results in worker order once every thread has been joined.
pub fn run_with_sink<F, W>(worker_count: usize, bound: u64, sink: F) -> Result<Vec<WorkerResult>>
where
    F: Fn() -> W + Send + Sync + 'static,
    W: Write,
{
    run_with_spawner(worker_count, bound, sink, spawn_named)
}

/// Spawns `body` on an OS thread named `prime-worker-<id>`.
pub fn spawn_named(worker_id: usize, body: WorkerBody) -> io::Result<WorkerHandle> {
    thread::Builder::new()
        .name(format!("prime-worker-{}", worker_id))
        .spawn(body)
}

/// Like [`run_with_sink`], but every thread is created through `spawn`.
///
/// The first spawn error stops the loop. Workers that already started are
/// joined, so their report lines are written, and a `SpawnError::Thread` for
/// the failing worker is returned.
pub fn run_with_spawner<F, W, S>(
    worker_count: usize,
    bound: u64,
    sink: F,
    mut spawn: S,
) -> Result<Vec<WorkerResult>>
where
    F: Fn() -> W + Send + Sync + 'static,
    W: Write,
    S: FnMut(usize, WorkerBody) -> io::Result<WorkerHandle>,
{
    let sink = Arc::new(sink);
    // Grows as threads start; `worker_count` can be far larger than the OS
    // will ever allow, and that must surface as a spawn error.
    let mut handles = Vec::new();

    for worker_id in 0..worker_count {
        let spec = WorkerSpec::new(worker_id, worker_count, bound);
        let sink = sink.clone();

        let body: WorkerBody = Box::new(move || {
            // Compute before touching the sink so workers never serialize on it.
            let result = spec.run()?;
            let mut out = (*sink)();
            result
                .report(UnitKind::Thread, &mut out)
                .with_context(|| format!("Worker {} failed to write its report", worker_id))?;
            Ok(result)
        });

        match spawn(worker_id, body) {
            Ok(handle) => {
                log::debug!("spawned thread for worker {}", worker_id);
                handles.push(handle);
            }
            Err(source) => {
                log::error!(
                    "can not create thread for worker {}, joining {} started workers",
                    worker_id,
                    handles.len()
                );
                // Results of the already-started workers are discarded.
                let _ = join_all(handles);
                return Err(SpawnError::Thread { worker_id, source }.into());
            }
        }
    }

    join_all(handles)
}

/// Joins every handle, even after a failure, then reports the first error.
fn join_all(handles: Vec<WorkerHandle>) -> Result<Vec<WorkerResult>> {
    let mut results = Vec::with_capacity(handles.len());
    let mut first_error = None;

    for (worker_id, handle) in handles.into_iter().enumerate() {
        let outcome = handle
            .join()
            .map_err(|_| anyhow!("Worker {} panicked", worker_id))
            .and_then(|result| result);

        match outcome {
            Ok(result) => {
                log::debug!("joined worker {}", worker_id);
                results.push(result);
            }
            Err(e) => {
                log::error!("{:#}", e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(results),
    }
}
