//! Chunked parallel map-reduce executor
//!
//! Orchestrates distribution of an input sequence across a fixed pool of
//! workers, applies a [`Transform`] to every element, and reduces all
//! per-element results into one sum.
//!
//! Chunks are the unit of dispatch: once a worker pulls a chunk off the
//! queue it evaluates the transform sequentially over the chunk's elements
//! before accepting another. Partial sums travel back to the orchestrator
//! thread over a channel and are combined there, so the accumulator is
//! never shared mutable state. Summation is associative and commutative,
//! which makes the final value independent of chunk completion order up to
//! floating-point reassociation in the least significant bits.

use crossbeam_channel::unbounded;
use serde::Serialize;
use std::thread;
use std::time::Instant;
use tracing::{debug, trace};

use crate::config::EvalConfig;
use crate::error::{EvalError, EvalResult};
use crate::plan::{plan_chunks, Chunk};
use crate::transform::Transform;

pub mod stats;

pub use stats::DispatchStats;

/// Final sum plus the dispatch accounting for the run
#[derive(Debug, Clone, Serialize)]
pub struct EvalOutcome {
    pub sum: f64,
    pub stats: DispatchStats,
}

/// Evaluate `transform` over every element of `input` and sum the results.
///
/// The input is borrowed read-only for the duration of the call and is
/// never mutated. With one worker and a single chunk the evaluation runs
/// inline with no dispatch machinery at all (the sequential baseline);
/// otherwise a pool of `config.workers` threads pulls chunks from a shared
/// queue until it drains.
///
/// A transform failure on any element fails the whole evaluation. When
/// several chunks fail, the error for the smallest element index is
/// surfaced, so the reported failure does not depend on scheduling.
pub fn evaluate<T: Transform>(
    input: &[f64],
    transform: &T,
    config: &EvalConfig,
) -> EvalResult<EvalOutcome> {
    config.validate()?;

    let chunk_size = config.chunking.resolve(input.len(), config.workers);
    let chunks = plan_chunks(input.len(), chunk_size);
    debug!(
        elements = input.len(),
        workers = config.workers,
        chunk_size,
        units = chunks.len(),
        "starting evaluation"
    );

    let started = Instant::now();
    let (sum, units_consumed) = if config.workers == 1 && chunks.len() <= 1 {
        run_inline(input, transform, &chunks)?
    } else {
        run_pool(input, transform, &chunks, config.workers)?
    };
    let elapsed = started.elapsed();

    let stats = DispatchStats {
        units_created: chunks.len(),
        units_consumed,
        chunk_size,
        elements: input.len(),
        elapsed,
    };
    debug!(sum, ?elapsed, "evaluation complete");
    Ok(EvalOutcome { sum, stats })
}

/// Map one chunk: sequential transform application over its elements,
/// reduced to a partial sum. Within-chunk order is the input order.
fn map_chunk<T: Transform>(input: &[f64], transform: &T, chunk: Chunk) -> EvalResult<f64> {
    let mut partial = 0.0;
    for (offset, &x) in input[chunk.range()].iter().enumerate() {
        let y = transform
            .apply(x)
            .map_err(|err| EvalError::TransformFailed {
                index: chunk.start + offset,
                value: x,
                reason: err.reason,
            })?;
        partial += y;
    }
    trace!(start = chunk.start, end = chunk.end, partial, "chunk mapped");
    Ok(partial)
}

/// Sequential baseline: no threads, no queue, chunks walked in order.
fn run_inline<T: Transform>(
    input: &[f64],
    transform: &T,
    chunks: &[Chunk],
) -> EvalResult<(f64, Vec<usize>)> {
    let mut sum = 0.0;
    for &chunk in chunks {
        sum += map_chunk(input, transform, chunk)?;
    }
    Ok((sum, vec![chunks.len()]))
}

/// Fixed pool of workers pulling chunks from a shared dispatch queue.
fn run_pool<T: Transform>(
    input: &[f64],
    transform: &T,
    chunks: &[Chunk],
    workers: usize,
) -> EvalResult<(f64, Vec<usize>)> {
    // Seed the dispatch queue up front; dropping the sender closes the
    // queue so workers exit once it drains.
    let (chunk_tx, chunk_rx) = unbounded::<Chunk>();
    for &chunk in chunks {
        if chunk_tx.send(chunk).is_err() {
            break;
        }
    }
    drop(chunk_tx);

    let (result_tx, result_rx) = unbounded::<(usize, EvalResult<f64>)>();

    thread::scope(|scope| {
        for worker in 0..workers {
            let chunk_rx = chunk_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                for chunk in chunk_rx.iter() {
                    let result = map_chunk(input, transform, chunk);
                    if result_tx.send((worker, result)).is_err() {
                        break;
                    }
                }
                trace!(worker, "worker drained the dispatch queue");
            });
        }
        // The orchestrator keeps only the receiving side; without this
        // drop the collection loop below would never terminate.
        drop(result_tx);

        let mut units_consumed = vec![0usize; workers];
        let mut sum = 0.0;
        let mut reported = 0usize;
        let mut failure: Option<EvalError> = None;

        for (worker, result) in result_rx.iter() {
            reported += 1;
            units_consumed[worker] += 1;
            match result {
                Ok(partial) => sum += partial,
                Err(err) => {
                    if supersedes(&err, failure.as_ref()) {
                        failure = Some(err);
                    }
                    // Stop handing out queued work; chunks already in
                    // flight still report, later ones are abandoned.
                    while chunk_rx.try_recv().is_ok() {}
                }
            }
        }

        if let Some(err) = failure {
            return Err(err);
        }
        if reported != chunks.len() {
            return Err(EvalError::WorkerLost {
                missing: chunks.len() - reported,
            });
        }
        Ok((sum, units_consumed))
    })
}

/// Prefer the failure with the smallest element index so the surfaced
/// error is independent of chunk completion order.
fn supersedes(candidate: &EvalError, current: Option<&EvalError>) -> bool {
    match (candidate, current) {
        (_, None) => true,
        (
            EvalError::TransformFailed { index: new, .. },
            Some(EvalError::TransformFailed { index: old, .. }),
        ) => new < old,
        _ => false,
    }
}
