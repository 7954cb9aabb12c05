//! Scheduling-scenario comparison harness
//!
//! Runs the same workload under the scheduling configurations from the
//! calibration experiment and reports per-scenario wall-clock, speedup
//! against the sequential baseline, and dispatch-unit counts. Every
//! scenario must produce the same sum up to float reassociation; the
//! harness checks that instead of trusting it.

use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::config::EvalConfig;
use crate::error::{EvalError, EvalResult};
use crate::executor::evaluate;
use crate::plan::ChunkPolicy;
use crate::transform::Transform;

/// Relative tolerance for cross-scenario sum agreement.
pub const SUM_TOLERANCE: f64 = 1e-6;

/// The scheduling configurations measured by `compare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// One worker, one chunk: no dispatch machinery at all.
    Sequential,
    /// Per-element dispatch units, still one worker: pure overhead.
    PerElementOneWorker,
    /// Per-element dispatch units across the full worker pool.
    PerElementParallel,
    /// Chunked dispatch across the full worker pool.
    Chunked,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::Sequential,
        Scenario::PerElementOneWorker,
        Scenario::PerElementParallel,
        Scenario::Chunked,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Sequential => "sequential",
            Scenario::PerElementOneWorker => "per-element, 1 worker",
            Scenario::PerElementParallel => "per-element, parallel",
            Scenario::Chunked => "chunked, parallel",
        }
    }

    /// Derive this scenario's configuration from the base one. The base
    /// supplies input size, repetition count, worker count, and the chunk
    /// policy used by the chunked scenario.
    pub fn configure(&self, base: &EvalConfig) -> EvalConfig {
        match self {
            Scenario::Sequential => EvalConfig {
                workers: 1,
                chunking: ChunkPolicy::Single,
                ..base.clone()
            },
            Scenario::PerElementOneWorker => EvalConfig {
                workers: 1,
                chunking: ChunkPolicy::PerElement,
                ..base.clone()
            },
            Scenario::PerElementParallel => EvalConfig {
                chunking: ChunkPolicy::PerElement,
                ..base.clone()
            },
            Scenario::Chunked => base.clone(),
        }
    }
}

/// Measurements for one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub scenario: &'static str,
    pub workers: usize,
    pub chunk_size: usize,
    pub units: usize,
    pub sum: f64,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
    /// Sequential elapsed divided by this scenario's elapsed
    pub speedup: f64,
}

/// Run all four scenarios over the same input and check their sums agree.
pub fn run_comparison<T: Transform>(
    base: &EvalConfig,
    transform: &T,
) -> EvalResult<Vec<ScenarioReport>> {
    base.validate()?;
    let input = base.build_input();

    let mut reports = Vec::with_capacity(Scenario::ALL.len());
    let mut baseline: Option<(Duration, f64)> = None;

    for scenario in Scenario::ALL {
        let config = scenario.configure(base);
        debug!(scenario = scenario.label(), "running scenario");
        let outcome = evaluate(&input, transform, &config)?;
        let elapsed = outcome.stats.elapsed;

        let (seq_elapsed, seq_sum) = *baseline.get_or_insert((elapsed, outcome.sum));
        if relative_difference(outcome.sum, seq_sum) > SUM_TOLERANCE {
            return Err(EvalError::ScenarioDivergence {
                scenario: scenario.label().to_string(),
                sum: outcome.sum,
                baseline: seq_sum,
            });
        }

        reports.push(ScenarioReport {
            scenario: scenario.label(),
            workers: config.workers,
            chunk_size: outcome.stats.chunk_size,
            units: outcome.stats.units_created,
            sum: outcome.sum,
            elapsed,
            speedup: seq_elapsed.as_secs_f64() / elapsed.as_secs_f64().max(f64::MIN_POSITIVE),
        });
    }
    Ok(reports)
}

/// Relative difference between two sums, zero-safe.
pub fn relative_difference(a: f64, b: f64) -> f64 {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 {
        0.0
    } else {
        (a - b).abs() / scale
    }
}

/// Render the comparison as an aligned text table.
pub fn render_table(reports: &[ScenarioReport]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<24} {:>7} {:>10} {:>8} {:>14} {:>12} {:>8}\n",
        "scenario", "workers", "chunk", "units", "sum", "elapsed", "speedup"
    ));
    for r in reports {
        out.push_str(&format!(
            "{:<24} {:>7} {:>10} {:>8} {:>14.4} {:>12} {:>7.2}x\n",
            r.scenario,
            r.workers,
            r.chunk_size,
            r.units,
            r.sum,
            format!("{:.3?}", r.elapsed),
            r.speedup
        ));
    }
    out
}
