//! # parsum
//!
//! Deterministic parallel map-then-reduce over numeric sequences, with
//! explicit, configurable work-chunking. A pure per-element transform is
//! applied across an ordered input by a fixed pool of workers pulling
//! contiguous chunks from a dispatch queue; per-chunk partial sums are
//! combined into one total, identical across schedules up to
//! floating-point reassociation.
//!
//! ## Modules
//!
//! - `config` - Evaluation configuration and validation
//! - `error` - Structured error taxonomy for evaluation
//! - `executor` - Worker pool, chunk dispatch, and reduction
//! - `plan` - Pure chunk planning and partitioning policies
//! - `report` - Scheduling-scenario comparison harness
//! - `transform` - Per-element transforms for the map phase

pub mod config;
pub mod error;
pub mod executor;
pub mod plan;
pub mod report;
pub mod transform;

pub use config::EvalConfig;
pub use error::{EvalError, EvalResult};
pub use executor::{evaluate, DispatchStats, EvalOutcome};
pub use plan::{chunk_count, plan_chunks, Chunk, ChunkPolicy};
pub use report::{render_table, run_comparison, Scenario, ScenarioReport};
pub use transform::{DomainError, IteratedSqrt, Transform};
