//! Evaluation configuration and validation
//!
//! Invalid configurations are rejected here, before any input is built or
//! any chunk is planned.

use crate::error::{EvalError, EvalResult};
use crate::plan::ChunkPolicy;
use serde::{Deserialize, Serialize};

/// Configuration for one map-reduce evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Number of input elements (the sequence is `1..=input_size`)
    #[serde(default = "default_input_size")]
    pub input_size: usize,
    /// Repetition count for the calibration transform
    #[serde(default = "default_reps")]
    pub reps: u32,
    /// Fixed number of parallel workers
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Partitioning strategy for dispatch units
    #[serde(default)]
    pub chunking: ChunkPolicy,
}

fn default_input_size() -> usize {
    10_000
}

fn default_reps() -> u32 {
    100
}

fn default_workers() -> usize {
    num_cpus::get().max(1)
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            input_size: default_input_size(),
            reps: default_reps(),
            workers: default_workers(),
            chunking: ChunkPolicy::default(),
        }
    }
}

impl EvalConfig {
    /// Reject configurations that must never reach the executor.
    pub fn validate(&self) -> EvalResult<()> {
        if self.workers == 0 {
            return Err(EvalError::invalid_config(
                "workers",
                self.workers,
                "must be at least 1",
            ));
        }
        if let ChunkPolicy::Fixed(0) = self.chunking {
            return Err(EvalError::invalid_config(
                "chunk_size",
                0,
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Build the calibration input sequence: values `1..=input_size`.
    ///
    /// The sequence is owned by the caller and never mutated during
    /// evaluation; workers only ever borrow it.
    pub fn build_input(&self) -> Vec<f64> {
        (1..=self.input_size).map(|i| i as f64).collect()
    }
}
