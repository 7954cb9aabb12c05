//! Per-element transforms for the map phase
//!
//! A transform is a pure function over one element: no side effects, no
//! dependence on evaluation order, concurrency, or prior calls. That
//! statelessness is a hard precondition for dispatching chunks to workers
//! without synchronization.
//!
//! Transforms return a fully evaluated value. Nothing may be deferred into
//! the reduction phase; the result handed back is the finished number.

use thiserror::Error;

/// Domain error raised by a transform for an input it cannot handle.
///
/// The executor attaches the element index when it surfaces this as an
/// evaluation failure.
#[derive(Debug, Clone, Error)]
#[error("{reason}")]
pub struct DomainError {
    pub value: f64,
    pub reason: String,
}

/// A pure, deterministic per-element function.
///
/// Implementations must be total over their expected input domain and must
/// not observe or mutate anything outside the argument. `Sync` is required
/// so a single transform instance can be shared by reference across the
/// worker pool.
pub trait Transform: Sync {
    fn apply(&self, x: f64) -> Result<f64, DomainError>;
}

/// Calibration workload: apply `sqrt` a fixed number of times in sequence.
///
/// For `reps = 100` and any input `x >= 1`, the result is indistinguishable
/// from `1.0` in f64, so summing over an input of `1..=n` yields `n` to
/// within float tolerance. The repetition count exists purely to give each
/// element a measurable amount of CPU work.
#[derive(Debug, Clone, Copy)]
pub struct IteratedSqrt {
    reps: u32,
}

impl IteratedSqrt {
    pub fn new(reps: u32) -> Self {
        Self { reps }
    }

    pub fn reps(&self) -> u32 {
        self.reps
    }
}

impl Transform for IteratedSqrt {
    fn apply(&self, x: f64) -> Result<f64, DomainError> {
        if x.is_nan() {
            return Err(DomainError {
                value: x,
                reason: "input is NaN".into(),
            });
        }
        if x < 0.0 {
            return Err(DomainError {
                value: x,
                reason: "square root of a negative number".into(),
            });
        }
        let mut y = x;
        for _ in 0..self.reps {
            y = y.sqrt();
        }
        Ok(y)
    }
}

/// Transforms expressible as plain closures, mostly useful in tests.
impl<F> Transform for F
where
    F: Fn(f64) -> Result<f64, DomainError> + Sync,
{
    fn apply(&self, x: f64) -> Result<f64, DomainError> {
        self(x)
    }
}
