//! Dispatch-unit accounting
//!
//! Coarse counters for how many units of work were created, and how many
//! each worker actually consumed. The created/consumed split is what shows
//! whether a configuration is overhead-dominated (thousands of tiny units)
//! or poorly balanced (one worker consuming almost everything).

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Counters and timing for one evaluation run
#[derive(Debug, Clone, Serialize)]
pub struct DispatchStats {
    /// Dispatch units produced by the chunk plan
    pub units_created: usize,
    /// Units consumed by each worker, indexed by worker id
    pub units_consumed: Vec<usize>,
    /// Resolved maximum chunk size
    pub chunk_size: usize,
    /// Input elements processed
    pub elements: usize,
    /// Wall-clock time for the whole evaluation
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
}

impl DispatchStats {
    pub fn workers(&self) -> usize {
        self.units_consumed.len()
    }

    pub fn total_consumed(&self) -> usize {
        self.units_consumed.iter().sum()
    }
}

impl fmt::Display for DispatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "dispatch units: {} created, {} consumed (chunk size {})",
            self.units_created,
            self.total_consumed(),
            self.chunk_size
        )?;
        writeln!(
            f,
            "workers: {} consuming {:?}",
            self.workers(),
            self.units_consumed
        )?;
        write!(
            f,
            "elements: {}, elapsed: {:.3?}",
            self.elements, self.elapsed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_sum_across_workers() {
        let stats = DispatchStats {
            units_created: 10,
            units_consumed: vec![3, 4, 3],
            chunk_size: 100,
            elements: 1_000,
            elapsed: Duration::from_millis(5),
        };
        assert_eq!(stats.workers(), 3);
        assert_eq!(stats.total_consumed(), 10);
    }

    #[test]
    fn display_reports_created_and_consumed() {
        let stats = DispatchStats {
            units_created: 4,
            units_consumed: vec![4],
            chunk_size: 250,
            elements: 1_000,
            elapsed: Duration::from_millis(1),
        };
        let text = stats.to_string();
        assert!(text.contains("4 created"));
        assert!(text.contains("4 consumed"));
        assert!(text.contains("chunk size 250"));
    }
}
