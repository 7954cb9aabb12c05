//! Pure chunk planning for parallel evaluation
//!
//! This module provides pure functions for partitioning an input sequence
//! into dispatch units, without any I/O. Same inputs always produce the
//! same plan, which is what makes the plan independently testable before
//! any worker thread exists.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Target number of dispatch units for [`ChunkPolicy::Auto`].
///
/// Calibrated on the iterated-sqrt workload, where 100-200 units was the
/// zone that amortized dispatch overhead without losing load balance. It
/// is a measured starting point for this workload size, not a universal
/// constant.
pub const AUTO_TARGET_UNITS: usize = 150;

/// A contiguous half-open range of input indices, dispatched as one
/// indivisible unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub start: usize,
    pub end: usize,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Partitioning strategy: how the input is cut into dispatch units.
///
/// The strategy is explicit configuration rather than something a runtime
/// picks implicitly, so every scheduling scenario can be reproduced and
/// measured on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkPolicy {
    /// The whole input as one chunk.
    Single,
    /// Every element is its own dispatch unit. Maximum load-balance
    /// precision, maximum per-unit overhead.
    PerElement,
    /// Fixed maximum chunk size chosen by the caller.
    Fixed(usize),
    /// Implementation-chosen size aiming for [`AUTO_TARGET_UNITS`]
    /// dispatch units, never fewer than one unit per worker.
    #[default]
    Auto,
}

impl ChunkPolicy {
    /// Resolve the policy to a concrete maximum chunk size for an input of
    /// `len` elements evaluated by `workers` workers.
    ///
    /// The result is always at least 1, so it is safe to pass straight to
    /// [`plan_chunks`]. A `Fixed(0)` policy is a configuration error and is
    /// rejected by validation before planning ever runs.
    pub fn resolve(&self, len: usize, workers: usize) -> usize {
        match *self {
            ChunkPolicy::Single => len.max(1),
            ChunkPolicy::PerElement => 1,
            ChunkPolicy::Fixed(size) => size.max(1),
            ChunkPolicy::Auto => {
                let target = AUTO_TARGET_UNITS.max(workers);
                (len.div_ceil(target)).max(1)
            }
        }
    }
}

/// Pure: partition `[0, len)` into contiguous chunks of at most `size`
/// elements, preserving order within and across chunks.
///
/// Concatenating the returned ranges in order reproduces `[0, len)`
/// exactly; every index belongs to exactly one chunk.
pub fn plan_chunks(len: usize, size: usize) -> Vec<Chunk> {
    debug_assert!(size >= 1);
    let mut chunks = Vec::with_capacity(chunk_count(len, size));
    let mut start = 0;
    while start < len {
        let end = (start + size).min(len);
        chunks.push(Chunk { start, end });
        start = end;
    }
    chunks
}

/// Pure: number of chunks a plan will contain, `ceil(len / size)`.
pub fn chunk_count(len: usize, size: usize) -> usize {
    len.div_ceil(size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The (N, C) grid exercised by the partition properties.
    fn size_grid(len: usize) -> Vec<usize> {
        vec![1, 7, 100, len.max(1), len + 1]
    }

    #[test]
    fn partition_covers_every_index_exactly_once() {
        for len in [1usize, 1_000, 10_000] {
            for size in size_grid(len) {
                let chunks = plan_chunks(len, size);
                let mut seen = vec![0u8; len];
                for chunk in &chunks {
                    for i in chunk.range() {
                        seen[i] += 1;
                    }
                }
                assert!(
                    seen.iter().all(|&count| count == 1),
                    "len={len} size={size}: some index not covered exactly once"
                );
            }
        }
    }

    #[test]
    fn chunks_are_contiguous_and_ordered() {
        for len in [1usize, 1_000, 10_000] {
            for size in size_grid(len) {
                let chunks = plan_chunks(len, size);
                let mut expected_start = 0;
                for chunk in &chunks {
                    assert_eq!(chunk.start, expected_start);
                    assert!(chunk.len() <= size);
                    assert!(!chunk.is_empty());
                    expected_start = chunk.end;
                }
                assert_eq!(expected_start, len);
            }
        }
    }

    #[test]
    fn chunk_count_matches_ceiling_formula() {
        for len in [1usize, 1_000, 10_000] {
            for size in size_grid(len) {
                let chunks = plan_chunks(len, size);
                assert_eq!(chunks.len(), len.div_ceil(size));
                assert_eq!(chunks.len(), chunk_count(len, size));
            }
        }
    }

    #[test]
    fn oversized_chunk_degenerates_to_single_chunk() {
        for size in [10_000, 10_001, usize::MAX] {
            let chunks = plan_chunks(10_000, size);
            assert_eq!(chunks, vec![Chunk { start: 0, end: 10_000 }]);
        }
    }

    #[test]
    fn empty_input_has_no_chunks() {
        assert!(plan_chunks(0, 1).is_empty());
        assert_eq!(chunk_count(0, 100), 0);
    }

    #[test]
    fn policy_resolution() {
        assert_eq!(ChunkPolicy::Single.resolve(10_000, 4), 10_000);
        assert_eq!(ChunkPolicy::PerElement.resolve(10_000, 4), 1);
        assert_eq!(ChunkPolicy::Fixed(64).resolve(10_000, 4), 64);
        // Auto lands in the calibrated unit range.
        let auto = ChunkPolicy::Auto.resolve(10_000, 4);
        let units = chunk_count(10_000, auto);
        assert!(
            (100..=200).contains(&units),
            "auto produced {units} dispatch units"
        );
    }

    #[test]
    fn auto_policy_handles_tiny_inputs() {
        // Fewer elements than the unit target: one element per chunk.
        assert_eq!(ChunkPolicy::Auto.resolve(10, 4), 1);
        assert_eq!(ChunkPolicy::Auto.resolve(0, 4), 1);
    }
}
