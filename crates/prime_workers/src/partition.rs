//! src/partition.rs
//!
//! Round-robin partitioning of odd candidates across workers.
//!
//! Worker `id` out of `N` owns the candidates
//! `3 + 2*id, 3 + 2*id + 2N, 3 + 2*id + 4N, ...` strictly below `bound`.
//!
//! ```text
//! N = 3, bound = 30
//!
//!   worker 0:  3        9        15       21       27
//!   worker 1:     5        11       17       23       29
//!   worker 2:        7        13       19       25
//! ```
//!
//! The partitions are pairwise disjoint and together cover every odd number in
//! `[3, bound)`. Even numbers are never candidates, and neither is 2, so a
//! total summed over all workers is one less than the real prime count for any
//! `bound > 2`.

use anyhow::{ensure, Result};
use std::iter::FusedIterator;

/// The slice of the candidate space owned by one worker.
///
/// # Arguments:
/// - `worker_id`: Index of the owning worker, in `0..worker_count`
/// - `worker_count`: Total number of workers sharing the candidate space
/// - `bound`: Exclusive upper limit on candidates
///
/// # Examples
/// ```
/// use prime_workers::Partition;
///
/// let partition = Partition::new(0, 2, 20).unwrap();
/// assert_eq!(partition.iter().collect::<Vec<_>>(), vec![3, 7, 11, 15, 19]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    worker_id: usize,
    worker_count: usize,
    bound: u64,
    // `None` when `3 + 2*worker_id` does not fit in a u64.
    first: Option<u64>,
    stride: u64,
}

impl Partition {
    pub fn new(worker_id: usize, worker_count: usize, bound: u64) -> Result<Self> {
        ensure!(
            worker_count > 0,
            "Cannot partition candidates across 0 workers"
        );
        ensure!(
            worker_id < worker_count,
            "Worker id {} is out of range for {} workers",
            worker_id,
            worker_count
        );

        let first = (worker_id as u64)
            .checked_mul(2)
            .and_then(|offset| offset.checked_add(3));
        let stride = (worker_count as u64).saturating_mul(2);

        Ok(Self {
            worker_id,
            worker_count,
            bound,
            first,
            stride,
        })
    }

    pub fn worker_id(&self) -> usize {
        self.worker_id
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Number of candidates in this partition, computed without iterating.
    pub fn len(&self) -> u64 {
        match self.first {
            Some(first) if first < self.bound => (self.bound - 1 - first) / self.stride + 1,
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Candidates in strictly increasing order.
    pub fn iter(&self) -> PartitionIter {
        PartitionIter {
            next: self.first.filter(|&first| first < self.bound),
            stride: self.stride,
            bound: self.bound,
        }
    }
}

impl IntoIterator for &Partition {
    type Item = u64;
    type IntoIter = PartitionIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the candidates of a [`Partition`].
#[derive(Debug, Clone)]
pub struct PartitionIter {
    next: Option<u64>,
    stride: u64,
    bound: u64,
}

impl Iterator for PartitionIter {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let current = self.next?;
        // Stops on overflow as well as on reaching the bound.
        self.next = current
            .checked_add(self.stride)
            .filter(|&candidate| candidate < self.bound);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.next {
            Some(current) => {
                let remaining = (self.bound - 1 - current) / self.stride + 1;
                let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
                (remaining, Some(remaining))
            }
            None => (0, Some(0)),
        }
    }
}

impl FusedIterator for PartitionIter {}

/// ============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn candidates(worker_id: usize, worker_count: usize, bound: u64) -> Vec<u64> {
        Partition::new(worker_id, worker_count, bound)
            .unwrap()
            .iter()
            .collect()
    }

    #[test]
    fn validates_parameters() {
        assert!(Partition::new(0, 1, 10).is_ok());
        assert!(Partition::new(0, 0, 10).is_err());
        assert!(Partition::new(3, 3, 10).is_err());
    }

    #[test]
    fn single_worker_takes_every_odd_candidate() {
        assert_eq!(candidates(0, 1, 10), vec![3, 5, 7, 9]);
    }

    #[test]
    fn two_workers_interleave() {
        assert_eq!(candidates(0, 2, 20), vec![3, 7, 11, 15, 19]);
        assert_eq!(candidates(1, 2, 20), vec![5, 9, 13, 17]);
    }

    #[test]
    fn bound_is_exclusive() {
        assert_eq!(candidates(0, 1, 9), vec![3, 5, 7]);
        assert_eq!(candidates(0, 1, 4), vec![3]);
    }

    #[test]
    fn small_bounds_are_empty_for_every_worker() {
        for bound in [0, 1, 2, 3] {
            for worker_count in 1..=4 {
                for worker_id in 0..worker_count {
                    let partition = Partition::new(worker_id, worker_count, bound).unwrap();
                    assert!(partition.is_empty());
                    assert_eq!(partition.iter().count(), 0);
                }
            }
        }
    }

    #[test]
    fn worker_past_the_bound_is_empty() {
        // Worker 4 starts at 11.
        assert!(Partition::new(4, 8, 11).unwrap().is_empty());
        assert_eq!(candidates(3, 8, 11), vec![9]);
    }

    #[test]
    fn partitions_are_disjoint_and_cover_odd_candidates() {
        for bound in [2u64, 3, 4, 10, 20, 97, 256, 1001] {
            for worker_count in 1..=9 {
                let mut seen = HashSet::new();
                let mut total = 0;
                for worker_id in 0..worker_count {
                    for candidate in candidates(worker_id, worker_count, bound) {
                        assert!(
                            seen.insert(candidate),
                            "{} assigned twice (bound={}, workers={})",
                            candidate,
                            bound,
                            worker_count
                        );
                        total += 1;
                    }
                }
                let expected: HashSet<u64> = (3..bound).filter(|n| n % 2 == 1).collect();
                assert_eq!(seen, expected, "bound={}, workers={}", bound, worker_count);
                assert_eq!(total, expected.len());
            }
        }
    }

    #[test]
    fn len_matches_iteration() {
        for bound in [0u64, 3, 4, 5, 50, 333] {
            for worker_count in 1..=7 {
                for worker_id in 0..worker_count {
                    let partition = Partition::new(worker_id, worker_count, bound).unwrap();
                    assert_eq!(partition.len(), partition.iter().count() as u64);
                    assert_eq!(partition.iter().size_hint().0 as u64, partition.len());
                }
            }
        }
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn stops_before_overflow() {
        let stride_half = 1usize << 62;
        let partition = Partition::new(0, stride_half, u64::MAX).unwrap();
        assert_eq!(
            partition.iter().collect::<Vec<_>>(),
            vec![3, 3 + (1u64 << 63)]
        );
        assert_eq!(partition.len(), 2);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn huge_worker_count_yields_one_candidate_per_worker() {
        let partition = Partition::new(1, usize::MAX, u64::MAX).unwrap();
        assert_eq!(partition.iter().collect::<Vec<_>>(), vec![5]);
        assert_eq!(partition.len(), 1);
    }
}
