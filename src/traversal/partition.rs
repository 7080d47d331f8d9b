//! Level partitioner: split a frontier into contiguous, near-equal chunks, one per worker.

use std::ops::Range;

/// Split `0..n` into `worker_count` contiguous ranges (clamped to at least 1).
///
/// With `base = n / k` and `rem = n % k`, the first `rem` ranges hold `base + 1` indices and the
/// rest hold `base`. Every index lands in exactly one range; sizes differ by at most one. When
/// `k > n` the trailing ranges are empty.
pub fn partition(n: usize, worker_count: usize) -> Vec<Range<usize>> {
    let k = worker_count.max(1);
    let base = n / k;
    let rem = n % k;

    let mut begin = 0;
    (0..k)
        .map(|t| {
            let end = begin + base + usize::from(t < rem);
            let range = begin..end;
            begin = end;
            range
        })
        .collect()
}

/// Workers to spawn for a frontier of `frontier_len` nodes: never more than there is work, never zero.
pub fn workers_for(frontier_len: usize, max_workers: usize) -> usize {
    max_workers.max(1).min(frontier_len).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split() {
        assert_eq!(partition(6, 3), vec![0..2, 2..4, 4..6]);
    }

    #[test]
    fn remainder_goes_first() {
        assert_eq!(partition(7, 3), vec![0..3, 3..5, 5..7]);
    }

    #[test]
    fn one_worker_takes_all() {
        assert_eq!(partition(5, 1), vec![0..5]);
    }

    #[test]
    fn zero_workers_clamped() {
        assert_eq!(partition(4, 0), vec![0..4]);
    }

    #[test]
    fn empty_frontier() {
        assert_eq!(partition(0, 2), vec![0..0, 0..0]);
    }

    #[test]
    fn worker_count_bounds() {
        assert_eq!(workers_for(10, 4), 4);
        assert_eq!(workers_for(2, 8), 2);
        assert_eq!(workers_for(3, 0), 1);
        assert_eq!(workers_for(0, 4), 1);
    }
}
