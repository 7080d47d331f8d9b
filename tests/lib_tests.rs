use hopcrawl::engine::{DecodeError, decode_neighbors, write_levels};
use hopcrawl::traversal::{partition, workers_for};
use hopcrawl::utils::config::WorkerThreadLimits;
use hopcrawl::{CrawlOpts, crawl};
use proptest::prelude::*;

// --- partition ---

proptest! {
    #[test]
    fn test_partition_covers_each_index_once(n in 0usize..500, k in 1usize..64) {
        let chunks = partition(n, k);
        prop_assert_eq!(chunks.len(), k);

        let mut next = 0;
        for c in &chunks {
            prop_assert_eq!(c.start, next);
            prop_assert!(c.end >= c.start);
            next = c.end;
        }
        prop_assert_eq!(next, n);

        let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        let max = *sizes.iter().max().unwrap();
        let min = *sizes.iter().min().unwrap();
        prop_assert!(max - min <= 1);
    }

    #[test]
    fn test_partition_larger_chunks_first(n in 0usize..500, k in 1usize..64) {
        let sizes: Vec<usize> = partition(n, k).iter().map(|c| c.len()).collect();
        prop_assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_workers_for_never_exceeds_work(len in 0usize..200, max in 0usize..64) {
        let w = workers_for(len, max);
        prop_assert!(w >= 1);
        prop_assert!(w <= max.max(1));
        if len > 0 {
            prop_assert!(w <= len);
        }
    }
}

// --- decode ---

#[test]
fn test_decode_distinguishes_error_from_empty() {
    assert_eq!(decode_neighbors(b"{}").unwrap(), Vec::<String>::new());
    assert!(matches!(
        decode_neighbors(b"null"),
        Err(DecodeError::NotAnObject("null"))
    ));
}

// --- output ---

#[test]
fn test_write_levels_format() {
    let levels = vec![vec!["Kevin Bacon".to_string()], vec![]];
    let mut out = Vec::new();
    write_levels(&mut out, &levels).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "- Kevin Bacon\n1\n0\n");
}

// --- config ---

#[test]
fn test_default_workers_within_limits() {
    let limits = WorkerThreadLimits::current();
    let n = limits.default_workers();
    assert!(n >= WorkerThreadLimits::FLOOR_THREADS);
    assert!(n <= WorkerThreadLimits::NETWORK_MAX_THREADS);
}

#[test]
fn test_crawl_rejects_invalid_service_url() {
    let opts = CrawlOpts {
        service_url: "::not a url::".to_string(),
        ..CrawlOpts::default()
    };
    assert!(crawl("A", 1, &opts).is_err());
}

#[test]
fn test_crawl_depth_zero_makes_no_requests() {
    // Nothing listens here; depth 0 must not try.
    let opts = CrawlOpts {
        service_url: "http://127.0.0.1:9/neighbors/".to_string(),
        num_threads: Some(2),
        ..CrawlOpts::default()
    };
    let t = crawl("A", 0, &opts).unwrap();
    assert_eq!(t.levels, vec![vec!["A".to_string()]]);
    assert_eq!(t.stats.expanded + t.stats.failed.len(), 0);
}
