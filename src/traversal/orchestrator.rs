//! BFS orchestrator: level-by-level loop with a join barrier between levels.

use crossbeam_channel::unbounded;
use log::{debug, error};
use std::thread;
use std::time::Instant;

use crate::engine::fetch::NeighborService;
use crate::engine::progress::LevelProgress;
use crate::traversal::partition::{partition, workers_for};
use crate::traversal::visited::VisitedSet;
use crate::traversal::worker::run_worker;
use crate::utils::cap_workers_by_fd_limit;
use crate::utils::config::WorkerThreadLimits;
use crate::{CrawlStats, Level, NodeId, NodeReport, Traversal};

/// Thread name for worker `index` of level `depth`; shows up in warn/error log prefixes.
pub fn worker_thread_name(depth: usize, index: usize) -> String {
    format!("L{depth}-w{index}")
}

/// Max workers per level: the requested count (or a default from available threads), capped by
/// the open file limit. Never 0.
pub fn resolve_max_workers(requested: Option<usize>) -> usize {
    let n = requested.unwrap_or_else(|| WorkerThreadLimits::current().default_workers());
    cap_workers_by_fd_limit(n)
}

/// Drives a traversal over `service`. Holds no state between traversals.
pub struct Crawler<S> {
    service: S,
    max_workers: usize,
    progress: bool,
}

impl<S: NeighborService> Crawler<S> {
    /// `max_workers < 1` is clamped to 1.
    pub fn new(service: S, max_workers: usize) -> Self {
        Self {
            service,
            max_workers: max_workers.max(1),
            progress: false,
        }
    }

    /// Show a kdam bar per level while it expands.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Discover every node within `depth` hops of `start`.
    ///
    /// Returns levels `0..=depth`; level 0 is exactly `[start]` and trailing levels may be empty.
    /// Level `d + 1` is read only after every worker for level `d` has been joined.
    pub fn traverse(&self, start: &str, depth: usize) -> Traversal {
        let started = Instant::now();
        let visited = VisitedSet::new();
        let mut stats = CrawlStats::default();

        visited.try_claim(start);
        let mut levels: Vec<Level> = Vec::with_capacity(depth + 1);
        levels.push(visited.take_level());

        for d in 0..depth {
            debug!("starting level: {}", d);
            let current = &levels[d];
            if !current.is_empty() {
                self.expand_level(d, current, &visited, &mut stats);
            }
            // Barrier passed: every claim for d + 1 is in.
            let next = visited.take_level();
            debug!("level {} closed with {} node(s)", d + 1, next.len());
            levels.push(next);
        }

        stats.elapsed = started.elapsed();
        Traversal { levels, stats }
    }

    /// Spawn one scoped worker per chunk of `frontier`, drain their reports, join them all.
    fn expand_level(
        &self,
        depth: usize,
        frontier: &[NodeId],
        visited: &VisitedSet,
        stats: &mut CrawlStats,
    ) {
        let workers = workers_for(frontier.len(), self.max_workers);
        debug!(
            "level {}: {} node(s) across {} worker(s)",
            depth,
            frontier.len(),
            workers
        );
        let mut progress = LevelProgress::new(self.progress, depth, frontier.len());
        let (report_tx, report_rx) = unbounded();
        let service = &self.service;

        thread::scope(|s| {
            let mut handles = Vec::with_capacity(workers);
            for (i, range) in partition(frontier.len(), workers).into_iter().enumerate() {
                let chunk = &frontier[range];
                let report_tx = report_tx.clone();
                let spawned = thread::Builder::new()
                    .name(worker_thread_name(depth, i))
                    .spawn_scoped(s, move || run_worker(service, chunk, visited, report_tx));
                match spawned {
                    Ok(h) => handles.push(h),
                    Err(e) => {
                        error!("Failed to spawn worker {} for level {}: {}", i, depth, e);
                        for node in chunk {
                            stats.record(NodeReport::Failed {
                                node: node.clone(),
                                reason: format!("worker spawn failed: {e}"),
                            });
                        }
                    }
                }
            }

            // Dropping the last sender closes the channel once every worker is done.
            drop(report_tx);
            while let Ok(report) = report_rx.recv() {
                progress.tick();
                stats.record(report);
            }

            for h in handles {
                if h.join().is_err() {
                    error!(
                        "worker for level {} panicked; its remaining nodes were not expanded",
                        depth
                    );
                }
            }
        });
        progress.finish();
    }
}

/// Traverse with a fresh [`Crawler`] borrowing `service`: levels only, no stats.
pub fn traverse<S: NeighborService>(
    service: &S,
    start: &str,
    depth: usize,
    max_workers: usize,
) -> Vec<Level> {
    Crawler::new(service, max_workers)
        .traverse(start, depth)
        .levels
}
