//! Public and internal types for the hopcrawl API and traversal engine.

use std::time::Duration;

/// Opaque identifier naming a graph vertex. Equality is exact string equality.
pub type NodeId = String;

/// Nodes discovered at one BFS depth. Unique within the level and across all levels.
pub type Level = Vec<NodeId>;

/// What happened when one frontier node was expanded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeReport {
    /// Neighbors were fetched and decoded. `claimed` is how many of them were first discoveries.
    Expanded {
        node: NodeId,
        neighbors: usize,
        claimed: usize,
    },
    /// The node could not be expanded and is treated as having no neighbors.
    Failed { node: NodeId, reason: String },
}

impl NodeReport {
    pub fn node(&self) -> &str {
        match self {
            NodeReport::Expanded { node, .. } | NodeReport::Failed { node, .. } => node,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, NodeReport::Failed { .. })
    }
}

/// Counters gathered from worker reports over a whole traversal.
#[derive(Clone, Debug, Default)]
pub struct CrawlStats {
    /// Nodes whose neighbor list was fetched and decoded.
    pub expanded: usize,
    /// Nodes that could not be expanded, with the reason.
    pub failed: Vec<(NodeId, String)>,
    /// Wall time of the traversal.
    pub elapsed: Duration,
}

impl CrawlStats {
    pub(crate) fn record(&mut self, report: NodeReport) {
        match report {
            NodeReport::Expanded { .. } => self.expanded += 1,
            NodeReport::Failed { node, reason } => self.failed.push((node, reason)),
        }
    }
}

/// Result of a traversal: levels `0..=depth` plus stats.
///
/// `levels[0]` is always exactly `[start]`. Trailing levels may be empty when the graph dead-ends.
#[derive(Clone, Debug, Default)]
pub struct Traversal {
    pub levels: Vec<Level>,
    pub stats: CrawlStats,
}

impl Traversal {
    /// Total nodes discovered across all levels (start included).
    pub fn node_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }

    /// Iterate every discovered node in level order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.levels.iter().flatten()
    }
}

/// Lib-only options for [`crawl`](crate::crawl). Only the fields that apply when embedding the crate.
#[derive(Clone, Debug)]
pub struct CrawlOpts {
    /// Base URL of the neighbor service; the node id is appended as one path segment.
    pub service_url: String,
    /// Max worker threads per level. When None, derived from available threads and the FD limit.
    pub num_threads: Option<usize>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Extra attempts after a transport failure. 0 keeps fail-once-treat-as-leaf.
    pub retries: u32,
    /// User-Agent header sent with each request.
    pub user_agent: String,
}

impl Default for CrawlOpts {
    fn default() -> Self {
        let o = Opts::default();
        CrawlOpts {
            service_url: o.service_url,
            num_threads: o.num_threads,
            timeout: o.timeout,
            retries: o.retries,
            user_agent: o.user_agent,
        }
    }
}

impl From<&CrawlOpts> for Opts {
    fn from(o: &CrawlOpts) -> Self {
        Opts {
            service_url: o.service_url.clone(),
            num_threads: o.num_threads,
            timeout: o.timeout,
            retries: o.retries,
            user_agent: o.user_agent.clone(),
            verbose: false,
            progress: false,
        }
    }
}

/// Full options (CLI). Use [`CrawlOpts`] for lib.
#[derive(Clone, Debug)]
pub struct Opts {
    /// Base URL of the neighbor service.
    pub service_url: String,
    /// Max worker threads per level. When None, derived from available threads and the FD limit.
    pub num_threads: Option<usize>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Extra attempts after a transport failure.
    pub retries: u32,
    /// User-Agent header sent with each request.
    pub user_agent: String,
    /// Debug logging (request URLs, expansions, claimed neighbors) and failed-node listing.
    pub verbose: bool,
    /// Show a per-level progress counter (verbose mode only).
    pub progress: bool,
}

impl Default for Opts {
    fn default() -> Self {
        use crate::utils::config::{HttpConsts, PackagePaths};
        Opts {
            service_url: HttpConsts::DEFAULT_SERVICE_URL.to_string(),
            num_threads: None,
            timeout: HttpConsts::DEFAULT_TIMEOUT,
            retries: HttpConsts::DEFAULT_RETRIES,
            user_agent: PackagePaths::get().user_agent().to_string(),
            verbose: false,
            progress: false,
        }
    }
}
