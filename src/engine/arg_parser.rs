use clap::Parser;

/// Parallel level-by-level BFS over a remote neighbor-lookup service.
#[derive(Clone, Debug, Parser)]
#[command(name = "hopcrawl")]
#[command(about = "Crawl a remote graph breadth-first from START, up to DEPTH hops.")]
pub struct Cli {
    /// Start node identifier.
    #[arg(value_name = "START")]
    pub start: String,

    /// Number of hops to expand. 0 prints only the start node.
    #[arg(value_name = "DEPTH", value_parser = clap::value_parser!(usize))]
    pub depth: usize,

    /// Max worker threads per level. Default: derived from available threads.
    #[arg(value_name = "THREADS", value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: Option<u32>,

    /// Neighbor service base URL; the node id is appended as a path segment.
    #[arg(long, short = 's')]
    pub service_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, short = 't', value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Retries after a transport failure (exponential backoff). Default 0: a failed node is a leaf.
    #[arg(long, short = 'r', value_parser = clap::value_parser!(u32))]
    pub retries: Option<u32>,

    /// User-Agent header for requests.
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Show a progress bar per level (with --verbose).
    #[arg(long, short = 'p', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub progress: Option<bool>,
}
