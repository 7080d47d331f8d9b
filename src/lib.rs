//! Hopcrawl: parallel level-by-level BFS over a remote neighbor-lookup service

pub mod engine;
pub mod traversal;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;

use crate::engine::fetch::HttpNeighborService;
use crate::traversal::{Crawler, resolve_max_workers};

/// Result alias used by public hopcrawl API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: crawl the HTTP neighbor service in `opts` from `start`, up to `depth` hops.
///
/// Fails only on invalid options (e.g. a malformed service URL), before any request is made.
/// Per-node fetch or decode failures end up in [`Traversal::stats`], not in the error.
///
/// ```ignore
/// let opts = CrawlOpts { service_url: "http://localhost:8080/neighbors/".into(), num_threads: Some(4), ..Default::default() };
/// let t = hopcrawl::crawl("Kevin Bacon", 2, &opts)?;
/// for (depth, level) in t.levels.iter().enumerate() { println!("{depth}: {}", level.len()); }
/// ```
///
/// For a custom transport, implement [`NeighborService`](engine::NeighborService) and use
/// [`Crawler`](traversal::Crawler) directly.
pub fn crawl(start: &str, depth: usize, opts: &CrawlOpts) -> Result<Traversal> {
    let opts = Opts::from(opts);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );
    let service = HttpNeighborService::new(&opts)?;
    let crawler = Crawler::new(service, resolve_max_workers(opts.num_threads));
    Ok(crawler.traverse(start, depth))
}
