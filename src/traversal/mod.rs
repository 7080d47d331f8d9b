//! Traversal engine: orchestrator, partitioner, visited set, level workers.

pub mod error_handler;
pub mod orchestrator;
pub mod partition;
pub mod visited;
pub mod worker;

pub use error_handler::report_failed_nodes;
pub use orchestrator::{Crawler, resolve_max_workers, traverse};
pub use partition::{partition, workers_for};
pub use visited::VisitedSet;
pub use worker::{expand_node, fetch_neighbors, run_worker};
