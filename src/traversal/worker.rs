//! Level worker: expand a contiguous chunk of the frontier, one node at a time.

use crossbeam_channel::Sender;
use log::{debug, error, warn};

use crate::engine::decode::{DecodeError, decode_neighbors};
use crate::engine::fetch::{NeighborFetcher, NeighborService};
use crate::traversal::visited::VisitedSet;
use crate::{NodeId, NodeReport};

/// Fetch and decode the neighbors of one node. Transport failures already surface as an empty
/// payload, so the only error left here is a malformed one.
pub fn fetch_neighbors<F: NeighborFetcher>(
    fetcher: &mut F,
    node: &str,
) -> Result<Vec<NodeId>, DecodeError> {
    let raw = fetcher.fetch(node);
    decode_neighbors(&raw)
}

/// Expand one node: claim every neighbor not seen before. Never fails; a bad payload becomes
/// [`NodeReport::Failed`] and the node counts as a leaf.
pub fn expand_node<F: NeighborFetcher>(
    fetcher: &mut F,
    node: &str,
    visited: &VisitedSet,
) -> NodeReport {
    debug!("Trying to expand {}", node);
    match fetch_neighbors(fetcher, node) {
        Ok(neighbors) => {
            let mut claimed = 0;
            for neighbor in &neighbors {
                if visited.try_claim(neighbor) {
                    debug!("  neighbor {}", neighbor);
                    claimed += 1;
                }
            }
            NodeReport::Expanded {
                node: node.to_string(),
                neighbors: neighbors.len(),
                claimed,
            }
        }
        Err(e) => {
            warn!("Error while fetching neighbors of {}: {}", node, e);
            NodeReport::Failed {
                node: node.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

/// Worker body: open this worker's own connection, expand each node in `chunk`, send one report
/// per node on `report_tx`. The connection is dropped when the worker returns.
pub fn run_worker<S: NeighborService>(
    service: &S,
    chunk: &[NodeId],
    visited: &VisitedSet,
    report_tx: Sender<NodeReport>,
) {
    let mut fetcher = match service.connect() {
        Ok(f) => f,
        Err(e) => {
            error!("Failed to initialize worker connection: {}", e);
            for node in chunk {
                let _ = report_tx.send(NodeReport::Failed {
                    node: node.clone(),
                    reason: e.to_string(),
                });
            }
            return;
        }
    };

    for node in chunk {
        let report = expand_node(&mut fetcher, node, visited);
        // Receiver only goes away if the orchestrator is unwinding; keep expanding regardless.
        let _ = report_tx.send(report);
    }
}
