use log::warn;

use crate::CrawlStats;

/// Log nodes that could not be expanded. Call after the traversal completes.
/// Always a summary at warn; each node and reason too when `verbose`.
pub fn report_failed_nodes(stats: &CrawlStats, verbose: bool) {
    let failed = stats.failed.len();
    if failed == 0 {
        return;
    }
    warn!(
        "{} node(s) could not be expanded and were treated as leaves",
        failed
    );
    if verbose {
        for (node, reason) in &stats.failed {
            eprintln!("  failed: {} ({})", node, reason);
        }
    }
}
