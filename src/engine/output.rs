//! Console output for a finished traversal.

use anyhow::{Context, Result};
use log::debug;
use std::io::{self, BufWriter, Write};

use crate::utils::Colors;
use crate::{Level, Traversal};

/// Write each level as `- <node>` lines followed by the level's node count.
pub fn write_levels<W: Write>(out: &mut W, levels: &[Level]) -> io::Result<()> {
    for level in levels {
        for node in level {
            writeln!(out, "- {}", node)?;
        }
        writeln!(out, "{}", level.len())?;
    }
    Ok(())
}

/// Print all levels to stdout.
pub fn print_levels(traversal: &Traversal) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_levels(&mut out, &traversal.levels).context("write levels to stdout")?;
    out.flush().context("flush stdout")?;
    Ok(())
}

/// Debug-level one-line summary of the crawl.
pub fn print_summary(traversal: &Traversal) {
    let stats = &traversal.stats;
    debug!(
        "{} | {} | {}",
        Colors::colorize(
            Colors::DISCOVERED,
            &format!("Discovered: {}", traversal.node_count())
        ),
        Colors::colorize(Colors::EXPANDED, &format!("Expanded: {}", stats.expanded)),
        Colors::colorize(Colors::FAILED, &format!("Failed: {}", stats.failed.len()))
    );
}
