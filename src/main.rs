//! Hopcrawl CLI: print every node within DEPTH hops of START, level by level.

use anyhow::Result;
use clap::Parser;
use hopcrawl::engine::arg_parser::Cli;
use hopcrawl::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
