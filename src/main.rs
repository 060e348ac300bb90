//! Logscanner CLI: scan a tree for keywords, print or save matches as JSON.

use anyhow::Result;
use clap::Parser;
use logscanner::engine::arg_parser::Cli;
use logscanner::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
