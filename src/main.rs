//! Headless Chroma Blast runner (default binary).
//!
//! Plays a session by always taking the first valid placement, or lists dealt trays with
//! `--trays N`. Useful for checking daily-seed determinism and tuning rules files.

use anyhow::Result;

use chroma_blast::cli::{parse_args, run};
use chroma_blast::logging::enable_verbose_logging;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;
    if config.verbose {
        enable_verbose_logging();
    }

    let output = run(&config)?;
    println!("{}", output);
    Ok(())
}
