//! ctorkit - Entry Point
//!
//! Binary entry point for the `ctorkit` command line.

use clap::Parser;
use ctorkit::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout = std::io::stdout();
    run(cli, &mut stdout.lock())
}
