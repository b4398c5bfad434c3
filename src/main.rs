use clap::Parser;
use navguard::cli::{run_cli, Cli};
use navguard::logging::init_logging;

fn main() -> anyhow::Result<()> {
    init_logging()?;
    run_cli(Cli::parse())
}
