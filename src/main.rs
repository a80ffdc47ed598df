//! CLI entry point for the cave level generator

use cavegen::io::cli::{Cli, LevelProcessor};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> cavegen::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbosity_filter() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Cli::default_log_filter())),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut processor = LevelProcessor::new(cli);
    processor.process()
}
