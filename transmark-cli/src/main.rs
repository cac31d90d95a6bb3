//! CLI entrypoint for `transmark`.

use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use transmark_cli::{Cli, CliError};

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    transmark_cli::run(&cli, &mut out)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
