mod cli;
mod commands;

use clap::Parser;
use cli::Cli;
use enumgen_core::RunStatus;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    debug!("Parsed command line: {:?}", cli);

    let status = match commands::run(&cli) {
        Ok(status) => status,
        Err(e) => {
            error!("Run aborted: {}", e);
            eprintln!("enumgen: {}", e);
            RunStatus::Fatal
        }
    };
    ExitCode::from(status.code())
}

/// `RUST_LOG` wins; otherwise the level follows `-q` and `-v`.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
