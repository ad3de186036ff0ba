//! Command handlers for the enumgen CLI.

pub mod check;
pub mod generate;
pub mod init;
pub mod targets;

use crate::cli::{Cli, Commands};
use enumgen_core::{Result, RunStatus};

/// Dispatch to the handler of the parsed subcommand.
pub fn run(cli: &Cli) -> Result<RunStatus> {
    match &cli.command {
        Commands::Generate(args) => generate::run(cli, args),
        Commands::Check(args) => check::run(cli, args),
        Commands::Init(args) => init::run(cli, args),
        Commands::Targets => targets::run(cli),
    }
}
