//! Init command - writes a default enumgen.toml.

use crate::cli::{Cli, InitArgs};
use enumgen_core::config::write_default_config;
use enumgen_core::{EnumgenError, Result, RunStatus};
use std::env;
use tracing::{error, info};

/// Runs the init command.
pub fn run(cli: &Cli, args: &InitArgs) -> Result<RunStatus> {
    let dir = env::current_dir()?;
    match write_default_config(&dir, args.force) {
        Ok(path) => {
            info!("Created {}", path.display());
            if !cli.quiet {
                println!("Created {}", path.display());
            }
            Ok(RunStatus::Success)
        }
        Err(EnumgenError::AlreadyExists { path }) => {
            error!("{} already exists. Use --force to overwrite.", path.display());
            eprintln!("enumgen: {} already exists. Use --force to overwrite.", path.display());
            Ok(RunStatus::Errors)
        }
        Err(e) => Err(e),
    }
}
