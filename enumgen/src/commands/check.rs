//! Check command - validates declaration files without writing artifacts.

use super::generate::{options, print_report};
use crate::cli::{Cli, GenerateArgs};
use enumgen_core::tooling::Generator;
use enumgen_core::{Result, RunStatus};
use tracing::info;

/// Runs the check command.
pub fn run(cli: &Cli, args: &GenerateArgs) -> Result<RunStatus> {
    let report = Generator::new(options(cli, args, true)?).run()?;

    info!(
        "Checked {} files: {} valid enums, {} rejected",
        report.files.len(),
        report.enums_valid,
        report.enums_rejected
    );
    print_report(cli, &report);
    Ok(report.status())
}
