//! Generate command - emits enum definitions for every declaration file.

use crate::cli::{Cli, GenerateArgs};
use enumgen_core::config::{EmptyFileSeverity, EnumgenConfig};
use enumgen_core::tooling::{GenerationReport, Generator, GeneratorOptions, GeneratorOptionsBuilder};
use enumgen_core::tooling::writer::WriteOutcome;
use enumgen_core::{Result, RunStatus, Target};
use tracing::info;

/// Runs the generate command.
pub fn run(cli: &Cli, args: &GenerateArgs) -> Result<RunStatus> {
    let options = options(cli, args, false)?;
    let report = Generator::new(options).run()?;

    for artifact in &report.artifacts {
        match artifact.outcome {
            WriteOutcome::Written => info!(
                "Wrote {} ({} enums, {} bytes)",
                artifact.path.display(),
                artifact.enum_count,
                artifact.bytes_written
            ),
            WriteOutcome::Unchanged => info!("{} is up to date", artifact.path.display()),
        }
    }

    print_report(cli, &report);
    Ok(report.status())
}

/// Config file values overridden by command-line flags.
pub fn options(cli: &Cli, args: &GenerateArgs, check_only: bool) -> Result<GeneratorOptions> {
    let config = EnumgenConfig::load(cli.config.as_deref())?;
    let mut builder = GeneratorOptionsBuilder::from_config(&config)
        .roots(args.roots.clone())
        .check_only(check_only);

    if args.recursive {
        builder = builder.recursive(true);
    }
    if let Some(target) = args.target {
        builder = builder.target(Target::from(target));
    }
    if let Some(out_dir) = &args.out_dir {
        builder = builder.out_dir(out_dir);
    }
    if let Some(extension) = &args.extension {
        builder = builder.extension(extension);
    }
    if let Some(stem) = &args.aggregate {
        builder = builder.aggregate(stem);
    }
    if args.empty_as_error {
        builder = builder.empty_file(EmptyFileSeverity::Error);
    }
    Ok(builder.build())
}

/// The diagnostic report goes to stderr and always ends with the summary;
/// `--quiet` leaves out the warning lines.
pub fn print_report(cli: &Cli, report: &GenerationReport) {
    eprint!("{}", report.reporter.render(!cli.quiet));
}
