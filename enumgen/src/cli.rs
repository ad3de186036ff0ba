//! Command-line interface definitions for enumgen.

use clap::{Args, Parser, Subcommand, ValueEnum};
use enumgen_core::Target;
use std::path::PathBuf;

/// enumgen - enum definitions for several languages from one set of declaration files
#[derive(Parser, Debug)]
#[command(name = "enumgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to enumgen.toml configuration file
    #[arg(short, long, global = true, env = "ENUMGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate enum definitions from every declaration file under the roots
    Generate(GenerateArgs),

    /// Validate declaration files without writing anything
    Check(GenerateArgs),

    /// Write a default enumgen.toml into the current directory
    Init(InitArgs),

    /// List the target languages and their file extensions
    Targets,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Directories to scan for declaration files
    #[arg(required = true, num_args = 1.., value_name = "ROOT_DIR")]
    pub roots: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Target language (overrides config)
    #[arg(short, long, value_enum)]
    pub target: Option<TargetArg>,

    /// Output directory (overrides config; default: next to each input)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Declaration file extension, without the dot (overrides config)
    #[arg(short, long)]
    pub extension: Option<String>,

    /// Write every enum into a single artifact with this file stem
    #[arg(short, long, value_name = "STEM")]
    pub aggregate: Option<String>,

    /// Report empty declaration files as errors instead of warnings
    #[arg(long)]
    pub empty_as_error: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Overwrite an existing enumgen.toml
    #[arg(long)]
    pub force: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    C,
    Cpp,
    Csharp,
    Go,
    Python,
    Rust,
    #[value(alias = "typescript")]
    Ts,
}

impl From<TargetArg> for Target {
    fn from(arg: TargetArg) -> Self {
        match arg {
            TargetArg::C => Target::C,
            TargetArg::Cpp => Target::Cpp,
            TargetArg::Csharp => Target::Csharp,
            TargetArg::Go => Target::Go,
            TargetArg::Python => Target::Python,
            TargetArg::Rust => Target::Rust,
            TargetArg::Ts => Target::Ts,
        }
    }
}
