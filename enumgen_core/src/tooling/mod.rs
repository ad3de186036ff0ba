//! Pipeline plumbing around the front end and the emitters.
//!
//! - [`discovery`] finds declaration files under the root directories
//! - [`Generator`] runs a whole generation over them
//! - [`writer`] puts artifacts on disk atomically
//!
//! ## Quick Start (in build.rs)
//!
//! ```rust,ignore
//! fn main() {
//!     let report = enumgen_core::tooling::generate(vec!["enums".into()])
//!         .expect("enum generation failed");
//!     assert!(!report.reporter.has_errors(), "{}", report.reporter.render(true));
//!     println!("cargo:rerun-if-changed=enums/");
//!     println!("cargo:rerun-if-changed=enumgen.toml");
//! }
//! ```

pub mod discovery;
mod generator;
pub mod writer;

pub use generator::*;

use crate::config::EnumgenConfig;
use crate::error::Result;
use std::path::PathBuf;

/// Generate artifacts for `roots` with the settings of the nearest
/// `enumgen.toml`.
///
/// # Errors
///
/// Returns `EnumgenError` if the configuration cannot be read or parsed, or
/// if a root is not a readable directory. Problems with individual
/// declaration files are diagnostics in the returned report.
pub fn generate(roots: Vec<PathBuf>) -> Result<GenerationReport> {
    let config = EnumgenConfig::load(None)?;
    let options = GeneratorOptionsBuilder::from_config(&config)
        .roots(roots)
        .build();
    Generator::new(options).run()
}
