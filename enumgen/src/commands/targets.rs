//! Targets command - lists the supported target languages.

use crate::cli::Cli;
use enumgen_core::{Result, RunStatus, Target};
use strum::IntoEnumIterator;

/// Runs the targets command.
pub fn run(_cli: &Cli) -> Result<RunStatus> {
    print!("{}", table());
    Ok(RunStatus::Success)
}

fn table() -> String {
    Target::iter()
        .map(|target| {
            format!(
                "{:<8} .{:<5} {}\n",
                target.to_string(),
                target.extension(),
                target.construct()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_target() {
        let table = table();
        assert_eq!(table.lines().count(), Target::iter().count());
        assert!(table.contains("rust     .rs    #[repr(i64)] enum\n"));
        assert!(table.contains("ts       .ts    export enum\n"));
    }
}
