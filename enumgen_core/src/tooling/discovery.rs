//! Declaration file discovery.
//!
//! Every walk carries its root and the path relative to it; the process
//! working directory is never changed.

use crate::diagnostic::{Diagnostic, DiagnosticKind, Severity};
use crate::error::{EnumgenError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};
use walkdir::WalkDir;

/// A declaration file found under one of the roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub root: PathBuf,
    /// `root` joined with `relative`.
    pub path: PathBuf,
    pub relative: PathBuf,
}

#[derive(Debug, Default)]
pub struct Discovery {
    /// Sorted by path.
    pub files: Vec<DiscoveredFile>,
    /// Entries below a root that could not be read.
    pub diagnostics: Vec<Diagnostic>,
}

/// A root must be an existing, listable directory. Returns its canonical
/// path.
pub fn check_root(root: &Path) -> Result<PathBuf> {
    let metadata = fs::metadata(root)
        .map_err(|e| EnumgenError::invalid_root(root, e.to_string()))?;
    if !metadata.is_dir() {
        return Err(EnumgenError::invalid_root(root, "not a directory"));
    }
    fs::read_dir(root).map_err(|e| EnumgenError::invalid_root(root, e.to_string()))?;
    fs::canonicalize(root).map_err(|e| EnumgenError::invalid_root(root, e.to_string()))
}

fn has_extension(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.len() > suffix.len() && name.ends_with(suffix))
}

/// Find every file ending in `.<extension>` under `roots`.
///
/// All roots are checked before any of them is walked, so an invalid root
/// aborts the run before anything happens. A file reachable from several
/// roots (`defs` and `./defs`, or a root and its subdirectory) is reported
/// once, under the first root that reaches it.
pub fn discover(roots: &[PathBuf], extension: &str, recursive: bool) -> Result<Discovery> {
    if roots.is_empty() {
        return Err(EnumgenError::config("no root directories given"));
    }
    let canonical_roots = roots
        .iter()
        .map(|root| check_root(root))
        .collect::<Result<Vec<_>>>()?;

    let suffix = format!(".{}", extension);
    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut discovery = Discovery::default();
    let mut seen = HashSet::new();

    for (root, canonical_root) in roots.iter().zip(&canonical_roots) {
        info!("Scanning {:?} for *{} files", root, suffix);
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(root).to_path_buf();
                    discovery.diagnostics.push(Diagnostic::for_file(
                        Severity::Error,
                        DiagnosticKind::Io,
                        path,
                        format!("cannot read directory entry: {}", e),
                    ));
                    continue;
                }
            };

            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file || !has_extension(entry.path(), &suffix) {
                trace!("Skipping {:?}", entry.path());
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_path_buf();
            if !seen.insert(canonical_root.join(&relative)) {
                trace!("Already discovered {:?}", entry.path());
                continue;
            }

            debug!("Discovered {:?}", entry.path());
            discovery.files.push(DiscoveredFile {
                root: root.clone(),
                path: entry.path().to_path_buf(),
                relative,
            });
        }
    }

    discovery.files.sort_by(|a, b| a.path.cmp(&b.path));
    info!("Discovered {} declaration files", discovery.files.len());
    Ok(discovery)
}
