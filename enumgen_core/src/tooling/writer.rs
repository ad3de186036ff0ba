//! Atomic artifact writes.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

/// What [`write_if_changed`] did to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

/// Write `contents` to `path` through a temporary file in the same directory,
/// renamed into place once flushed and synced. Missing parent directories are
/// created. The temporary file is removed on every failure path.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut file = NamedTempFile::new_in(parent)?;
    trace!("Staging {:?} via {:?}", path, file.path());
    file.write_all(contents)?;
    file.flush()?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {} bytes to {:?}", contents.len(), path);
    Ok(())
}

/// [`write_atomic`], skipped when `path` already holds exactly `contents`.
pub fn write_if_changed(path: &Path, contents: &[u8]) -> io::Result<WriteOutcome> {
    match fs::read(path) {
        Ok(existing) if existing == contents => {
            debug!("{:?} is up to date", path);
            return Ok(WriteOutcome::Unchanged);
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    write_atomic(path, contents)?;
    Ok(WriteOutcome::Written)
}
