//! Whole-file replacement for the JSON documents the stores keep on disk.

use std::{fs, io::Write, path::Path};

use formgate_types::Result;
use tracing::debug;

/// Write `bytes` to `path` through a sibling temp file and a rename, so a
/// crash mid-write never leaves a truncated document behind.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote document");
    Ok(())
}

/// Read `path`, or `None` if it does not exist.
pub(crate) fn read_if_exists(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
