//! Atomic file publication via write + rename.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Atomically replace `path` with `bytes`.
///
/// Writes a sibling temporary file, fsyncs it, then renames it over
/// the target. A concurrent reader observes either the old content or
/// the new content in full, never a torn file; a killed writer leaves
/// at most a stale `.tmp` sibling behind.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)?;
    file.write_all(bytes)?;
    file.sync_all()?;

    fs::rename(&temp_path, path)?;
    Ok(())
}
