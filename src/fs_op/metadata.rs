//! Fixed timestamps for generated trees.
//!
//! Every file a session writes gets the same access and modification time,
//! so two generations with the same content compare equal including
//! metadata. Directories are stamped once at the end of a session because
//! adding entries to them bumps their mtime.

use std::io;
use std::path::Path;

use filetime::{set_file_times, FileTime};
use walkdir::WalkDir;

/// Sentinel modification time (2000-01-01T00:00:00Z) used for all fixtures.
pub const FIXTURE_MTIME: i64 = 946_684_800;

/// The sentinel as a `FileTime`.
pub fn fixture_time() -> FileTime {
    FileTime::from_unix_time(FIXTURE_MTIME, 0)
}

/// Set atime and mtime of `path` to the sentinel.
pub fn stamp_fixed_times(path: &Path) -> io::Result<()> {
    let ft = fixture_time();
    set_file_times(path, ft, ft)
}

/// Stamp every directory under `root`, including `root` itself.
///
/// Walks deepest-first so that stamping a child never disturbs a parent
/// that was already stamped.
pub fn stamp_tree(root: &Path) -> io::Result<()> {
    for entry in WalkDir::new(root).contents_first(true) {
        let entry = entry.map_err(io::Error::other)?;
        if entry.file_type().is_dir() {
            stamp_fixed_times(entry.path())?;
        }
    }
    Ok(())
}
