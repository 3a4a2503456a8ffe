use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::errors::{Result, WorkspaceError};
use crate::fs_op::metadata::stamp_fixed_times;

/// Write `data` to a file that must not exist yet.
///
/// An existing file is reported as `AlreadyExists` and keeps its content.
/// Parent directories are expected to exist already.
pub fn write_new(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(WorkspaceError::AlreadyExists(path.to_path_buf()));
        }
        Err(e) => return Err(WorkspaceError::Io(e)),
    };
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);
    stamp_fixed_times(path)?;
    Ok(())
}

/// Write `data` to `path`, deleting any previous file there first.
pub fn replace(path: &Path, data: &[u8]) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(WorkspaceError::Io(e)),
    }
    write_new(path, data)
}
