use std::path::Path;

use crate::errors::{Result, WorkspaceError};
use crate::fs_op::create;
use crate::workspace::markers::Markers;

/// Capability profile of a writing session.
///
/// Both modes share the same path resolution; they differ in what happens
/// when a file already exists and in which paths may be touched at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Fresh tree. Collisions are errors; workspace marker synthesised on close.
    Create,
    /// Existing tree. Files are replaced in place; the workspace marker is off limits.
    Modify,
}

impl Mode {
    /// Reject targets this mode may not touch. `rel` is relative to the
    /// workspace root. Called before anything is created on disk.
    ///
    /// Modify refuses the workspace marker and anything reached through a
    /// root entry with a marker name.
    pub fn check_target(self, markers: &Markers, rel: &Path) -> Result<()> {
        match self {
            Mode::Create => Ok(()),
            Mode::Modify if markers.targets_workspace_marker(rel) => Err(WorkspaceError::invalid(
                rel,
                "the workspace marker cannot be changed while modifying a workspace",
            )),
            Mode::Modify => Ok(()),
        }
    }

    /// Write `data` to `path` under this mode's conflict policy.
    pub fn write(self, path: &Path, data: &[u8]) -> Result<()> {
        match self {
            Mode::Create => create::write_new(path, data),
            Mode::Modify => create::replace(path, data),
        }
    }

    pub fn synthesizes_workspace_marker(self) -> bool {
        matches!(self, Mode::Create)
    }
}
