use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::TempDir;
use tracing::{debug, info};

use crate::errors::{Result, WorkspaceError};
use crate::fs_op::helpers::is_missing_or_empty;
use crate::fs_op::metadata::stamp_tree;
use crate::fs_op::PathScope;
use crate::workspace::label::PackageRef;
use crate::workspace::markers::Markers;
use crate::workspace::mode::Mode;
use crate::workspace::package::PackageWriter;

/// A writing session over a whole workspace.
///
/// Obtained with [`WorkspaceWriter::create`] for a brand-new tree or
/// [`WorkspaceWriter::open_existing`] to mutate a tree between test phases.
/// The session ends with [`WorkspaceWriter::close`], which consumes it.
#[derive(Debug)]
pub struct WorkspaceWriter {
    root: PackageWriter<'static>,
}

impl WorkspaceWriter {
    /// Start a creation session in `root`, which is created when missing and
    /// must be empty otherwise.
    pub fn create<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::create_with_markers(root, Markers::default())
    }

    pub fn create_with_markers<P: AsRef<Path>>(root: P, markers: Markers) -> Result<Self> {
        let root = root.as_ref();
        if !is_missing_or_empty(root)? {
            return Err(WorkspaceError::invalid(
                root,
                "a new workspace must start from an empty directory",
            ));
        }
        fs::create_dir_all(root)?;
        let scope = PathScope::new(root)?;
        info!("creating workspace in {}", scope.workspace_root().display());
        Ok(WorkspaceWriter {
            root: PackageWriter::root(scope, Mode::Create, Rc::new(markers)),
        })
    }

    /// Start a modification session on an existing workspace. `root` must
    /// already carry a workspace marker.
    pub fn open_existing<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::open_existing_with_markers(root, Markers::default())
    }

    pub fn open_existing_with_markers<P: AsRef<Path>>(root: P, markers: Markers) -> Result<Self> {
        let scope = PathScope::new(root)?;
        if !markers.has_workspace_marker(scope.dir()) {
            return Err(WorkspaceError::invalid(
                scope.dir(),
                format!("not a workspace: no {} found", markers.workspace_file()),
            ));
        }
        info!("modifying workspace in {}", scope.workspace_root().display());
        Ok(WorkspaceWriter {
            root: PackageWriter::root(scope, Mode::Modify, Rc::new(markers)),
        })
    }

    /// Absolute (canonical) workspace root.
    pub fn root(&self) -> &Path {
        self.root.dir()
    }

    pub fn mode(&self) -> Mode {
        self.root.mode
    }

    pub fn markers(&self) -> &Markers {
        &self.root.markers
    }

    /// The root package, for helpers that work on any [`PackageWriter`].
    pub fn root_package(&mut self) -> &mut PackageWriter<'static> {
        &mut self.root
    }

    pub fn package_ref(&self) -> PackageRef {
        self.root.package_ref()
    }

    /// Label of `target` in the root package: `//:target`.
    pub fn label(&self, target: &str) -> String {
        self.root.label(target)
    }

    /// See [`PackageWriter::write_file`].
    pub fn write_file<C: AsRef<[u8]>>(&mut self, rel: &str, contents: C) -> Result<PathBuf> {
        self.root.write_file(rel, contents)
    }

    /// See [`PackageWriter::write_with`].
    pub fn write_with<F>(&mut self, rel: &str, render: F) -> Result<PathBuf>
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        self.root.write_with(rel, render)
    }

    /// See [`PackageWriter::package`].
    pub fn package<F>(&mut self, rel: &str, build: F) -> Result<PackageRef>
    where
        F: FnOnce(&mut PackageWriter<'_>) -> Result<()>,
    {
        self.root.package(rel, build)
    }

    /// See [`PackageWriter::open_package`].
    ///
    /// The session stays borrowed while the package is open, so it cannot be
    /// closed underneath it:
    ///
    /// ```compile_fail
    /// # fn main() -> fakews::Result<()> {
    /// let dir = tempfile::tempdir()?;
    /// let mut ws = fakews::WorkspaceWriter::create(dir.path())?;
    /// let mut pkg = ws.open_package("late")?;
    /// ws.close()?;
    /// pkg.write_file("after_close.txt", "x")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open_package(&mut self, rel: &str) -> Result<PackageWriter<'_>> {
        self.root.open_package(rel)
    }

    /// End the session and return the workspace root.
    ///
    /// A creation session writes the workspace marker if nobody did. The
    /// root package never gets a synthesised build marker. Directory times
    /// are then set to the fixture sentinel.
    pub fn close(self) -> Result<PathBuf> {
        let root = self.root.dir().to_path_buf();
        let markers = &self.root.markers;
        if self.root.mode.synthesizes_workspace_marker() && !markers.has_workspace_marker(&root) {
            let marker = root.join(markers.workspace_file());
            self.root
                .mode
                .write(&marker, markers.workspace_contents.as_bytes())?;
            debug!("synthesised {}", marker.display());
        }
        stamp_tree(&root)?;
        info!(
            "closed workspace {} ({} top-level files)",
            root.display(),
            self.root.files_written()
        );
        Ok(root)
    }
}

/// Create a workspace in `root`, fill it with `build` and close it.
pub fn with_new_workspace<P, F>(root: P, build: F) -> Result<PathBuf>
where
    P: AsRef<Path>,
    F: FnOnce(&mut WorkspaceWriter) -> Result<()>,
{
    let mut ws = WorkspaceWriter::create(root)?;
    build(&mut ws)?;
    ws.close()
}

/// Open the existing workspace at `root`, change it with `build` and close it.
pub fn with_existing_workspace<P, F>(root: P, build: F) -> Result<PathBuf>
where
    P: AsRef<Path>,
    F: FnOnce(&mut WorkspaceWriter) -> Result<()>,
{
    let mut ws = WorkspaceWriter::open_existing(root)?;
    build(&mut ws)?;
    ws.close()
}

/// A workspace root in a fresh temporary directory, removed on drop.
#[derive(Debug)]
pub struct TempWorkspace {
    dir: TempDir,
}

impl TempWorkspace {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("fakews_").tempdir()?;
        Ok(TempWorkspace { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creation session on the temporary root.
    pub fn create(&self) -> Result<WorkspaceWriter> {
        WorkspaceWriter::create(self.path())
    }

    /// Modification session on the temporary root.
    pub fn modify(&self) -> Result<WorkspaceWriter> {
        WorkspaceWriter::open_existing(self.path())
    }
}
