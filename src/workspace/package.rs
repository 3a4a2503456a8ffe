use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::errors::{Result, WorkspaceError};
use crate::fs_op::PathScope;
use crate::workspace::label::PackageRef;
use crate::workspace::markers::Markers;
use crate::workspace::mode::Mode;

/// Writer for one package directory of a workspace session.
///
/// A package only shows up on disk once something is written under it.
/// Closing a package writes a default build marker if none is present, so
/// every declared package is recognisable by the build tool.
///
/// A nested writer holds a mutable borrow of its parent for `'a`, so the
/// parent (and ultimately the workspace session) cannot be written to or
/// closed while the child is still open.
#[derive(Debug)]
pub struct PackageWriter<'a> {
    pub(crate) scope: PathScope,
    pub(crate) mode: Mode,
    pub(crate) markers: Rc<Markers>,
    files_written: usize,
    needs_close: bool,
    _parent: PhantomData<&'a mut ()>,
}

impl PackageWriter<'static> {
    /// Writer for the workspace root. The session finalises it, not `close`.
    pub(crate) fn root(scope: PathScope, mode: Mode, markers: Rc<Markers>) -> Self {
        PackageWriter::from_parts(scope, mode, markers, false)
    }
}

impl<'a> PackageWriter<'a> {
    fn from_parts(scope: PathScope, mode: Mode, markers: Rc<Markers>, needs_close: bool) -> Self {
        PackageWriter {
            scope,
            mode,
            markers,
            files_written: 0,
            needs_close,
            _parent: PhantomData,
        }
    }

    /// Absolute directory of this package.
    pub fn dir(&self) -> &Path {
        self.scope.dir()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of files written through this writer (not its sub-packages).
    pub fn files_written(&self) -> usize {
        self.files_written
    }

    pub fn package_ref(&self) -> PackageRef {
        PackageRef::new(self.scope.package_name())
    }

    /// Label of `target` in this package, e.g. `//libs:core`.
    pub fn label(&self, target: &str) -> String {
        self.package_ref().label(target)
    }

    /// Write `contents` to `rel` (relative to this package) and return the
    /// absolute path written.
    ///
    /// Create mode fails with `AlreadyExists` on collisions; modify mode
    /// replaces the old file.
    pub fn write_file<C: AsRef<[u8]>>(&mut self, rel: &str, contents: C) -> Result<PathBuf> {
        let target = self.scope.locate(rel)?;
        if target == self.scope.dir() {
            return Err(WorkspaceError::invalid(
                target,
                "a file cannot be written at the package directory itself",
            ));
        }
        self.mode
            .check_target(&self.markers, self.scope.relative_to_root(&target))?;

        let target = self.scope.resolve(rel)?;
        self.mode.write(&target, contents.as_ref())?;
        self.files_written += 1;
        debug!("wrote {} ({:?})", target.display(), self.mode);
        Ok(target)
    }

    /// Render a file into a buffer with `render` and write it to `rel`.
    pub fn write_with<F>(&mut self, rel: &str, render: F) -> Result<PathBuf>
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        render(&mut buf)?;
        self.write_file(rel, buf)
    }

    /// Start a nested package at `rel` below this one. The caller must
    /// [`close`](PackageWriter::close) it; prefer [`package`](PackageWriter::package).
    /// This writer stays borrowed until the child is closed or dropped.
    pub fn open_package(&mut self, rel: &str) -> Result<PackageWriter<'_>> {
        let scope = self.scope.descend(rel)?;
        if scope.dir() == self.scope.dir() || !scope.dir().starts_with(self.scope.dir()) {
            return Err(WorkspaceError::invalid(
                scope.dir(),
                "a nested package must be a subdirectory of its parent",
            ));
        }
        self.mode.check_target(&self.markers, scope.relative_dir())?;
        debug!("opened package //{}", scope.package_name());
        Ok(PackageWriter::from_parts(scope, self.mode, Rc::clone(&self.markers), true))
    }

    /// Declare a nested package, fill it with `build`, then close it.
    ///
    /// If `build` fails the error is returned as-is and the package is not
    /// finalised.
    pub fn package<F>(&mut self, rel: &str, build: F) -> Result<PackageRef>
    where
        F: FnOnce(&mut PackageWriter<'_>) -> Result<()>,
    {
        let mut child = self.open_package(rel)?;
        if let Err(e) = build(&mut child) {
            // the caller sees the error; no marker and no drop warning
            child.needs_close = false;
            return Err(e);
        }
        child.close()
    }

    /// Finish the package, writing a default build marker when none exists.
    pub fn close(mut self) -> Result<PackageRef> {
        self.needs_close = false;
        if !self.markers.has_build_marker(self.scope.dir()) {
            let marker = self.scope.resolve(self.markers.build_file())?;
            self.mode
                .write(&marker, self.markers.build_contents.as_bytes())?;
            debug!("synthesised {}", marker.display());
        }
        let pkg = self.package_ref();
        debug!("closed package {} ({} files)", pkg, self.files_written);
        Ok(pkg)
    }
}

impl Drop for PackageWriter<'_> {
    fn drop(&mut self) {
        if self.needs_close && !std::thread::panicking() {
            warn!(
                "package //{} dropped without close; its build marker was not written",
                self.scope.package_name()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn writer(root: &Path, mode: Mode) -> PackageWriter<'static> {
        let scope = PathScope::new(root).unwrap();
        PackageWriter::root(scope, mode, Rc::new(Markers::default()))
    }

    #[test]
    fn nested_package_gets_build_marker() {
        let td = tempdir().unwrap();
        let mut root = writer(td.path(), Mode::Create);
        let pkg = root
            .package("libs", |p| {
                p.write_file("lib.rs", "pub fn f() {}\n")?;
                Ok(())
            })
            .unwrap();
        assert_eq!(pkg.label("libs"), "//libs:libs");
        assert!(td.path().join("libs/lib.rs").is_file());
        assert!(td.path().join("libs/BUILD.bazel").is_file());
    }

    #[test]
    fn declared_build_marker_is_kept() {
        let td = tempdir().unwrap();
        let mut root = writer(td.path(), Mode::Create);
        root.package("app", |p| {
            p.write_file("BUILD", "# custom\n")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(fs::read_to_string(td.path().join("app/BUILD")).unwrap(), "# custom\n");
        assert!(!td.path().join("app/BUILD.bazel").exists());
    }

    #[test]
    fn package_is_lazy_until_written() {
        let td = tempdir().unwrap();
        let mut root = writer(td.path(), Mode::Create);
        let pkg = root.open_package("later").unwrap();
        assert!(!td.path().join("later").exists());
        pkg.close().unwrap();
        assert!(td.path().join("later/BUILD.bazel").is_file());
    }

    #[test]
    fn failed_build_skips_finalisation() {
        let td = tempdir().unwrap();
        let mut root = writer(td.path(), Mode::Create);
        let err = root
            .package("broken", |p| {
                p.write_file("a.txt", "a")?;
                p.write_file("a.txt", "b")?;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, WorkspaceError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(td.path().join("broken/a.txt")).unwrap(), "a");
        assert!(!td.path().join("broken/BUILD.bazel").exists());
    }

    #[test]
    fn package_must_be_below_parent() {
        let td = tempdir().unwrap();
        let mut root = writer(td.path(), Mode::Create);
        let mut child = root.open_package("a").unwrap();
        assert!(matches!(
            child.open_package("../b").unwrap_err(),
            WorkspaceError::InvalidOperation { .. }
        ));
        child.close().unwrap();
        assert!(matches!(
            root.open_package(".").unwrap_err(),
            WorkspaceError::InvalidOperation { .. }
        ));
        assert!(matches!(
            root.write_file("", "x").unwrap_err(),
            WorkspaceError::InvalidOperation { .. }
        ));
    }

    #[test]
    fn write_with_renders_into_buffer() {
        use std::io::Write;
        let td = tempdir().unwrap();
        let mut root = writer(td.path(), Mode::Create);
        let p = root
            .write_with("gen/out.txt", |buf| {
                writeln!(buf, "line one")?;
                writeln!(buf, "line two")
            })
            .unwrap();
        assert_eq!(fs::read_to_string(p).unwrap(), "line one\nline two\n");
        assert_eq!(root.files_written(), 1);
    }

    #[test]
    fn nested_writers_close_innermost_first() {
        let td = tempdir().unwrap();
        let mut root = writer(td.path(), Mode::Create);
        let mut outer = root.open_package("outer").unwrap();
        let mut inner = outer.open_package("inner").unwrap();
        inner.write_file("x.txt", "x").unwrap();
        assert_eq!(inner.close().unwrap().to_string(), "//outer/inner");
        outer.write_file("y.txt", "y").unwrap();
        outer.close().unwrap();
        root.write_file("z.txt", "z").unwrap();

        assert!(td.path().join("outer/inner/BUILD.bazel").is_file());
        assert!(td.path().join("outer/BUILD.bazel").is_file());
    }

    #[test]
    fn dropped_package_is_not_finalised() {
        let td = tempdir().unwrap();
        let mut root = writer(td.path(), Mode::Create);
        {
            let mut pkg = root.open_package("abandoned").unwrap();
            pkg.write_file("a.txt", "a").unwrap();
        }
        // the parent is usable again once the child is gone
        root.write_file("after.txt", "b").unwrap();
        assert!(td.path().join("abandoned/a.txt").is_file());
        assert!(!td.path().join("abandoned/BUILD.bazel").exists());
    }
}
