use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

use crate::errors::{Result, WorkspaceError};

/// A directory inside a workspace that can turn caller-supplied relative
/// paths into absolute ones without ever leaving the workspace root.
///
/// Every scope derived from another (see [`PathScope::descend`]) shares the
/// same workspace root, which is what containment is checked against.
#[derive(Debug, Clone)]
pub struct PathScope {
    root: Rc<Path>,
    dir: PathBuf,
}

impl PathScope {
    /// Create a scope for the existing directory `root`.
    ///
    /// The root is canonicalised once so that prefix checks are not fooled by
    /// symlinked temp directories (`/var` vs `/private/var` on macOS).
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().canonicalize()?;
        if !root.is_dir() {
            return Err(WorkspaceError::invalid(root, "workspace root is not a directory"));
        }
        Ok(PathScope {
            dir: root.clone(),
            root: Rc::from(root),
        })
    }

    /// The workspace root every scope in this family is confined to.
    pub fn workspace_root(&self) -> &Path {
        &self.root
    }

    /// Absolute directory this scope resolves relative paths against.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// True when this scope is the workspace root itself.
    pub fn is_root(&self) -> bool {
        *self.dir == *self.root
    }

    /// Directory of this scope relative to the workspace root.
    pub fn relative_dir(&self) -> &Path {
        self.dir.strip_prefix(&*self.root).unwrap_or(Path::new(""))
    }

    /// `/`-separated package path of this scope; empty for the root.
    pub fn package_name(&self) -> String {
        slash_path(self.relative_dir())
    }

    /// Resolve `rel` against this scope without touching the filesystem.
    ///
    /// Fails with `ContainmentViolation` unless the result is the workspace
    /// root or lies beneath it.
    pub fn locate(&self, rel: &str) -> Result<PathBuf> {
        let candidate = normalize(&self.dir.join(rel));
        if candidate == *self.root || candidate.starts_with(&*self.root) {
            Ok(candidate)
        } else {
            Err(WorkspaceError::ContainmentViolation {
                root: self.root.to_path_buf(),
                path: candidate,
            })
        }
    }

    /// Like [`PathScope::locate`], and also creates any missing parent
    /// directories of the resolved path.
    pub fn resolve(&self, rel: &str) -> Result<PathBuf> {
        let target = self.locate(rel)?;
        crate::fs_op::helpers::ensure_parent_exists(&target)?;
        Ok(target)
    }

    /// Derive a scope rooted at `rel` under this one. Nothing is created on
    /// disk until a file is written under the new scope.
    pub fn descend(&self, rel: &str) -> Result<PathScope> {
        let dir = self.locate(rel)?;
        Ok(PathScope {
            root: Rc::clone(&self.root),
            dir,
        })
    }

    /// Path of `abs` relative to the workspace root.
    pub fn relative_to_root<'a>(&self, abs: &'a Path) -> &'a Path {
        abs.strip_prefix(&*self.root).unwrap_or(abs)
    }
}

/// Lexically normalise `path`: `.` is dropped and `..` removes the previous
/// component. Symlinks are not followed.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Render a relative path with `/` separators regardless of platform.
pub fn slash_path(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
