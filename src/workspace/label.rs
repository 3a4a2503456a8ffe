use std::fmt;

/// Handle to a declared package, used to build target labels that other
/// generated files can refer to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageRef {
    path: String,
}

impl PackageRef {
    /// `path` is `/`-separated and relative to the workspace root; empty for
    /// the root package.
    pub fn new(path: impl Into<String>) -> Self {
        PackageRef { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Fully-qualified label of `target` in this package: `//a/b:t`.
    pub fn label(&self, target: &str) -> String {
        format!("//{}:{}", self.path, target)
    }
}

impl fmt::Display for PackageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "//{}", self.path)
    }
}
