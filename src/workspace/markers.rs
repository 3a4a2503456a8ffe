use std::ffi::OsStr;
use std::path::{Component, Path};

use serde::Deserialize;

/// Names and default contents of the marker files a build tool uses to
/// recognise a workspace root and its packages.
///
/// The first name in each list is the one synthesised when a session closes
/// without one; any name in the list counts as already present.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Markers {
    pub workspace_files: Vec<String>,
    pub build_files: Vec<String>,
    pub workspace_contents: String,
    pub build_contents: String,
}

impl Default for Markers {
    fn default() -> Self {
        Markers {
            workspace_files: vec!["WORKSPACE".into(), "WORKSPACE.bazel".into()],
            build_files: vec!["BUILD.bazel".into(), "BUILD".into()],
            workspace_contents: String::new(),
            build_contents: String::new(),
        }
    }
}

impl Markers {
    /// File name written when a workspace marker must be synthesised.
    pub fn workspace_file(&self) -> &str {
        self.workspace_names().next().unwrap_or("WORKSPACE")
    }

    /// File name written when a package build marker must be synthesised.
    pub fn build_file(&self) -> &str {
        self.build_names().next().unwrap_or("BUILD.bazel")
    }

    fn workspace_names(&self) -> impl Iterator<Item = &str> {
        names_or(&self.workspace_files, "WORKSPACE")
    }

    fn build_names(&self) -> impl Iterator<Item = &str> {
        names_or(&self.build_files, "BUILD.bazel")
    }

    /// True when `rel` (relative to the workspace root) is a workspace marker
    /// or lies below a root-level entry carrying a workspace marker name.
    pub fn targets_workspace_marker(&self, rel: &Path) -> bool {
        match rel.components().next() {
            Some(Component::Normal(first)) => {
                self.workspace_names().any(|w| first == OsStr::new(w))
            }
            _ => false,
        }
    }

    pub fn has_workspace_marker(&self, dir: &Path) -> bool {
        self.workspace_names().any(|name| dir.join(name).is_file())
    }

    pub fn has_build_marker(&self, dir: &Path) -> bool {
        self.build_names().any(|name| dir.join(name).is_file())
    }
}

// An empty list in a config file means "use the stock name".
fn names_or<'a>(names: &'a [String], fallback: &'a str) -> impl Iterator<Item = &'a str> {
    let fallback = names.is_empty().then_some(fallback);
    names.iter().map(String::as_str).chain(fallback)
}
