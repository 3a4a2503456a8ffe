//! Declarative fixture layouts.
//!
//! A layout is a TOML document listing files and nested packages:
//!
//! ```toml
//! [markers]
//! build_files = ["BUILD"]
//!
//! [files]
//! "WORKSPACE" = 'workspace(name = "demo")'
//!
//! [packages.libs.files]
//! "lib.go" = "package libs\n"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::Result;
use crate::workspace::{Markers, PackageWriter};

/// Files and nested packages of one package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    pub files: BTreeMap<String, String>,
    pub packages: BTreeMap<String, Layout>,
}

impl Layout {
    /// Write this layout into `pkg`: files first, then each nested package,
    /// in name order.
    pub fn apply(&self, pkg: &mut PackageWriter<'_>) -> Result<()> {
        for (rel, contents) in &self.files {
            pkg.write_file(rel, contents)?;
        }
        for (rel, sub) in &self.packages {
            pkg.package(rel, |child| sub.apply(child))?;
        }
        Ok(())
    }

    /// Number of files declared here and in every nested package.
    pub fn file_count(&self) -> usize {
        self.files.len() + self.packages.values().map(Layout::file_count).sum::<usize>()
    }
}

/// A full fixture document: marker configuration plus the root layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "FixtureDocument")]
pub struct FixtureConfig {
    pub markers: Markers,
    pub layout: Layout,
}

// On-disk shape: the root layout's tables sit next to `[markers]`.
#[derive(Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FixtureDocument {
    markers: Markers,
    files: BTreeMap<String, String>,
    packages: BTreeMap<String, Layout>,
}

impl From<FixtureDocument> for FixtureConfig {
    fn from(doc: FixtureDocument) -> Self {
        FixtureConfig {
            markers: doc.markers,
            layout: Layout {
                files: doc.files,
                packages: doc.packages,
            },
        }
    }
}

impl FixtureConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
