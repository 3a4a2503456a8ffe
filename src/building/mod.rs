//! Helpers used by the `make_fakews` binary and tests: declarative layouts
//! and tree manifests.

pub mod layout;
pub mod manifest;

pub use layout::{FixtureConfig, Layout};
pub use manifest::{snapshot, write_manifest, EntryKind, TreeEntry};
