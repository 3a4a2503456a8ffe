//! Scoped writers that lay out a build-tool workspace on disk.
//!
//! A session is either a *create* session over a new, empty root or a
//! *modify* session over an existing workspace. Nested packages are opened
//! from their parent and get a build marker when they close; the workspace
//! marker is written when a create session closes.

pub mod label;
pub mod markers;
pub mod mode;
pub mod package;
pub mod writer;

pub use label::PackageRef;
pub use markers::Markers;
pub use mode::Mode;
pub use package::PackageWriter;
pub use writer::{with_existing_workspace, with_new_workspace, TempWorkspace, WorkspaceWriter};
