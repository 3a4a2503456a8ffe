//! Generate build-tool workspaces on disk for integration tests.
//!
//! ```no_run
//! use fakews::workspace::with_new_workspace;
//!
//! let dir = tempfile::tempdir()?;
//! with_new_workspace(dir.path(), |ws| {
//!     let libs = ws.package("libs", |pkg| {
//!         pkg.write_file("lib.go", "package libs\n")?;
//!         Ok(())
//!     })?;
//!     ws.write_file("main.go", format!("// depends on {}\n", libs.label("libs")))?;
//!     Ok(())
//! })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod errors;
pub mod fs_op;
pub mod logging;
pub mod workspace;

// Layout files and manifests, shared by the make_fakews binary and tests
#[path = "building/mod.rs"]
pub mod building;

pub use crate::errors::{Result, WorkspaceError};
pub use crate::fs_op::PathScope;
pub use crate::workspace::{
    with_existing_workspace, with_new_workspace, Markers, Mode, PackageRef, PackageWriter,
    TempWorkspace, WorkspaceWriter,
};
