//! Filesystem primitives the workspace writer is built on.

pub mod create;
pub mod helpers;
pub mod metadata;
pub mod path;

pub use path::PathScope;
