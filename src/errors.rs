use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while resolving paths or writing a fixture workspace.
///
/// None of these are retried. A test that hits one is expected to fail.
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// A requested path resolved outside of the workspace root.
    #[error("path `{}` escapes workspace root `{}`", .path.display(), .root.display())]
    ContainmentViolation { root: PathBuf, path: PathBuf },

    /// A file was written twice while creating a fresh workspace.
    #[error("already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    /// The request is not allowed for the current session.
    #[error("invalid operation on `{}`: {msg}", .path.display())]
    InvalidOperation { path: PathBuf, msg: String },

    /// Wrapper for underlying IO errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A layout or marker configuration document could not be parsed.
    #[error("invalid fixture config: {0}")]
    Config(#[from] toml::de::Error),
}

impl WorkspaceError {
    pub(crate) fn invalid(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        WorkspaceError::InvalidOperation {
            path: path.into(),
            msg: msg.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WorkspaceError>;
