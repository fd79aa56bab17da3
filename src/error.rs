//! Tool error kinds
//!
//! Every handler failure is exactly one of three mutually exclusive kinds.
//! Validation failures are detected before any filesystem access and never
//! wrap an I/O error; permission failures are detected before the filesystem
//! effect that would have used the path.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// A required parameter is missing, empty, or of the wrong type.
    #[error("{0}")]
    Validation(String),

    /// The path authorizer denied a canonicalized path.
    #[error("{0}")]
    Permission(String),

    /// The filesystem failed after authorization passed.
    #[error("{0}")]
    Io(String),
}

impl ToolError {
    /// Stable kind identifier used on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::Validation(_) => "validation",
            ToolError::Permission(_) => "permission",
            ToolError::Io(_) => "io",
        }
    }
}
