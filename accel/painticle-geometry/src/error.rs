use painticle_utils::ViewError;
use thiserror::Error;

/// Error types for mesh construction and batch geometry queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// A caller-supplied argument does not satisfy the query contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A flat input buffer has the wrong shape
    #[error(transparent)]
    View(#[from] ViewError),
}

/// Result type using GeometryError
pub type Result<T> = std::result::Result<T, GeometryError>;
