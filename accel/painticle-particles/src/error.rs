use painticle_geometry::GeometryError;
use painticle_utils::ViewError;
use thiserror::Error;

/// Error types for particle store access and spawning
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParticleError {
    /// A caller-supplied argument does not satisfy the operation contract
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Data assigned to a field does not match the particle count
    #[error("Invalid number of values for field '{field}': expected {expected}, got {actual}")]
    FieldLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// No field with this name exists
    #[error("Unknown particle field '{0}'")]
    UnknownField(String),

    /// Ray casting against the mesh failed
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// An input buffer has the wrong shape
    #[error(transparent)]
    View(#[from] ViewError),
}

/// Result type using ParticleError
pub type Result<T> = std::result::Result<T, ParticleError>;
