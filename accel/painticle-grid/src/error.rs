use painticle_utils::ViewError;
use thiserror::Error;

/// Error types for hash grid construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// The position buffer has the wrong shape
    #[error(transparent)]
    View(#[from] ViewError),

    /// Voxel size is not a positive finite number
    #[error("Invalid voxel size {0}, expected a positive finite value")]
    InvalidVoxelSize(f32),
}

/// Result type using GridError
pub type Result<T> = std::result::Result<T, GridError>;
