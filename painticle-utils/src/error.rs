use thiserror::Error;

/// Errors raised while adapting caller buffers into views
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A flat buffer does not hold whole 3-component elements
    #[error("{what} buffer needs 3-dimensional elements, got {len} values")]
    NotMultipleOfThree { what: &'static str, len: usize },

    /// Two paired buffers differ in length
    #[error("{left} and {right} need to have the same size ({left_len} != {right_len})")]
    LengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    /// A strided view would read past the end of its buffer
    #[error("view of {len} elements with stride {stride} needs more than {available} values")]
    OutOfBounds {
        len: usize,
        stride: usize,
        available: usize,
    },

    /// The element stride is smaller than one element
    #[error("invalid stride {stride}, elements need at least 3 values")]
    InvalidStride { stride: usize },
}

/// Error raised when the worker pool cannot be configured
#[derive(Error, Debug)]
#[error("failed to configure thread pool: {0}")]
pub struct PoolError(pub String);

/// Result type using ViewError
pub type Result<T> = std::result::Result<T, ViewError>;
