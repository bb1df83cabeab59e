//! Shared glue for the PAINTicle acceleration core.
//!
//! This crate holds the pieces every core crate leans on:
//!
//! - [`Id`] and the [`ID_NONE`] sentinel used for triangle and particle ids
//! - read-only views over caller-owned buffers ([`StridedView`], [`Vec3Source`])
//! - the parallel-for executor ([`parallel`]) and its [`ParallelOptions`]
//! - trimmed `Debug` formatting for very large collections ([`debug`])
//!
//! # Examples
//!
//! ```rust
//! use painticle_utils::{StridedView, Vec3Source};
//!
//! // Two points packed as a flat host buffer
//! let flat = [0.0, 0.0, 0.0, 1.0, 2.0, 3.0];
//! let view = StridedView::from_flat(&flat).unwrap();
//!
//! assert_eq!(view.len(), 2);
//! assert_eq!(view.vec3(1).to_array(), [1.0, 2.0, 3.0]);
//! ```

pub mod debug;
pub mod error;
pub mod parallel;
pub mod view;

pub use error::{PoolError, Result, ViewError};
pub use parallel::{ParallelOptions, fill_parallel, map_parallel};
pub use view::{StridedView, Vec3Source, ensure_same_len};

/// Index type for triangles, particles and grid buckets
pub type Id = u32;

/// Reserved all-bits-set id meaning "no match" or "empty"
pub const ID_NONE: Id = Id::MAX;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
