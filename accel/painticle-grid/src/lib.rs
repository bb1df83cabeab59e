//! Spatial hash grid for the PAINTicle acceleration core.
//!
//! [`HashedGrid`] turns an unordered point set into a bucket index with O(1)
//! average lookup. It only builds the index: walking neighbor buckets and
//! resolving forces is left to the consumer, which reads the flat
//! [`sorted_particle_ids`](HashedGrid::sorted_particle_ids) and
//! [`cell_offsets`](HashedGrid::cell_offsets) tables directly or through
//! [`HashedGrid::bucket`].
//!
//! # Examples
//!
//! ```rust
//! use glam::Vec3;
//! use painticle_grid::HashedGrid;
//!
//! let mut grid = HashedGrid::new(1.0);
//! grid.build(&vec![Vec3::ZERO, Vec3::splat(0.5), Vec3::splat(4.0)]);
//!
//! let bucket = grid.bucket_at(Vec3::splat(0.25));
//! let ids: Vec<u32> = bucket.iter().map(|r| r.particle_id).collect();
//! assert_eq!(ids, [0, 1]);
//! ```

pub mod error;
pub mod grid;

pub use error::{GridError, Result};
pub use grid::{BucketStats, HashedGrid, IdRelation, NUM_HASHED_GRID_ENTRIES, hash_grid};
