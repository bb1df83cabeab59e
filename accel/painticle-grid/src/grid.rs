//! Hashed uniform grid
//!
//! Points are binned into cubic voxels, each voxel is hashed into one of
//! [`NUM_HASHED_GRID_ENTRIES`] buckets, and the `(particle, bucket)` pairs
//! are sorted by bucket. An offset table then maps every bucket to the first
//! sorted entry carrying it, so a bucket's members are one contiguous run:
//!
//! ```text
//! sorted:   [(p3, 7) (p0, 7) (p1, 12) (p2, 40) ...]
//! offsets:  [.., 7 -> 0, .., 12 -> 2, .., 40 -> 3, ..]   (others: ID_NONE)
//! ```
//!
//! Distinct voxels may share a bucket; the grid does not tell them apart.

use custom_debug::Debug;
use glam::{IVec3, Vec3};
use log::{debug, trace, warn};
use painticle_utils::debug::trimmed_collection_fmt;
use painticle_utils::{ID_NONE, Id, StridedView, Vec3Source, fill_parallel};

use crate::error::{GridError, Result};

/// Number of hash buckets, fixed so memory does not depend on the point count
pub const NUM_HASHED_GRID_ENTRIES: u32 = 1_000_000;

// Chosen so that mirrored neighbor cells such as (-1, -1, 1) and (-1, 1, -1)
// land in different buckets. Only P3 is odd; the values are kept as they are so
// bucket ids match grids built by the PAINTicle add-on.
const P1: u32 = 917_935_420;
const P2: u32 = 659_095_552;
const P3: u32 = 698_673_843;

/// A particle id paired with the bucket its position hashes to
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdRelation {
    pub cell_id: Id,
    pub particle_id: Id,
}

/// Bucket occupancy of a built grid
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketStats {
    /// Number of hashed particles
    pub particles: usize,
    /// Buckets holding at least one particle
    pub populated: usize,
    /// Particles in the fullest bucket
    pub largest: usize,
    /// Mean particles per populated bucket
    pub mean: f64,
}

/// Voxel containing `position`
#[inline]
fn voxel_coord(voxel_size: f32, position: Vec3) -> IVec3 {
    (position / voxel_size).floor().as_ivec3()
}

/// Bucket of a voxel coordinate
#[inline]
pub fn hash_grid(coord: IVec3) -> u32 {
    let n = P1.wrapping_mul(coord.x as u32)
        ^ P2.wrapping_mul(coord.y as u32)
        ^ P3.wrapping_mul(coord.z as u32);
    n % NUM_HASHED_GRID_ENTRIES
}

fn is_valid_voxel_size(voxel_size: f32) -> bool {
    voxel_size.is_finite() && voxel_size > 0.0
}

/// Spatial hash grid over a point set, rebuilt from scratch on every build
#[derive(Debug, Clone)]
pub struct HashedGrid {
    #[debug(with = trimmed_collection_fmt)]
    sorted_particle_ids: Vec<IdRelation>,
    #[debug(with = trimmed_collection_fmt)]
    cell_offsets: Vec<Id>,
    voxel_size: f32,
}

impl HashedGrid {
    /// Create an empty grid
    ///
    /// A voxel size that is not positive and finite is accepted but makes
    /// every coordinate degenerate; use [`HashedGrid::try_new`] to reject it.
    pub fn new(voxel_size: f32) -> Self {
        if !is_valid_voxel_size(voxel_size) {
            warn!("Hashed grid created with degenerate voxel size {voxel_size}");
        }

        Self {
            sorted_particle_ids: Vec::new(),
            cell_offsets: vec![ID_NONE; NUM_HASHED_GRID_ENTRIES as usize],
            voxel_size,
        }
    }

    /// Create an empty grid, rejecting degenerate voxel sizes
    pub fn try_new(voxel_size: f32) -> Result<Self> {
        if !is_valid_voxel_size(voxel_size) {
            return Err(GridError::InvalidVoxelSize(voxel_size));
        }
        Ok(Self::new(voxel_size))
    }

    pub fn voxel_size(&self) -> f32 {
        self.voxel_size
    }

    /// Change the voxel size used by the next [`build`](Self::build)
    ///
    /// The current contents are left untouched.
    pub fn set_voxel_size(&mut self, voxel_size: f32) {
        if !is_valid_voxel_size(voxel_size) {
            warn!("Hashed grid voxel size set to degenerate value {voxel_size}");
        }
        self.voxel_size = voxel_size;
    }

    /// Number of particles hashed by the last build
    pub fn num_particles(&self) -> usize {
        self.sorted_particle_ids.len()
    }

    /// Voxel containing `position`
    #[inline]
    pub fn grid_coord(&self, position: Vec3) -> IVec3 {
        voxel_coord(self.voxel_size, position)
    }

    /// Bucket of the voxel containing `position`
    #[inline]
    pub fn hash_coord(&self, position: Vec3) -> u32 {
        hash_grid(self.grid_coord(position))
    }

    /// Bucket of a voxel coordinate
    #[inline]
    pub fn hash_grid(&self, coord: IVec3) -> u32 {
        hash_grid(coord)
    }

    /// Rebuild the grid from `positions`, discarding previous contents
    ///
    /// Hashing runs on the worker pool; the sort is stable, so particles of
    /// one bucket keep ascending id order. The offset table is then filled
    /// sequentially.
    ///
    /// # Panics
    ///
    /// Panics if there are more positions than representable ids.
    pub fn build<S>(&mut self, positions: &S)
    where
        S: Vec3Source + ?Sized,
    {
        let count = positions.len();
        assert!(
            count < ID_NONE as usize,
            "cannot hash {count} particles, ids are limited to {ID_NONE}"
        );

        let voxel_size = self.voxel_size;
        self.sorted_particle_ids.resize(count, IdRelation::default());
        fill_parallel(&mut self.sorted_particle_ids, |i| IdRelation {
            cell_id: hash_grid(voxel_coord(voxel_size, positions.vec3(i))),
            particle_id: i as Id,
        });

        self.sorted_particle_ids.sort_by_key(|relation| relation.cell_id);
        self.fill_offsets();

        debug!(
            "Built hashed grid: {} particles, voxel size {}",
            count, voxel_size
        );
    }

    /// Rebuild from a flat `x y z x y z ...` buffer
    pub fn build_from_flat(&mut self, positions: &[f32]) -> Result<()> {
        let view = StridedView::from_flat_named("positions", positions)?;
        self.build(&view);
        Ok(())
    }

    /// Point every populated bucket at its first sorted entry, the rest at `ID_NONE`
    fn fill_offsets(&mut self) {
        self.cell_offsets.fill(ID_NONE);

        let mut previous = None;
        let mut populated = 0usize;
        for (index, relation) in self.sorted_particle_ids.iter().enumerate() {
            if previous != Some(relation.cell_id) {
                self.cell_offsets[relation.cell_id as usize] = index as Id;
                previous = Some(relation.cell_id);
                populated += 1;
            }
        }

        trace!("Offset table filled, {populated} populated buckets");
    }

    /// Drop all particles; every bucket reads as empty afterwards
    pub fn clear(&mut self) {
        self.sorted_particle_ids.clear();
        self.cell_offsets.fill(ID_NONE);
    }

    /// `(particle, bucket)` pairs sorted by bucket
    pub fn sorted_particle_ids(&self) -> &[IdRelation] {
        &self.sorted_particle_ids
    }

    /// First sorted index of every bucket, `ID_NONE` for empty buckets
    pub fn cell_offsets(&self) -> &[Id] {
        &self.cell_offsets
    }

    /// The sorted run of entries in bucket `hash`, empty if unpopulated
    pub fn bucket(&self, hash: u32) -> &[IdRelation] {
        let start = match self.cell_offsets.get(hash as usize) {
            Some(&offset) if offset != ID_NONE => offset as usize,
            _ => return &[],
        };

        let tail = &self.sorted_particle_ids[start..];
        let len = tail.partition_point(|relation| relation.cell_id <= hash);
        &tail[..len]
    }

    /// Entries sharing the bucket of `position`
    pub fn bucket_at(&self, position: Vec3) -> &[IdRelation] {
        self.bucket(self.hash_coord(position))
    }

    /// Occupancy summary, for judging hash collision quality
    pub fn bucket_stats(&self) -> BucketStats {
        let mut populated = 0usize;
        let mut largest = 0usize;
        let mut run = 0usize;
        let mut previous = None;

        for relation in &self.sorted_particle_ids {
            if previous == Some(relation.cell_id) {
                run += 1;
            } else {
                populated += 1;
                run = 1;
                previous = Some(relation.cell_id);
            }
            largest = largest.max(run);
        }

        let particles = self.sorted_particle_ids.len();
        BucketStats {
            particles,
            populated,
            largest,
            mean: if populated == 0 {
                0.0
            } else {
                particles as f64 / populated as f64
            },
        }
    }
}
