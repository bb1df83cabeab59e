use glam::Vec3;
use painticle_utils::{ID_NONE, Id};

/// Result of a closest-point or ray query
///
/// The layout is fixed so that slices of results can be handed to hosts as
/// flat buffers: 3 floats location, 3 floats normal, a `u32` triangle index
/// and 3 floats barycentrics.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceInfo {
    /// Point on the surface
    pub location: Vec3,
    /// Interpolated unit normal, zero without a hit or without mesh normals
    pub normal: Vec3,
    /// Triangle the point lies on, [`ID_NONE`] for "no hit"
    pub tri_index: Id,
    /// Weights of the triangle corners, summing to 1 on a hit
    pub barycentrics: Vec3,
}

impl SurfaceInfo {
    /// The "no hit" record: zero vectors and a sentinel triangle index
    pub const NONE: Self = Self {
        location: Vec3::ZERO,
        normal: Vec3::ZERO,
        tri_index: ID_NONE,
        barycentrics: Vec3::ZERO,
    };

    #[inline]
    pub fn is_hit(&self) -> bool {
        self.tri_index != ID_NONE
    }
}

impl Default for SurfaceInfo {
    fn default() -> Self {
        Self::NONE
    }
}
