//! Immutable triangle meshes

use custom_debug::Debug;
use glam::Vec3;
use log::{debug, warn};
use painticle_utils::debug::trimmed_collection_fmt;
use painticle_utils::{Id, StridedView, Vec3Source, ViewError};

use crate::bounds::Aabb;
use crate::error::{GeometryError, Result};
use crate::triangle::apply_barycentrics;

/// Triangle mesh with optional per-corner normals
///
/// Normals are stored per triangle corner, so a mesh either has no normals or
/// exactly `3 * triangle_count()` of them. The mesh never changes after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    #[debug(with = trimmed_collection_fmt)]
    points: Vec<Vec3>,
    #[debug(with = trimmed_collection_fmt)]
    triangles: Vec<[Id; 3]>,
    #[debug(with = trimmed_collection_fmt)]
    normals: Vec<Vec3>,
}

impl TriangleMesh {
    /// Create a mesh from points, index triples and per-corner normals
    ///
    /// # Panics
    ///
    /// Panics if `normals` is neither empty nor `3 * triangles.len()` long.
    pub fn new(points: Vec<Vec3>, triangles: Vec<[Id; 3]>, normals: Vec<Vec3>) -> Self {
        assert!(
            normals.is_empty() || normals.len() == 3 * triangles.len(),
            "mesh with {} triangles needs 0 or {} corner normals, got {}",
            triangles.len(),
            3 * triangles.len(),
            normals.len()
        );

        if triangles.is_empty() {
            warn!("Building mesh without triangles, every query will miss");
        }

        debug!(
            "Created mesh: {} points, {} triangles, normals: {}",
            points.len(),
            triangles.len(),
            !normals.is_empty()
        );

        Self {
            points,
            triangles,
            normals,
        }
    }

    /// Create a mesh from flat host buffers
    ///
    /// `points` and `normals` hold 3 floats per element and `triangles` 3
    /// indices per triangle. Shapes and index ranges are validated here; the
    /// normal count invariant is asserted as in [`TriangleMesh::new`].
    pub fn from_flat(points: &[f32], triangles: &[u32], normals: &[f32]) -> Result<Self> {
        let points = StridedView::from_flat_named("points", points)?.to_vec3s();
        let normals = StridedView::from_flat_named("normals", normals)?.to_vec3s();

        if triangles.len() % 3 != 0 {
            return Err(ViewError::NotMultipleOfThree {
                what: "triangles",
                len: triangles.len(),
            }
            .into());
        }

        let triangles: Vec<[Id; 3]> = triangles
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
            .collect();

        if let Some((index, tri)) = triangles
            .iter()
            .enumerate()
            .find(|(_, tri)| tri.iter().any(|&v| v as usize >= points.len()))
        {
            return Err(GeometryError::InvalidArgument(format!(
                "triangle {index} references vertex {:?} but the mesh has {} points",
                tri,
                points.len()
            )));
        }

        Ok(Self::new(points, triangles, normals))
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn has_normals(&self) -> bool {
        !self.normals.is_empty()
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn triangles(&self) -> &[[Id; 3]] {
        &self.triangles
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Position of corner `corner` (0..3) of triangle `tri`
    #[inline]
    pub fn point(&self, tri: Id, corner: usize) -> Vec3 {
        assert!(corner < 3, "triangle corner {corner} out of range");
        self.points[self.triangles[tri as usize][corner] as usize]
    }

    /// Normal stored for corner `corner` (0..3) of triangle `tri`
    ///
    /// # Panics
    ///
    /// Panics if the corner is out of range or the mesh has no normals.
    #[inline]
    pub fn normal(&self, tri: Id, corner: usize) -> Vec3 {
        assert!(corner < 3, "triangle corner {corner} out of range");
        assert!(self.has_normals(), "mesh has no normals");
        self.normals[3 * tri as usize + corner]
    }

    /// The three corner positions of triangle `tri`
    #[inline]
    pub fn corners(&self, tri: Id) -> (Vec3, Vec3, Vec3) {
        (self.point(tri, 0), self.point(tri, 1), self.point(tri, 2))
    }

    /// Unit normal at `barycentrics` on triangle `tri`, zero without normals
    pub fn interpolate_normal(&self, tri: Id, barycentrics: Vec3) -> Vec3 {
        if !self.has_normals() {
            return Vec3::ZERO;
        }

        apply_barycentrics(
            barycentrics,
            self.normal(tri, 0),
            self.normal(tri, 1),
            self.normal(tri, 2),
        )
        .normalize()
    }

    /// Bounds of all points, `None` for a mesh without points
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.points.iter().copied())
    }

    /// Bounds of triangle `tri`
    pub fn triangle_bounds(&self, tri: Id) -> Aabb {
        let (a, b, c) = self.corners(tri);
        Aabb::from_triangle(a, b, c)
    }
}
