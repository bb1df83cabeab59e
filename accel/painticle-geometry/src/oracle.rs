//! Closest-point and ray queries against one mesh

use glam::{Mat4, Vec3};
use log::{debug, trace};
use painticle_utils::{ID_NONE, Vec3Source, ensure_same_len, fill_parallel};

use crate::engine::{AabbTree, AccelerationEngine, PointQuery, Ray};
use crate::error::Result;
use crate::mesh::TriangleMesh;
use crate::surface::SurfaceInfo;
use crate::triangle::{apply_barycentrics, closest_point_barycentric};

/// Answers proximity and ray queries for an immutable triangle mesh
///
/// The oracle owns its mesh and the engine built over it. All queries take
/// `&self`, so one oracle can serve any number of threads at once.
#[derive(Debug)]
pub struct GeometryOracle<E: AccelerationEngine = AabbTree> {
    mesh: TriangleMesh,
    engine: E,
}

impl GeometryOracle<AabbTree> {
    /// Build an oracle with the bundled AABB tree engine
    pub fn new(mesh: TriangleMesh) -> Self {
        Self::with_engine(mesh)
    }

    /// Build an oracle from flat host buffers
    pub fn from_flat(points: &[f32], triangles: &[u32], normals: &[f32]) -> Result<Self> {
        Ok(Self::new(TriangleMesh::from_flat(points, triangles, normals)?))
    }
}

impl<E: AccelerationEngine> GeometryOracle<E> {
    /// Build an oracle with engine `E`
    pub fn with_engine(mesh: TriangleMesh) -> Self {
        let engine = E::build(&mesh);
        debug!(
            "Geometry oracle ready: {} triangles, {} points",
            mesh.triangle_count(),
            mesh.point_count()
        );
        Self { mesh, engine }
    }

    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Nearest point on the mesh surface
    ///
    /// The search starts unbounded and shrinks its radius each time a
    /// strictly closer triangle is found. Returns [`SurfaceInfo::NONE`] only
    /// for a mesh without triangles.
    pub fn closest_point(&self, point: Vec3) -> SurfaceInfo {
        let mut query = PointQuery::unbounded(point);
        let mut best = SurfaceInfo::NONE;

        self.engine.point_query(&mut query, |query, tri| {
            let (a, b, c) = self.mesh.corners(tri);
            let barycentrics = closest_point_barycentric(query.point, a, b, c);
            let closest = apply_barycentrics(barycentrics, a, b, c);
            let distance = closest.distance(query.point);

            if distance < query.radius {
                query.radius = distance;
                best.location = closest;
                best.barycentrics = barycentrics;
                best.tri_index = tri;
                true
            } else {
                false
            }
        });

        if best.tri_index != ID_NONE {
            best.normal = self.mesh.interpolate_normal(best.tri_index, best.barycentrics);
        }
        best
    }

    /// [`closest_point`](Self::closest_point) for every point, in parallel
    ///
    /// `results` must be exactly as long as `points`; nothing is written
    /// otherwise.
    pub fn closest_points<S>(&self, points: &S, results: &mut [SurfaceInfo]) -> Result<()>
    where
        S: Vec3Source + ?Sized,
    {
        ensure_same_len("points", points.len(), "results", results.len())?;
        trace!("Closest point batch of {}", points.len());

        fill_parallel(results, |i| self.closest_point(points.vec3(i)));
        Ok(())
    }

    /// Allocating variant of [`closest_points`](Self::closest_points)
    pub fn closest_points_vec<S>(&self, points: &S) -> Vec<SurfaceInfo>
    where
        S: Vec3Source + ?Sized,
    {
        let mut results = vec![SurfaceInfo::NONE; points.len()];
        fill_parallel(&mut results, |i| self.closest_point(points.vec3(i)));
        results
    }

    /// Cast one ray in mesh-local space
    ///
    /// On a hit the location is `origin + t * direction` for the engine's hit
    /// distance and the barycentrics are `(1 - u - v, u, v)`.
    pub fn shoot_ray(&self, origin: Vec3, direction: Vec3) -> SurfaceInfo {
        let ray = Ray::new(origin, direction);

        match self.engine.intersect(&self.mesh, &ray) {
            Some(hit) => {
                let barycentrics = Vec3::new(1.0 - hit.u - hit.v, hit.u, hit.v);
                SurfaceInfo {
                    location: ray.at(hit.t),
                    normal: self.mesh.interpolate_normal(hit.primitive, barycentrics),
                    tri_index: hit.primitive,
                    barycentrics,
                }
            }
            None => SurfaceInfo::NONE,
        }
    }

    /// Cast many rays in parallel
    ///
    /// Each origin is mapped by the affine `to_object` transform as a point and
    /// each direction as a vector (no translation) before casting. All three
    /// slices must have the same length; nothing is cast otherwise.
    pub fn shoot_rays<O, D>(
        &self,
        origins: &O,
        directions: &D,
        to_object: &Mat4,
        results: &mut [SurfaceInfo],
    ) -> Result<()>
    where
        O: Vec3Source + ?Sized,
        D: Vec3Source + ?Sized,
    {
        ensure_same_len("origins", origins.len(), "directions", directions.len())?;
        ensure_same_len("origins", origins.len(), "results", results.len())?;
        trace!("Ray batch of {}", origins.len());

        fill_parallel(results, |i| {
            let origin = to_object.transform_point3(origins.vec3(i));
            let direction = to_object.transform_vector3(directions.vec3(i));
            self.shoot_ray(origin, direction)
        });
        Ok(())
    }

    /// Allocating variant of [`shoot_rays`](Self::shoot_rays)
    pub fn shoot_rays_vec<O, D>(
        &self,
        origins: &O,
        directions: &D,
        to_object: &Mat4,
    ) -> Result<Vec<SurfaceInfo>>
    where
        O: Vec3Source + ?Sized,
        D: Vec3Source + ?Sized,
    {
        let mut results = vec![SurfaceInfo::NONE; origins.len()];
        self.shoot_rays(origins, directions, to_object, &mut results)?;
        Ok(results)
    }
}
