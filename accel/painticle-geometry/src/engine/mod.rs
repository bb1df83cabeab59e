//! Acceleration engines driving ray and proximity queries
//!
//! The [`GeometryOracle`](crate::GeometryOracle) never walks a spatial index
//! itself. It hands rays and radius-bounded point queries to an
//! [`AccelerationEngine`] and receives candidates back through a visitor.
//! [`AabbTree`] is the engine bundled with this crate.

mod aabb_tree;

pub use aabb_tree::AabbTree;

use glam::Vec3;
use painticle_utils::Id;

use crate::mesh::TriangleMesh;

/// A ray `origin + t * direction` restricted to `t` in `[t_near, t_far]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub t_near: f32,
    pub t_far: f32,
}

impl Ray {
    /// Unbounded ray starting at `origin`
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            t_near: 0.0,
            t_far: f32::INFINITY,
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

/// Nearest hit reported by an engine
///
/// The hit point is `(1 - u - v) * a + u * b + v * c` on triangle `primitive`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub primitive: Id,
    pub t: f32,
    pub u: f32,
    pub v: f32,
}

/// A point query with a search radius the visitor may shrink
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointQuery {
    pub point: Vec3,
    pub radius: f32,
}

impl PointQuery {
    /// Query around `point` without a distance limit
    pub fn unbounded(point: Vec3) -> Self {
        Self {
            point,
            radius: f32::INFINITY,
        }
    }
}

/// A spatial index over the triangles of one mesh
///
/// Engines are built once per mesh and queried concurrently from many
/// threads.
pub trait AccelerationEngine: Send + Sync {
    /// Build the index for `mesh`
    fn build(mesh: &TriangleMesh) -> Self
    where
        Self: Sized;

    /// Nearest intersection of `ray` with `mesh` within the ray's range
    fn intersect(&self, mesh: &TriangleMesh, ray: &Ray) -> Option<RayHit>;

    /// Offer every triangle possibly within `query.radius` of `query.point`
    ///
    /// The visitor returns `true` when it shrank `query.radius`. Engines must
    /// then skip candidates outside the new radius, and return once no
    /// candidate is left within it.
    fn point_query<F>(&self, query: &mut PointQuery, visit: F)
    where
        F: FnMut(&mut PointQuery, Id) -> bool;
}
