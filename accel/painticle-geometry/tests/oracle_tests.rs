//! Integration tests for closest-point and ray queries

use glam::{Mat4, Vec3};
use painticle_geometry::{
    AccelerationEngine, GeometryError, GeometryOracle, PointQuery, Ray, RayHit, SurfaceInfo,
    TriangleMesh, intersect_triangle,
};
use painticle_utils::{Id, ViewError};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Two triangles forming the unit square at z = 0, normals pointing up
fn unit_square() -> TriangleMesh {
    TriangleMesh::new(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
        vec![Vec3::Z; 6],
    )
}

/// A bumpy `n` x `n` height field over [0, n] x [0, n]
fn bumpy_grid(n: u32) -> TriangleMesh {
    let mut points = Vec::new();
    for y in 0..=n {
        for x in 0..=n {
            let z = ((x * 7 + y * 3) % 5) as f32 * 0.2;
            points.push(Vec3::new(x as f32, y as f32, z));
        }
    }

    let row = n + 1;
    let mut triangles = Vec::new();
    for y in 0..n {
        for x in 0..n {
            let i = y * row + x;
            triangles.push([i, i + 1, i + row + 1]);
            triangles.push([i, i + row + 1, i + row]);
        }
    }

    let normals = triangles
        .iter()
        .flat_map(|&[a, b, c]| {
            let (a, b, c) = (points[a as usize], points[b as usize], points[c as usize]);
            let n = (b - a).cross(c - a).normalize();
            [n, n, n]
        })
        .collect();

    TriangleMesh::new(points, triangles, normals)
}

/// Engine that tests every triangle, used as a reference
struct BruteForce {
    triangle_count: Id,
}

impl AccelerationEngine for BruteForce {
    fn build(mesh: &TriangleMesh) -> Self {
        Self {
            triangle_count: mesh.triangle_count() as Id,
        }
    }

    fn intersect(&self, mesh: &TriangleMesh, ray: &Ray) -> Option<RayHit> {
        let mut best: Option<RayHit> = None;
        for primitive in 0..self.triangle_count {
            let (a, b, c) = mesh.corners(primitive);
            let t_far = best.map_or(ray.t_far, |hit| hit.t);
            if let Some((t, u, v)) =
                intersect_triangle(ray.origin, ray.direction, a, b, c, ray.t_near, t_far)
            {
                best = Some(RayHit { primitive, t, u, v });
            }
        }
        best
    }

    fn point_query<F>(&self, query: &mut PointQuery, mut visit: F)
    where
        F: FnMut(&mut PointQuery, Id) -> bool,
    {
        // No culling, only the visitor's radius check applies
        for primitive in 0..self.triangle_count {
            visit(query, primitive);
        }
    }
}

#[test]
fn test_unit_square_scenario() {
    let oracle = GeometryOracle::new(unit_square());
    let info = oracle.closest_point(Vec3::new(0.5, 0.5, 5.0));

    assert!(info.is_hit());
    assert!(info.location.abs_diff_eq(Vec3::new(0.5, 0.5, 0.0), 1e-5));
    assert!(info.normal.abs_diff_eq(Vec3::Z, 1e-5));
    assert!((info.barycentrics.element_sum() - 1.0).abs() < 1e-5);
}

#[test]
fn test_closest_point_at_every_vertex() {
    let mesh = bumpy_grid(6);
    let oracle = GeometryOracle::new(mesh.clone());

    for (index, &p) in mesh.points().iter().enumerate() {
        let info = oracle.closest_point(p);
        assert!(info.is_hit());
        assert!(
            info.location.abs_diff_eq(p, 1e-5),
            "vertex {index}: {p:?} -> {:?}",
            info.location
        );

        let b = info.barycentrics.to_array();
        let ones = b.iter().filter(|w| (**w - 1.0).abs() < 1e-5).count();
        let zeros = b.iter().filter(|w| w.abs() < 1e-5).count();
        assert_eq!((ones, zeros), (1, 2), "vertex {index}: barycentrics {b:?}");

        let tri = mesh.triangles()[info.tri_index as usize];
        assert!(tri.contains(&(index as Id)), "vertex {index} not in {tri:?}");
    }
}

#[test]
fn test_shoot_ray_hit_and_miss() {
    let oracle = GeometryOracle::new(unit_square());

    let hit = oracle.shoot_ray(Vec3::new(0.25, 0.75, 2.0), Vec3::NEG_Z);
    assert!(hit.is_hit());
    assert_eq!(hit.tri_index, 1);
    assert!(hit.location.abs_diff_eq(Vec3::new(0.25, 0.75, 0.0), 1e-6));
    assert!(hit.normal.abs_diff_eq(Vec3::Z, 1e-6));

    let miss = oracle.shoot_ray(Vec3::new(2.0, 2.0, 2.0), Vec3::NEG_Z);
    assert_eq!(miss, SurfaceInfo::NONE);
    assert_eq!(miss.tri_index, u32::MAX);
}

#[test]
fn test_shoot_rays_with_transform() {
    let oracle = GeometryOracle::new(unit_square());

    // World space is the mesh shifted by +10 on x; map back into mesh space
    let to_object = Mat4::from_translation(Vec3::new(-10.0, 0.0, 0.0));
    let origins = [Vec3::new(10.5, 0.5, 3.0), Vec3::new(0.5, 0.5, 3.0)];
    let directions = [Vec3::NEG_Z, Vec3::NEG_Z];

    let results = oracle
        .shoot_rays_vec(&origins[..], &directions[..], &to_object)
        .unwrap();

    assert!(results[0].is_hit());
    assert!(results[0].location.abs_diff_eq(Vec3::new(0.5, 0.5, 0.0), 1e-6));
    // The second origin lands at x = -9.5 in mesh space
    assert!(!results[1].is_hit());
}

#[test]
fn test_shoot_ray_hits_sliver_triangle() {
    let sliver = TriangleMesh::new(
        vec![Vec3::ZERO, Vec3::new(1e4, 0.0, 0.0), Vec3::new(0.0, 1e-4, 0.0)],
        vec![[0, 1, 2]],
        vec![],
    );
    let oracle = GeometryOracle::new(sliver);
    let p = Vec3::new(1.0, 1e-5, 1.0);

    let hit = oracle.shoot_ray(p, Vec3::NEG_Z);
    assert!(hit.is_hit());
    assert_eq!(hit.tri_index, 0);
    assert!(hit.location.abs_diff_eq(Vec3::new(1.0, 1e-5, 0.0), 1e-5));
    assert!(hit.location.abs_diff_eq(oracle.closest_point(p).location, 1e-4));
}

#[test]
fn test_shoot_rays_with_scaling_transform() {
    let oracle = GeometryOracle::new(unit_square());

    // World space is the mesh scaled up by 1e4
    let to_object = Mat4::from_scale(Vec3::splat(1e-4));
    let origins = [Vec3::new(5000.0, 2500.0, 1e4)];
    let directions = [Vec3::new(0.0, 0.0, -1e-3)];

    let results = oracle
        .shoot_rays_vec(&origins[..], &directions[..], &to_object)
        .unwrap();

    assert!(results[0].is_hit());
    assert_eq!(results[0].tri_index, 0);
    assert!(results[0].location.abs_diff_eq(Vec3::new(0.5, 0.25, 0.0), 1e-5));
}

#[test]
fn test_shoot_rays_length_checked_before_work() {
    let oracle = GeometryOracle::new(unit_square());
    let origins = [Vec3::new(0.5, 0.5, 1.0); 3];
    let directions = [Vec3::NEG_Z; 2];
    let mut results = vec![SurfaceInfo::NONE; 3];

    let err = oracle
        .shoot_rays(&origins[..], &directions[..], &Mat4::IDENTITY, &mut results)
        .unwrap_err();
    assert_eq!(
        err,
        GeometryError::View(ViewError::LengthMismatch {
            left: "origins",
            left_len: 3,
            right: "directions",
            right_len: 2,
        })
    );
    assert!(results.iter().all(|r| !r.is_hit()));

    let mut short = vec![SurfaceInfo::NONE; 2];
    let err = oracle
        .shoot_rays(&origins[..], &origins[..], &Mat4::IDENTITY, &mut short)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "origins and results need to have the same size (3 != 2)"
    );
}

#[test]
fn test_mesh_without_normals_reports_zero_normal() {
    let square = unit_square();
    let bare = TriangleMesh::new(square.points().to_vec(), square.triangles().to_vec(), vec![]);
    let oracle = GeometryOracle::new(bare);

    let hit = oracle.shoot_ray(Vec3::new(0.5, 0.25, 1.0), Vec3::NEG_Z);
    assert!(hit.is_hit());
    assert_eq!(hit.normal, Vec3::ZERO);
}

fn arb_point() -> impl Strategy<Value = Vec3> {
    (-2.0f32..8.0, -2.0f32..8.0, -3.0f32..3.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn prop_barycentrics_sum_to_one(p in arb_point()) {
        let oracle = GeometryOracle::new(bumpy_grid(6));
        let info = oracle.closest_point(p);
        prop_assert!(info.is_hit());
        prop_assert!((info.barycentrics.element_sum() - 1.0).abs() < 1e-4);
        prop_assert!((info.normal.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn prop_tree_matches_brute_force(p in arb_point(), dx in -0.5f32..0.5, dy in -0.5f32..0.5) {
        let mesh = bumpy_grid(6);
        let tree = GeometryOracle::new(mesh.clone());
        let brute = GeometryOracle::<BruteForce>::with_engine(mesh);

        let a = tree.closest_point(p);
        let b = brute.closest_point(p);
        prop_assert!((a.location.distance(p) - b.location.distance(p)).abs() < 1e-4);

        let origin = Vec3::new(p.x, p.y, 5.0);
        let dir = Vec3::new(dx, dy, -1.0);
        let a = tree.shoot_ray(origin, dir);
        let b = brute.shoot_ray(origin, dir);
        prop_assert_eq!(a.is_hit(), b.is_hit());
        if a.is_hit() {
            prop_assert!(a.location.abs_diff_eq(b.location, 1e-4));
        }
    }
}
