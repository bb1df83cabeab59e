//! Generated test scenes

use glam::Vec3;
use painticle_geometry::TriangleMesh;
use rand::Rng;

/// Half-width of the generated plane, which spans `[-EXTENT, EXTENT]` on x and y
pub const PLANE_EXTENT: f32 = 1.0;

fn height(x: f32, y: f32) -> f32 {
    0.1 * (x * 4.0).sin() * (y * 3.0).cos()
}

fn height_normal(x: f32, y: f32) -> Vec3 {
    let dx = 0.4 * (x * 4.0).cos() * (y * 3.0).cos();
    let dy = -0.3 * (x * 4.0).sin() * (y * 3.0).sin();
    Vec3::new(-dx, -dy, 1.0).normalize()
}

/// A gently waving `resolution` x `resolution` height field with smooth
/// per-corner normals
pub fn wavy_plane(resolution: u32) -> TriangleMesh {
    let n = resolution.max(1);
    let row = n + 1;
    let step = 2.0 * PLANE_EXTENT / n as f32;

    let mut points = Vec::with_capacity((row * row) as usize);
    let mut vertex_normals = Vec::with_capacity(points.capacity());
    for j in 0..=n {
        for i in 0..=n {
            let x = -PLANE_EXTENT + i as f32 * step;
            let y = -PLANE_EXTENT + j as f32 * step;
            points.push(Vec3::new(x, y, height(x, y)));
            vertex_normals.push(height_normal(x, y));
        }
    }

    let mut triangles = Vec::with_capacity((2 * n * n) as usize);
    for j in 0..n {
        for i in 0..n {
            let k = j * row + i;
            triangles.push([k, k + 1, k + row + 1]);
            triangles.push([k, k + row + 1, k + row]);
        }
    }

    let normals = triangles
        .iter()
        .flat_map(|tri| tri.map(|corner| vertex_normals[corner as usize]))
        .collect();

    TriangleMesh::new(points, triangles, normals)
}

/// `count` rays pointing straight down onto the plane from random spots
/// above it, spread slightly past its edges so some of them miss
pub fn downward_rays<R: Rng + ?Sized>(rng: &mut R, count: usize) -> (Vec<Vec3>, Vec<Vec3>) {
    let reach = PLANE_EXTENT * 1.1;
    let origins = (0..count)
        .map(|_| {
            Vec3::new(
                rng.random_range(-reach..=reach),
                rng.random_range(-reach..=reach),
                2.0,
            )
        })
        .collect();
    (origins, vec![Vec3::NEG_Z; count])
}

/// `count` points spread uniformly over the cube `[-extent, extent]^3`
pub fn random_points<R: Rng + ?Sized>(rng: &mut R, count: usize, extent: f32) -> Vec<Vec3> {
    let extent = extent.abs();
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.random_range(-extent..=extent),
                rng.random_range(-extent..=extent),
                rng.random_range(-extent..=extent),
            )
        })
        .collect()
}
