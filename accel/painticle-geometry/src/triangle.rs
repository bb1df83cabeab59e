//! Per-triangle kernels: closest point and ray intersection
//!
//! Barycentric triples are ordered `(w_a, w_b, w_c)` so that a point on the
//! triangle is `w_a * a + w_b * b + w_c * c`.

use glam::Vec3;

/// Barycentric coordinates of the point on triangle `abc` closest to `p`
///
/// Classifies `p` against the Voronoi regions of the triangle (three vertex
/// regions, three edge regions, the face) and solves only for the region it
/// falls in. Degenerate triangles are not special-cased.
pub fn closest_point_barycentric(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    // Vertex region outside A
    let d1 = ab.dot(ap);
    let d2 = ac.dot(ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return Vec3::X;
    }

    // Vertex region outside B
    let bp = p - b;
    let d3 = ab.dot(bp);
    let d4 = ac.dot(bp);
    if d3 >= 0.0 && d4 <= d3 {
        return Vec3::Y;
    }

    // Vertex region outside C
    let cp = p - c;
    let d5 = ab.dot(cp);
    let d6 = ac.dot(cp);
    if d6 >= 0.0 && d5 <= d6 {
        return Vec3::Z;
    }

    // Edge AB
    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return Vec3::new(1.0 - v, v, 0.0);
    }

    // Edge AC
    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return Vec3::new(1.0 - w, 0.0, w);
    }

    // Edge BC
    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return Vec3::new(0.0, 1.0 - w, w);
    }

    // Face
    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    Vec3::new(1.0 - v - w, v, w)
}

/// Blend three corner values with barycentric weights
#[inline]
pub fn apply_barycentrics(barycentrics: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    barycentrics.x * a + barycentrics.y * b + barycentrics.z * c
}

/// Möller–Trumbore ray/triangle test
///
/// Returns `(t, u, v)` for hits with `t` in `[t_near, t_far]`, where the hit
/// point is `(1 - u - v) * a + u * b + v * c`. Both faces are hit; rays
/// parallel to the triangle plane miss.
pub fn intersect_triangle(
    origin: Vec3,
    dir: Vec3,
    a: Vec3,
    b: Vec3,
    c: Vec3,
    t_near: f32,
    t_far: f32,
) -> Option<(f32, f32, f32)> {
    let edge1 = b - a;
    let edge2 = c - a;

    let pvec = dir.cross(edge2);
    let det = edge1.dot(pvec);
    // Relative to |dir| |edge1| |edge2| so slivers and short directions still hit
    if det.abs() <= f32::EPSILON * dir.length() * edge1.length() * edge2.length() {
        return None;
    }

    let inv_det = 1.0 / det;
    let tvec = origin - a;

    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(edge1);
    let v = dir.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(qvec) * inv_det;
    (t >= t_near && t <= t_far).then_some((t, u, v))
}
