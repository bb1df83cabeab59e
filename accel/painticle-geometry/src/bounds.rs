//! Axis-aligned bounding boxes

use glam::Vec3;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Inverted box that any point extends
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::MAX),
        max: Vec3::splat(f32::MIN),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounds of a single triangle
    #[inline]
    pub fn from_triangle(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            min: a.min(b).min(c),
            max: a.max(b).max(c),
        }
    }

    /// Bounds of a set of points, `None` when the set is empty
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, first), |mut bounds, p| {
            bounds.extend_point(p);
            bounds
        }))
    }

    #[inline]
    pub fn extend_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    #[inline]
    pub fn extend_box(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn diagonal(&self) -> Vec3 {
        self.max - self.min
    }

    /// Index of the longest axis (0 = x, 1 = y, 2 = z)
    #[inline]
    pub fn longest_axis(&self) -> usize {
        let d = self.diagonal();
        if d.x >= d.y && d.x >= d.z {
            0
        } else if d.y >= d.z {
            1
        } else {
            2
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Squared distance from `p` to the box, 0 when `p` is inside
    #[inline]
    pub fn squared_exterior_distance(&self, p: Vec3) -> f32 {
        let outside = (self.min - p).max(Vec3::ZERO) + (p - self.max).max(Vec3::ZERO);
        outside.length_squared()
    }

    /// Slab test of the ray `origin + t * dir` against the box
    ///
    /// `inv_dir` is the componentwise reciprocal of the direction. Returns the
    /// entry distance when the ray overlaps the box within `(t_near, t_far)`.
    #[inline]
    pub fn ray_entry(&self, origin: Vec3, inv_dir: Vec3, t_near: f32, t_far: f32) -> Option<f32> {
        let mut t_min = t_near;
        let mut t_max = t_far;

        for axis in 0..3 {
            let mut t0 = (self.min[axis] - origin[axis]) * inv_dir[axis];
            let mut t1 = (self.max[axis] - origin[axis]) * inv_dir[axis];
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            // NaN (origin on a slab plane of an axis-parallel ray) leaves the range as is
            if t0 > t_min {
                t_min = t0;
            }
            if t1 < t_max {
                t_max = t1;
            }
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn test_from_points() {
        let bounds = Aabb::from_points([
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 3.0, 4.0));
        assert_eq!(bounds.longest_axis(), 1);
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test_case(Vec3::splat(0.5), 0.0 ; "inside")]
    #[test_case(Vec3::new(2.0, 0.5, 0.5), 1.0 ; "face")]
    #[test_case(Vec3::new(2.0, 2.0, 0.5), 2.0 ; "edge")]
    #[test_case(Vec3::splat(-1.0), 3.0 ; "corner")]
    fn test_squared_exterior_distance(p: Vec3, expected: f32) {
        assert!((unit_box().squared_exterior_distance(p) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_ray_entry() {
        let bounds = unit_box();
        let origin = Vec3::new(0.5, 0.5, 5.0);
        let dir = Vec3::NEG_Z;
        let entry = bounds.ray_entry(origin, dir.recip(), 0.0, f32::INFINITY);
        assert_eq!(entry, Some(4.0));

        // Pointing away
        assert!(bounds.ray_entry(origin, Vec3::Z.recip(), 0.0, f32::INFINITY).is_none());
        // Box beyond t_far
        assert!(bounds.ray_entry(origin, dir.recip(), 0.0, 3.0).is_none());
    }
}
