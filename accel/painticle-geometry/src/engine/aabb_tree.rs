//! Balanced AABB tree over triangle bounds
//!
//! The tree is built top-down by splitting the triangles at the median
//! centroid along the longest axis of their combined bounds, which keeps it
//! balanced. Nodes live in one flat array with the children of node `i` at
//! `2 * i + 1` and `2 * i + 2`, so no child pointers are stored.

use std::cmp::Ordering;

use glam::Vec3;
use log::{debug, trace};
use painticle_utils::{ID_NONE, Id};

use super::{AccelerationEngine, PointQuery, Ray, RayHit};
use crate::bounds::Aabb;
use crate::mesh::TriangleMesh;
use crate::triangle::intersect_triangle;

/// Marks inner nodes; leaves store their triangle id, unused slots `ID_NONE`
const INNER: Id = ID_NONE - 1;

#[derive(Debug, Clone, Copy)]
struct Node {
    bounds: Aabb,
    primitive: Id,
}

impl Node {
    const UNUSED: Self = Self {
        bounds: Aabb::EMPTY,
        primitive: ID_NONE,
    };

    #[inline]
    fn is_inner(&self) -> bool {
        self.primitive == INNER
    }
}

#[derive(Debug, Clone, Copy)]
struct BuildInput {
    primitive: Id,
    bounds: Aabb,
    centroid: Vec3,
}

#[inline]
fn left_child(node: usize) -> usize {
    2 * node + 1
}

#[inline]
fn right_child(node: usize) -> usize {
    2 * node + 2
}

/// AABB tree engine
#[derive(Debug, Clone, Default)]
pub struct AabbTree {
    nodes: Vec<Node>,
}

impl AabbTree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of node slots, including unused ones
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bounds of the whole tree, `None` for an empty tree
    pub fn bounds(&self) -> Option<Aabb> {
        self.nodes.first().map(|root| root.bounds)
    }

    fn build_node(&mut self, input: &mut [BuildInput], node: usize) {
        debug_assert!(!input.is_empty());

        if let [single] = input {
            self.nodes[node] = Node {
                bounds: single.bounds,
                primitive: single.primitive,
            };
            return;
        }

        let mut bounds = input[0].bounds;
        for item in &input[1..] {
            bounds.extend_box(&item.bounds);
        }

        let axis = bounds.longest_axis();
        let median = (input.len() - 1) / 2;
        input.select_nth_unstable_by(median, |a, b| {
            a.centroid[axis]
                .partial_cmp(&b.centroid[axis])
                .unwrap_or(Ordering::Equal)
        });

        self.nodes[node] = Node {
            bounds,
            primitive: INNER,
        };

        let (left, right) = input.split_at_mut(median + 1);
        self.build_node(left, left_child(node));
        self.build_node(right, right_child(node));
    }
}

impl AccelerationEngine for AabbTree {
    fn build(mesh: &TriangleMesh) -> Self {
        let count = mesh.triangle_count();
        if count == 0 {
            return Self::default();
        }

        let mut input: Vec<BuildInput> = (0..count as Id)
            .map(|primitive| {
                let bounds = mesh.triangle_bounds(primitive);
                BuildInput {
                    primitive,
                    bounds,
                    centroid: bounds.center(),
                }
            })
            .collect();

        let mut tree = Self {
            nodes: vec![Node::UNUSED; 2 * count.next_power_of_two() - 1],
        };
        tree.build_node(&mut input, 0);

        debug!(
            "Built AABB tree over {} triangles ({} node slots)",
            count,
            tree.nodes.len()
        );
        tree
    }

    fn intersect(&self, mesh: &TriangleMesh, ray: &Ray) -> Option<RayHit> {
        if self.nodes.is_empty() {
            return None;
        }

        let inv_dir = ray.direction.recip();
        let mut best: Option<RayHit> = None;
        let mut t_far = ray.t_far;

        let mut stack: Vec<(usize, f32)> = Vec::with_capacity(64);
        if let Some(t) = self.nodes[0].bounds.ray_entry(ray.origin, inv_dir, ray.t_near, t_far) {
            stack.push((0, t));
        }

        while let Some((index, entry)) = stack.pop() {
            // A closer hit may have been found since this node was pushed
            if entry > t_far {
                continue;
            }

            let node = &self.nodes[index];
            if !node.is_inner() {
                let (a, b, c) = mesh.corners(node.primitive);
                if let Some((t, u, v)) =
                    intersect_triangle(ray.origin, ray.direction, a, b, c, ray.t_near, t_far)
                {
                    t_far = t;
                    best = Some(RayHit {
                        primitive: node.primitive,
                        t,
                        u,
                        v,
                    });
                }
                continue;
            }

            let left = left_child(index);
            let right = right_child(index);
            let hit_left = self.nodes[left]
                .bounds
                .ray_entry(ray.origin, inv_dir, ray.t_near, t_far);
            let hit_right = self.nodes[right]
                .bounds
                .ray_entry(ray.origin, inv_dir, ray.t_near, t_far);

            // Push the farther child first so the nearer one is popped next
            match (hit_left, hit_right) {
                (Some(tl), Some(tr)) if tl <= tr => {
                    stack.push((right, tr));
                    stack.push((left, tl));
                }
                (Some(tl), Some(tr)) => {
                    stack.push((left, tl));
                    stack.push((right, tr));
                }
                (Some(tl), None) => stack.push((left, tl)),
                (None, Some(tr)) => stack.push((right, tr)),
                (None, None) => {}
            }
        }

        best
    }

    fn point_query<F>(&self, query: &mut PointQuery, mut visit: F)
    where
        F: FnMut(&mut PointQuery, Id) -> bool,
    {
        if self.nodes.is_empty() {
            return;
        }

        let mut visited = 0usize;
        let mut stack: Vec<usize> = Vec::with_capacity(64);
        stack.push(0);

        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];

            // Re-cull against the current radius, it may have shrunk
            let radius_sq = query.radius * query.radius;
            if node.bounds.squared_exterior_distance(query.point) > radius_sq {
                continue;
            }

            if !node.is_inner() {
                visited += 1;
                visit(query, node.primitive);
                continue;
            }

            let left = left_child(index);
            let right = right_child(index);
            let d_left = self.nodes[left].bounds.squared_exterior_distance(query.point);
            let d_right = self.nodes[right].bounds.squared_exterior_distance(query.point);

            if d_left <= d_right {
                stack.push(right);
                stack.push(left);
            } else {
                stack.push(left);
                stack.push(right);
            }
        }

        trace!(
            "Point query at {:?} visited {} triangles, final radius {}",
            query.point, visited, query.radius
        );
    }
}
