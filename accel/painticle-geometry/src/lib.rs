//! Geometry oracle for the PAINTicle acceleration core.
//!
//! A [`GeometryOracle`] owns an immutable [`TriangleMesh`] and answers two
//! kinds of queries against it:
//!
//! - **closest point**: the nearest surface point to a query point, found with
//!   a shrinking search radius and a Voronoi-region projection per candidate
//!   triangle ([`closest_point_barycentric`])
//! - **ray casting**: the nearest intersection of a ray with the mesh
//!
//! Both report a [`SurfaceInfo`] and both have batch variants that fan out
//! over the worker pool. Spatial traversal is delegated to an
//! [`AccelerationEngine`]; [`AabbTree`] is the default.
//!
//! # Examples
//!
//! ```rust
//! use glam::Vec3;
//! use painticle_geometry::{GeometryOracle, TriangleMesh};
//!
//! // Unit square at z = 0 with upward corner normals
//! let mesh = TriangleMesh::new(
//!     vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
//!     vec![[0, 1, 2], [0, 2, 3]],
//!     vec![Vec3::Z; 6],
//! );
//! let oracle = GeometryOracle::new(mesh);
//!
//! let info = oracle.closest_point(Vec3::new(0.5, 0.5, 5.0));
//! assert!(info.is_hit());
//! assert!(info.location.abs_diff_eq(Vec3::new(0.5, 0.5, 0.0), 1e-5));
//! assert!(info.normal.abs_diff_eq(Vec3::Z, 1e-5));
//! ```

pub mod bounds;
pub mod engine;
pub mod error;
pub mod mesh;
pub mod oracle;
pub mod surface;
pub mod triangle;

pub use bounds::Aabb;
pub use engine::{AabbTree, AccelerationEngine, PointQuery, Ray, RayHit};
pub use error::{GeometryError, Result};
pub use mesh::TriangleMesh;
pub use oracle::GeometryOracle;
pub use surface::SurfaceInfo;
pub use triangle::{apply_barycentrics, closest_point_barycentric, intersect_triangle};
