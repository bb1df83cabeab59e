//! Particle store for the PAINTicle acceleration core.
//!
//! [`ParticleData`] keeps every particle attribute in its own densely packed
//! [`ParticleField`] (structure of arrays). Particles are created where rays
//! hit a mesh ([`ParticleData::spawn_from_rays`]), aged by the caller and
//! compacted with [`ParticleData::delete_dead`].
//!
//! # Examples
//!
//! ```rust
//! use glam::{Mat4, Vec3};
//! use painticle_geometry::{GeometryOracle, TriangleMesh};
//! use painticle_particles::{ParticleData, SpawnParams};
//!
//! let mesh = TriangleMesh::new(
//!     vec![Vec3::ZERO, Vec3::X, Vec3::Y],
//!     vec![[0, 1, 2]],
//!     vec![Vec3::Z; 3],
//! );
//! let oracle = GeometryOracle::new(mesh);
//!
//! let mut particles = ParticleData::with_seed(42);
//! let origins = vec![Vec3::new(0.2, 0.2, 1.0), Vec3::new(5.0, 5.0, 1.0)];
//! let directions = vec![Vec3::NEG_Z; 2];
//!
//! let spawned = particles
//!     .spawn_from_rays(&origins, &directions, &Mat4::IDENTITY, &oracle, &SpawnParams::default())
//!     .unwrap();
//! assert_eq!(spawned, 1);
//!
//! // Age everything past its lifetime and compact
//! particles.age_mut().assign_constant(10.0);
//! assert_eq!(particles.delete_dead(), 1);
//! assert!(particles.is_empty());
//! ```

pub mod color;
pub mod data;
pub mod error;
pub mod field;
pub mod spawn;

pub use color::{
    apply_hsv_offset, apply_hsv_offsets, hsv_to_rgb, hsv_to_rgb_batch, rgb_to_hsv,
    rgb_to_hsv_batch,
};
pub use data::ParticleData;
pub use error::{ParticleError, Result};
pub use field::{FieldElement, FieldInfo, ParticleField};
pub use spawn::{ScalarRange, SpawnParams};
