//! Structure-of-arrays particle store

use std::fmt;

use glam::{Vec2, Vec3};
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::{ParticleError, Result};
use crate::field::{FieldInfo, ParticleField};

/// Declares [`ParticleData`] from its field list so that every structural
/// operation touches every field
macro_rules! particle_data {
    ($( $(#[$doc:meta])* $field:ident / $field_mut:ident : $ty:ty ),* $(,)?) => {
        /// All particle attributes, one [`ParticleField`] per attribute
        ///
        /// Every field always holds [`num_particles`](Self::num_particles)
        /// elements. Lengths only change through the structural operations
        /// on the store ([`resize`](Self::resize), [`append`](Self::append),
        /// [`delete_dead`](Self::delete_dead), [`clear`](Self::clear) and
        /// spawning), which update all fields together.
        ///
        /// The store owns the random generator used for spawning. It is
        /// seeded once at construction and never reseeded, so a store built
        /// with [`with_seed`](Self::with_seed) spawns reproducibly.
        #[derive(Clone)]
        pub struct ParticleData {
            $( $field: ParticleField<$ty>, )*
            pub(crate) rng: StdRng,
        }

        impl ParticleData {
            /// Names of all fields, in declaration order
            pub const FIELD_NAMES: &'static [&'static str] = &[$( stringify!($field) ),*];

            fn with_rng(rng: StdRng) -> Self {
                Self {
                    $( $field: ParticleField::new(stringify!($field)), )*
                    rng,
                }
            }

            $(
                $(#[$doc])*
                pub fn $field(&self) -> &ParticleField<$ty> {
                    &self.$field
                }

                $(#[$doc])*
                pub fn $field_mut(&mut self) -> &mut ParticleField<$ty> {
                    &mut self.$field
                }
            )*

            /// Layout and length of the field called `name`
            pub fn field_info(&self, name: &str) -> Result<FieldInfo> {
                match name {
                    $( stringify!($field) => Ok(self.$field.info()), )*
                    _ => Err(ParticleError::UnknownField(name.to_string())),
                }
            }

            /// Overwrite the field called `name` from a flat `f32` buffer
            pub fn assign_flat(&mut self, name: &str, values: &[f32]) -> Result<()> {
                match name {
                    $( stringify!($field) => self.$field.assign_flat(values), )*
                    _ => Err(ParticleError::UnknownField(name.to_string())),
                }
            }

            /// Copy the field called `name` into a flat `f32` buffer
            pub fn copy_to_flat(&self, name: &str, out: &mut [f32]) -> Result<()> {
                match name {
                    $( stringify!($field) => self.$field.copy_to_flat(out), )*
                    _ => Err(ParticleError::UnknownField(name.to_string())),
                }
            }

            /// The field called `name` as a freshly allocated flat buffer
            pub fn to_flat(&self, name: &str) -> Result<Vec<f32>> {
                match name {
                    $( stringify!($field) => Ok(self.$field.to_flat()), )*
                    _ => Err(ParticleError::UnknownField(name.to_string())),
                }
            }

            /// Grow or shrink to `num_particles`
            ///
            /// New particles are zero-initialized in every field.
            pub fn resize(&mut self, num_particles: usize) {
                $( self.$field.resize(num_particles); )*
            }

            /// Make every field hold at least `num_particles` in total
            /// without reallocating
            ///
            /// Never shrinks; a count below the current length does nothing.
            pub fn reserve(&mut self, num_particles: usize) {
                $( self.$field.reserve(num_particles); )*
            }

            /// Remove all particles
            pub fn clear(&mut self) {
                $( self.$field.clear(); )*
            }

            /// Append all particles of `other` after the existing ones,
            /// preserving their order
            pub fn append(&mut self, other: &Self) {
                $( self.$field.append(&other.$field); )*
            }

            fn swap_remove(&mut self, index: usize) {
                $( self.$field.swap_remove(index); )*
            }

            pub(crate) fn push_particle(&mut self, $( $field: $ty ),*) {
                $( self.$field.push($field); )*
            }
        }

        impl fmt::Debug for ParticleData {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct("ParticleData")
                    $( .field(stringify!($field), &self.$field) )*
                    .finish_non_exhaustive()
            }
        }
    };
}

particle_data! {
    /// World-space position
    location / location_mut: Vec3,
    acceleration / acceleration_mut: Vec3,
    speed / speed_mut: Vec3,
    /// Surface normal at the particle location
    normal / normal_mut: Vec3,
    uv / uv_mut: Vec2,
    size / size_mut: f32,
    mass / mass_mut: f32,
    /// Seconds since the particle was spawned
    age / age_mut: f32,
    /// Age at which [`ParticleData::delete_dead`] removes the particle
    max_age / max_age_mut: f32,
    /// RGB color in `[0, 1]`
    color / color_mut: Vec3,
}

impl ParticleData {
    /// Empty store with a random generator seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Empty store with a deterministic random generator
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn num_particles(&self) -> usize {
        self.location.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_particles() == 0
    }

    pub fn field_names(&self) -> &'static [&'static str] {
        Self::FIELD_NAMES
    }

    /// Remove every particle whose age has reached its max age
    ///
    /// Runs in a single pass. A removed particle is replaced by the current
    /// last particle, so the order of the survivors is not preserved.
    /// Returns the number of removed particles.
    pub fn delete_dead(&mut self) -> usize {
        let before = self.num_particles();

        let mut i = 0;
        while i < self.num_particles() {
            if self.age[i] >= self.max_age[i] {
                // The swapped-in particle lands at i and is checked next
                self.swap_remove(i);
            } else {
                i += 1;
            }
        }

        let removed = before - self.num_particles();
        if removed > 0 {
            debug!(
                "Removed {} dead particles, {} remaining",
                removed,
                self.num_particles()
            );
        }
        removed
    }
}

impl Default for ParticleData {
    fn default() -> Self {
        Self::new()
    }
}
