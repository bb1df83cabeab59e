//! Spawning particles where rays hit a mesh

use glam::{Mat4, Vec2, Vec3};
use log::{debug, trace};
use painticle_geometry::{AccelerationEngine, GeometryOracle};
use painticle_utils::{Vec3Source, ensure_same_len};
use rand::Rng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{apply_hsv_offset, rgb_to_hsv};
use crate::data::ParticleData;
use crate::error::{ParticleError, Result};

/// Closed interval `[min, max]` to draw uniform samples from
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalarRange {
    pub min: f32,
    pub max: f32,
}

impl ScalarRange {
    /// Range between `a` and `b`, in either order
    pub fn new(a: f32, b: f32) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// `center` plus or minus `spread`
    pub fn around(center: f32, spread: f32) -> Self {
        Self::new(center - spread, center + spread)
    }

    /// Range holding the single value `value`
    pub fn constant(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        let (min, max) = self.bounds();
        min <= value && value <= max
    }

    /// Both ends and the span between them are finite
    pub fn is_finite(&self) -> bool {
        (self.max - self.min).is_finite()
    }

    /// Draw one uniform sample, both ends included
    ///
    /// Panics if the range is not [finite](Self::is_finite).
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        let (min, max) = self.bounds();
        if min == max {
            min
        } else {
            rng.random_range(min..=max)
        }
    }

    fn bounds(&self) -> (f32, f32) {
        (self.min.min(self.max), self.min.max(self.max))
    }
}

impl Default for ScalarRange {
    fn default() -> Self {
        Self::constant(0.0)
    }
}

/// Sample one value in `[-amplitude, amplitude]`
fn sample_symmetric<R: Rng + ?Sized>(rng: &mut R, amplitude: f32) -> f32 {
    ScalarRange::new(-amplitude, amplitude).sample(rng)
}

/// Per-particle attribute distributions used by
/// [`ParticleData::spawn_from_rays`]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpawnParams {
    /// Initial speed along the ray direction, before the normal component is
    /// removed
    pub speed: ScalarRange,
    /// Per-axis amplitude of the random speed added on top
    pub speed_jitter: Vec3,
    pub size: ScalarRange,
    pub mass: ScalarRange,
    /// Lifetime in seconds
    pub max_age: ScalarRange,
    /// RGB color every particle starts from
    pub base_color: Vec3,
    /// Per-channel HSV amplitude of the random color offset
    pub hsv_jitter: Vec3,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            speed: ScalarRange::constant(0.0),
            speed_jitter: Vec3::ZERO,
            size: ScalarRange::around(0.03, 0.01),
            mass: ScalarRange::around(0.4, 0.1),
            max_age: ScalarRange::around(2.0, 1.0),
            base_color: Vec3::ONE,
            hsv_jitter: rgb_to_hsv(Vec3::new(0.3, 0.25, 0.2)),
        }
    }
}

impl SpawnParams {
    pub fn with_speed(mut self, speed: ScalarRange) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_speed_jitter(mut self, speed_jitter: Vec3) -> Self {
        self.speed_jitter = speed_jitter;
        self
    }

    pub fn with_size(mut self, size: ScalarRange) -> Self {
        self.size = size;
        self
    }

    pub fn with_mass(mut self, mass: ScalarRange) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_max_age(mut self, max_age: ScalarRange) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn with_base_color(mut self, base_color: Vec3) -> Self {
        self.base_color = base_color;
        self
    }

    pub fn with_hsv_jitter(mut self, hsv_jitter: Vec3) -> Self {
        self.hsv_jitter = hsv_jitter;
        self
    }

    /// Check that every range and amplitude can be sampled
    ///
    /// Ranges need a finite span and jitter amplitudes a finite `2 * amplitude`.
    pub fn validate(&self) -> Result<()> {
        let ranges = [
            ("speed", self.speed),
            ("size", self.size),
            ("mass", self.mass),
            ("max_age", self.max_age),
        ];
        for (name, range) in ranges {
            if !range.is_finite() {
                return Err(ParticleError::InvalidArgument(format!(
                    "{name} range must have a finite span, got [{}, {}]",
                    range.min, range.max
                )));
            }
        }

        if !self.base_color.is_finite() {
            return Err(ParticleError::InvalidArgument(format!(
                "base_color must be finite, got {}",
                self.base_color
            )));
        }

        let jitters = [
            ("speed_jitter", self.speed_jitter),
            ("hsv_jitter", self.hsv_jitter),
        ];
        for (name, amplitude) in jitters {
            if !(2.0 * amplitude).is_finite() {
                return Err(ParticleError::InvalidArgument(format!(
                    "{name} amplitude too large, got {amplitude}"
                )));
            }
        }

        Ok(())
    }
}

impl ParticleData {
    /// Cast rays against `oracle` and append one particle per hit
    ///
    /// Rays are mapped into mesh space by `to_object` and cast in parallel.
    /// The hits are then turned into particles in ray order, drawing their
    /// random attributes from the store's generator:
    ///
    /// - `location` and `normal` come from the hit
    /// - `speed` is the normalized ray direction scaled by a sample of
    ///   `params.speed`, minus its component along the normal, plus a jitter
    ///   sampled per axis within `params.speed_jitter`
    /// - `size`, `mass` and `max_age` are sampled from their ranges
    /// - `color` is `params.base_color` shifted by an HSV offset sampled per
    ///   channel within `params.hsv_jitter`
    /// - `acceleration`, `uv` and `age` start at zero
    ///
    /// Returns the number of appended particles. Mismatched input lengths or
    /// non-finite parameters are reported before any ray is cast.
    pub fn spawn_from_rays<O, D, E>(
        &mut self,
        origins: &O,
        directions: &D,
        to_object: &Mat4,
        oracle: &GeometryOracle<E>,
        params: &SpawnParams,
    ) -> Result<usize>
    where
        O: Vec3Source + ?Sized,
        D: Vec3Source + ?Sized,
        E: AccelerationEngine,
    {
        params.validate()?;
        ensure_same_len("origins", origins.len(), "directions", directions.len())?;

        if origins.is_empty() {
            return Ok(0);
        }

        let hits = oracle.shoot_rays_vec(origins, directions, to_object)?;
        let hit_count = hits.iter().filter(|info| info.is_hit()).count();
        trace!("{} of {} spawn rays hit the mesh", hit_count, hits.len());

        self.reserve(self.num_particles() + hit_count);
        for (i, info) in hits.iter().enumerate().filter(|(_, info)| info.is_hit()) {
            let rng = &mut self.rng;

            let mut speed = directions.vec3(i).normalize_or_zero() * params.speed.sample(rng);
            if info.normal != Vec3::ZERO {
                speed -= speed.project_onto(info.normal);
            }
            speed += Vec3::new(
                sample_symmetric(rng, params.speed_jitter.x),
                sample_symmetric(rng, params.speed_jitter.y),
                sample_symmetric(rng, params.speed_jitter.z),
            );

            let size = params.size.sample(rng);
            let mass = params.mass.sample(rng);
            let max_age = params.max_age.sample(rng);
            let hsv_offset = Vec3::new(
                sample_symmetric(rng, params.hsv_jitter.x),
                sample_symmetric(rng, params.hsv_jitter.y),
                sample_symmetric(rng, params.hsv_jitter.z),
            );
            let color = apply_hsv_offset(params.base_color, hsv_offset);

            self.push_particle(
                info.location,
                Vec3::ZERO,
                speed,
                info.normal,
                Vec2::ZERO,
                size,
                mass,
                0.0,
                max_age,
                color,
            );
        }

        debug!(
            "Spawned {} particles, {} total",
            hit_count,
            self.num_particles()
        );
        Ok(hit_count)
    }
}
