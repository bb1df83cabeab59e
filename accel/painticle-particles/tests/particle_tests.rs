//! Integration tests for the particle store and ray spawning

use glam::{Mat4, Vec3};
use painticle_geometry::{GeometryError, GeometryOracle, TriangleMesh};
use painticle_particles::{ParticleData, ParticleError, ScalarRange, SpawnParams, rgb_to_hsv};
use painticle_utils::ViewError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Unit square at z = 0 with upward normals
fn square_oracle() -> GeometryOracle {
    GeometryOracle::new(TriangleMesh::new(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2], [0, 2, 3]],
        vec![Vec3::Z; 6],
    ))
}

fn assert_fields_consistent(data: &ParticleData) {
    for name in data.field_names() {
        assert_eq!(
            data.field_info(name).unwrap().len,
            data.num_particles(),
            "field {name}"
        );
    }
}

/// Rays from above; every other one misses the square, none hits an edge
fn alternating_rays(count: usize) -> (Vec<Vec3>, Vec<Vec3>) {
    let origins = (0..count)
        .map(|i| {
            let offset = if i % 2 == 0 { 0.0 } else { 3.0 };
            Vec3::new(0.15 + offset, 0.1 + (i % 8) as f32 * 0.1, 2.0)
        })
        .collect();
    (origins, vec![Vec3::NEG_Z; count])
}

#[test]
fn test_spawn_count_matches_hits() {
    let oracle = square_oracle();
    let (origins, directions) = alternating_rays(10);
    let mut data = ParticleData::with_seed(11);

    let spawned = data
        .spawn_from_rays(&origins, &directions, &Mat4::IDENTITY, &oracle, &SpawnParams::default())
        .unwrap();

    assert_eq!(spawned, 5);
    assert_eq!(data.num_particles(), 5);
    assert_fields_consistent(&data);

    for i in 0..data.num_particles() {
        assert_eq!(data.location()[i].z, 0.0);
        assert_eq!(data.normal()[i], Vec3::Z);
        assert_eq!(data.acceleration()[i], Vec3::ZERO);
        assert_eq!(data.age()[i], 0.0);
        assert_eq!(data.uv()[i], glam::Vec2::ZERO);
    }
}

#[test]
fn test_spawn_samples_within_ranges() {
    let oracle = square_oracle();
    let (origins, directions) = alternating_rays(400);
    let params = SpawnParams::default()
        .with_size(ScalarRange::new(0.1, 0.2))
        .with_mass(ScalarRange::new(1.0, 1.5))
        .with_max_age(ScalarRange::new(3.0, 4.0))
        .with_base_color(Vec3::new(0.8, 0.2, 0.1))
        .with_hsv_jitter(Vec3::new(0.5, 0.5, 0.5));

    let mut data = ParticleData::with_seed(5);
    data.spawn_from_rays(&origins, &directions, &Mat4::IDENTITY, &oracle, &params)
        .unwrap();

    assert!(data.size().iter().all(|v| params.size.contains(*v)));
    assert!(data.mass().iter().all(|v| params.mass.contains(*v)));
    assert!(data.max_age().iter().all(|v| params.max_age.contains(*v)));
    for color in data.color() {
        let hsv = rgb_to_hsv(*color);
        assert!((0.0..1.0).contains(&hsv.x), "hue {} of {color:?}", hsv.x);
        assert!(color.cmpge(Vec3::ZERO).all() && color.cmple(Vec3::ONE).all());
    }
}

#[test]
fn test_spawn_speed_is_tangent_to_surface() {
    let oracle = square_oracle();
    let origins = vec![Vec3::new(-0.3, 0.6, 1.0)];
    // Slanted ray hitting (0.7, 0.6, 0); only the tangential x part survives
    let directions = vec![Vec3::new(1.0, 0.0, -1.0)];
    let params = SpawnParams::default().with_speed(ScalarRange::constant(2.0));

    let mut data = ParticleData::with_seed(0);
    data.spawn_from_rays(&origins, &directions, &Mat4::IDENTITY, &oracle, &params)
        .unwrap();

    let expected = Vec3::new(2.0 / 2.0_f32.sqrt(), 0.0, 0.0);
    assert!(data.speed()[0].abs_diff_eq(expected, 1e-5), "{:?}", data.speed()[0]);
}

#[test]
fn test_spawn_is_reproducible_with_seed() {
    let oracle = square_oracle();
    let (origins, directions) = alternating_rays(32);
    let params = SpawnParams::default().with_speed_jitter(Vec3::splat(0.3));

    let spawn = |seed| {
        let mut data = ParticleData::with_seed(seed);
        data.spawn_from_rays(&origins, &directions, &Mat4::IDENTITY, &oracle, &params)
            .unwrap();
        (data.speed().to_flat(), data.color().to_flat())
    };

    assert_eq!(spawn(9), spawn(9));
    assert_ne!(spawn(9), spawn(10));
}

#[test]
fn test_spawn_rejects_mismatched_lengths_before_casting() {
    let oracle = square_oracle();
    let origins = vec![Vec3::new(0.5, 0.5, 1.0); 3];
    let directions = vec![Vec3::NEG_Z; 2];
    let mut data = ParticleData::with_seed(0);

    let err = data
        .spawn_from_rays(&origins, &directions, &Mat4::IDENTITY, &oracle, &SpawnParams::default())
        .unwrap_err();
    assert_eq!(
        err,
        ParticleError::View(ViewError::LengthMismatch {
            left: "origins",
            left_len: 3,
            right: "directions",
            right_len: 2,
        })
    );
    assert!(data.is_empty());

    let params = SpawnParams::default().with_size(ScalarRange::new(0.0, f32::NAN));
    let err = data
        .spawn_from_rays(&origins, &origins, &Mat4::IDENTITY, &oracle, &params)
        .unwrap_err();
    assert!(matches!(err, ParticleError::InvalidArgument(_)));
    assert!(data.is_empty());
}

#[test]
fn test_spawn_rejects_unsampleable_ranges() {
    let oracle = square_oracle();
    let origins = vec![Vec3::new(0.3, 0.2, 1.0); 4];
    let directions = vec![Vec3::NEG_Z; 4];
    let params = SpawnParams::default().with_mass(ScalarRange::new(-f32::MAX, f32::MAX));
    let mut data = ParticleData::with_seed(0);

    let err = data
        .spawn_from_rays(&origins, &directions, &Mat4::IDENTITY, &oracle, &params)
        .unwrap_err();
    assert!(matches!(err, ParticleError::InvalidArgument(_)));
    assert!(data.is_empty());
}

#[test]
fn test_spawn_without_rays_is_noop() {
    let oracle = square_oracle();
    let mut data = ParticleData::with_seed(0);
    let none: Vec<Vec3> = Vec::new();
    let spawned = data
        .spawn_from_rays(&none, &none, &Mat4::IDENTITY, &oracle, &SpawnParams::default())
        .unwrap();
    assert_eq!(spawned, 0);
    assert!(data.is_empty());
}

#[test]
fn test_append_preserves_order() {
    let mut first = ParticleData::with_seed(0);
    first.resize(2);
    first.size_mut().assign(&[1.0, 2.0]).unwrap();

    let mut second = ParticleData::with_seed(0);
    second.resize(3);
    second.size_mut().assign(&[3.0, 4.0, 5.0]).unwrap();

    first.append(&second);
    assert_eq!(first.size().as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_fields_consistent(&first);
}

#[test]
fn test_geometry_errors_convert() {
    let err: ParticleError = GeometryError::InvalidArgument("bad mesh".to_string()).into();
    assert_eq!(err.to_string(), "Invalid argument: bad mesh");
}

#[derive(Debug, Clone)]
enum Op {
    Resize(usize),
    Reserve(usize),
    Clear,
    AppendCopy,
    AgeAll(f32),
    DeleteDead,
    Spawn(usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..40).prop_map(Op::Resize),
        (0usize..40).prop_map(Op::Reserve),
        Just(Op::Clear),
        Just(Op::AppendCopy),
        (0.0f32..3.0).prop_map(Op::AgeAll),
        Just(Op::DeleteDead),
        (0usize..20).prop_map(Op::Spawn),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_fields_share_particle_count(ops in prop::collection::vec(arb_op(), 1..20)) {
        let oracle = square_oracle();
        let mut data = ParticleData::with_seed(1);

        for op in ops {
            match op {
                Op::Resize(n) => data.resize(n),
                Op::Reserve(n) => data.reserve(n),
                Op::Clear => data.clear(),
                Op::AppendCopy if data.num_particles() < 1000 => {
                    let copy = data.clone();
                    data.append(&copy);
                }
                Op::AppendCopy => {}
                Op::AgeAll(dt) => {
                    for age in data.age_mut().as_mut_slice() {
                        *age += dt;
                    }
                }
                Op::DeleteDead => {
                    data.delete_dead();
                }
                Op::Spawn(count) => {
                    let (origins, directions) = alternating_rays(count);
                    data.spawn_from_rays(
                        &origins,
                        &directions,
                        &Mat4::IDENTITY,
                        &oracle,
                        &SpawnParams::default(),
                    )
                    .unwrap();
                }
            }

            for name in data.field_names() {
                prop_assert_eq!(data.field_info(name).unwrap().len, data.num_particles());
            }
        }
    }

    #[test]
    fn prop_delete_dead_keeps_exactly_the_living(
        particles in prop::collection::vec((0u32..5, 0u32..5), 0..60)
    ) {
        let mut data = ParticleData::with_seed(2);
        data.resize(particles.len());
        let ages: Vec<f32> = particles.iter().map(|(age, _)| *age as f32).collect();
        let max_ages: Vec<f32> = particles.iter().map(|(_, max)| *max as f32).collect();
        // Tag every particle with its original index
        let tags: Vec<f32> = (0..particles.len()).map(|i| i as f32).collect();
        data.age_mut().assign(&ages).unwrap();
        data.max_age_mut().assign(&max_ages).unwrap();
        data.mass_mut().assign(&tags).unwrap();

        let removed = data.delete_dead();

        let mut expected: Vec<u32> = particles
            .iter()
            .enumerate()
            .filter(|(_, (age, max))| age < max)
            .map(|(i, _)| i as u32)
            .collect();
        let mut survivors: Vec<u32> = data.mass().iter().map(|tag| *tag as u32).collect();
        expected.sort_unstable();
        survivors.sort_unstable();

        prop_assert_eq!(removed, particles.len() - expected.len());
        prop_assert_eq!(survivors, expected);
        for i in 0..data.num_particles() {
            prop_assert!(data.age()[i] < data.max_age()[i]);
        }
    }
}
