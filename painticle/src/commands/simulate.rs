//! Particle simulation loop over a generated plane

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use glam::{Mat4, Vec3};
use log::info;
use painticle_geometry::GeometryOracle;
use painticle_grid::HashedGrid;
use painticle_particles::{ParticleData, ScalarRange, SpawnParams};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::scene;
use crate::utils::{add_table_row, create_progress_bar, create_table, format_millis, format_rate};

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of quads along each side of the generated plane
    #[arg(short, long, default_value_t = 64)]
    pub resolution: u32,

    /// Spawn rays cast per tick
    #[arg(long, default_value_t = 1000)]
    pub rays: usize,

    /// Number of simulation ticks
    #[arg(short, long, default_value_t = 20)]
    pub ticks: usize,

    /// Seconds each tick advances particle ages by
    #[arg(long, default_value_t = 0.1)]
    pub dt: f32,

    /// Edge length of one hashed grid cell
    #[arg(long, default_value_t = 0.05)]
    pub voxel_size: f32,

    /// Initial particle speed along the ray
    #[arg(long, default_value_t = 0.5)]
    pub speed: f32,

    /// Random share of the speed added per axis, between 0 and 1
    #[arg(long, default_value_t = 0.2)]
    pub speed_random: f32,

    /// Seed for rays and particle attributes (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl SimulateArgs {
    fn spawn_params(&self) -> SpawnParams {
        SpawnParams::default()
            .with_speed(ScalarRange::constant(self.speed))
            .with_speed_jitter(Vec3::splat(0.5 * self.speed * self.speed_random))
    }
}

pub fn execute(args: &SimulateArgs, quiet: bool) -> Result<()> {
    let params = args.spawn_params();
    params.validate().context("Invalid simulation parameters")?;

    let start = Instant::now();
    let oracle = GeometryOracle::new(scene::wavy_plane(args.resolution));
    info!(
        "Built oracle over {} triangles in {}",
        oracle.mesh().triangle_count(),
        format_millis(start.elapsed())
    );

    let (mut particles, mut ray_rng) = match args.seed {
        Some(seed) => (
            ParticleData::with_seed(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (ParticleData::new(), StdRng::from_os_rng()),
    };
    let mut grid = HashedGrid::try_new(args.voxel_size).context("Invalid voxel size")?;

    let mut table = create_table(&["Tick", "Spawned", "Removed", "Alive", "Buckets", "Spawn", "Grid"]);
    let pb = create_progress_bar(args.ticks as u64, "Simulating", quiet);

    for tick in 0..args.ticks {
        let (origins, directions) = scene::downward_rays(&mut ray_rng, args.rays);

        let spawn_start = Instant::now();
        let spawned = particles
            .spawn_from_rays(&origins, &directions, &Mat4::IDENTITY, &oracle, &params)
            .with_context(|| format!("Failed to spawn particles in tick {tick}"))?;
        let spawn_time = spawn_start.elapsed();

        for age in particles.age_mut().as_mut_slice() {
            *age += args.dt;
        }
        let removed = particles.delete_dead();

        let grid_start = Instant::now();
        grid.build(particles.location().as_slice());
        let grid_time = grid_start.elapsed();

        add_table_row(
            &mut table,
            vec![
                tick.to_string(),
                spawned.to_string(),
                removed.to_string(),
                particles.num_particles().to_string(),
                grid.bucket_stats().populated.to_string(),
                format_millis(spawn_time),
                format_millis(grid_time),
            ],
        );
        pb.inc(1);
    }
    pb.finish_and_clear();

    if !quiet {
        println!("Simulation on a {0}x{0} plane", args.resolution);
        println!();
        table.printstd();
        println!();

        let total = start.elapsed();
        println!(
            "{} ticks in {} ({}), {} particles alive",
            args.ticks,
            format_millis(total),
            format_rate(args.ticks, total),
            particles.num_particles()
        );
    }

    Ok(())
}
