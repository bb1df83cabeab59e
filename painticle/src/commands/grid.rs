//! Hashed grid build statistics

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use painticle_grid::{HashedGrid, NUM_HASHED_GRID_ENTRIES};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::scene;
use crate::utils::{create_property_table, format_millis, format_percentage, format_rate};

#[derive(Args, Debug, Clone)]
pub struct GridArgs {
    /// Number of random points to index
    #[arg(short, long, default_value_t = 100_000)]
    pub points: usize,

    /// Edge length of one grid cell
    #[arg(long, default_value_t = 0.05)]
    pub voxel_size: f32,

    /// Points are spread over the cube [-extent, extent]^3
    #[arg(short, long, default_value_t = 1.0)]
    pub extent: f32,

    /// Seed for the point cloud (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: &GridArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let points = scene::random_points(&mut rng, args.points, args.extent);

    let mut grid = HashedGrid::try_new(args.voxel_size).context("Invalid voxel size")?;
    let start = Instant::now();
    grid.build(&points);
    let build_time = start.elapsed();

    let stats = grid.bucket_stats();
    let fill = 100.0 * stats.populated as f64 / f64::from(NUM_HASHED_GRID_ENTRIES);

    let table = create_property_table(&[
        ("Points", stats.particles.to_string()),
        ("Voxel size", args.voxel_size.to_string()),
        ("Extent", args.extent.to_string()),
        ("Populated buckets", stats.populated.to_string()),
        ("Bucket fill", format_percentage(fill)),
        ("Largest bucket", stats.largest.to_string()),
        ("Mean occupancy", format!("{:.2}", stats.mean)),
        ("Build time", format_millis(build_time)),
        ("Throughput", format_rate(stats.particles, build_time)),
    ]);

    println!("Hashed Grid");
    println!("===========");
    println!();
    table.printstd();

    Ok(())
}
