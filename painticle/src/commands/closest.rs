//! Closest surface point query

use anyhow::{Result, bail};
use clap::Args;
use glam::Vec3;
use painticle_geometry::GeometryOracle;

use crate::scene;
use crate::utils::{create_property_table, format_vec3};

#[derive(Args, Debug, Clone)]
pub struct ClosestArgs {
    /// Number of quads along each side of the generated plane
    #[arg(short, long, default_value_t = 32)]
    pub resolution: u32,

    /// Query point as x,y,z
    #[arg(short, long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub point: Vec3,
}

/// Parse a point given as `x,y,z`
fn parse_vec3(value: &str) -> std::result::Result<Vec3, String> {
    let components: Vec<f32> = value
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("invalid coordinate in '{value}': {e}"))?;

    match components[..] {
        [x, y, z] => Ok(Vec3::new(x, y, z)),
        _ => Err(format!(
            "expected 3 comma-separated coordinates, got {}",
            components.len()
        )),
    }
}

pub fn execute(args: &ClosestArgs) -> Result<()> {
    let oracle = GeometryOracle::new(scene::wavy_plane(args.resolution));
    let info = oracle.closest_point(args.point);

    if !info.is_hit() {
        bail!("No surface found near {}", format_vec3(args.point));
    }

    let table = create_property_table(&[
        ("Query", format_vec3(args.point)),
        ("Location", format_vec3(info.location)),
        ("Normal", format_vec3(info.normal)),
        ("Triangle", info.tri_index.to_string()),
        ("Barycentrics", format_vec3(info.barycentrics)),
        ("Distance", format!("{:.4}", info.location.distance(args.point))),
    ]);

    println!("Closest Point");
    println!("=============");
    println!();
    table.printstd();

    Ok(())
}
