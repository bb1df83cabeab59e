//! HSV color helpers
//!
//! Colors are `Vec3` triples with all channels in `[0, 1]`. In HSV form the
//! components are `(hue, saturation, value)` with hue in `[0, 1)`.

use glam::Vec3;
use painticle_utils::{ensure_same_len, fill_parallel};

use crate::error::Result;

/// Wrap a hue into `[0, 1)`
#[inline]
fn wrap_hue(hue: f32) -> f32 {
    let wrapped = hue.rem_euclid(1.0);
    // rem_euclid rounds tiny negative inputs up to exactly 1.0
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}

pub fn rgb_to_hsv(rgb: Vec3) -> Vec3 {
    let max = rgb.max_element();
    let min = rgb.min_element();

    if min == max {
        return Vec3::new(0.0, 0.0, max);
    }

    let range = max - min;
    let saturation = range / max;
    let rc = (max - rgb.x) / range;
    let gc = (max - rgb.y) / range;
    let bc = (max - rgb.z) / range;

    let hue = if rgb.x == max {
        bc - gc
    } else if rgb.y == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    Vec3::new(wrap_hue(hue / 6.0), saturation, max)
}

pub fn hsv_to_rgb(hsv: Vec3) -> Vec3 {
    let (h, s, v) = (hsv.x, hsv.y, hsv.z);
    if s == 0.0 {
        return Vec3::splat(v);
    }

    let hh = wrap_hue(h) * 6.0;
    let sector = hh.floor();
    let f = hh - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    match sector as u32 % 6 {
        0 => Vec3::new(v, t, p),
        1 => Vec3::new(q, v, p),
        2 => Vec3::new(p, v, t),
        3 => Vec3::new(p, q, v),
        4 => Vec3::new(t, p, v),
        _ => Vec3::new(v, p, q),
    }
}

/// Shift `rgb` by `hsv_offset` in HSV space
///
/// Hue wraps around, saturation and value are clamped to `[0, 1]`.
pub fn apply_hsv_offset(rgb: Vec3, hsv_offset: Vec3) -> Vec3 {
    let hsv = rgb_to_hsv(rgb) + hsv_offset;
    hsv_to_rgb(Vec3::new(
        wrap_hue(hsv.x),
        hsv.y.clamp(0.0, 1.0),
        hsv.z.clamp(0.0, 1.0),
    ))
}

/// [`rgb_to_hsv`] over a batch, in parallel
pub fn rgb_to_hsv_batch(rgb: &[Vec3], results: &mut [Vec3]) -> Result<()> {
    ensure_same_len("rgb", rgb.len(), "results", results.len())?;
    fill_parallel(results, |i| rgb_to_hsv(rgb[i]));
    Ok(())
}

/// [`hsv_to_rgb`] over a batch, in parallel
pub fn hsv_to_rgb_batch(hsv: &[Vec3], results: &mut [Vec3]) -> Result<()> {
    ensure_same_len("hsv", hsv.len(), "results", results.len())?;
    fill_parallel(results, |i| hsv_to_rgb(hsv[i]));
    Ok(())
}

/// [`apply_hsv_offset`] over a batch, in parallel
///
/// Either input may hold a single value, which is then applied to every
/// element of the other. Otherwise `rgb`, `hsv_offsets` and `results` must
/// all have the same length.
pub fn apply_hsv_offsets(rgb: &[Vec3], hsv_offsets: &[Vec3], results: &mut [Vec3]) -> Result<()> {
    if let [color] = rgb {
        ensure_same_len("hsv_offsets", hsv_offsets.len(), "results", results.len())?;
        fill_parallel(results, |i| apply_hsv_offset(*color, hsv_offsets[i]));
    } else if let [offset] = hsv_offsets {
        ensure_same_len("rgb", rgb.len(), "results", results.len())?;
        fill_parallel(results, |i| apply_hsv_offset(rgb[i], *offset));
    } else {
        ensure_same_len("rgb", rgb.len(), "hsv_offsets", hsv_offsets.len())?;
        ensure_same_len("rgb", rgb.len(), "results", results.len())?;
        fill_parallel(results, |i| apply_hsv_offset(rgb[i], hsv_offsets[i]));
    }
    Ok(())
}
