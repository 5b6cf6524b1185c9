//! Error-driven comparison and selection
//!
//! Two renders of the same target can each be wrong in different places;
//! these functions find out where. [`compare`] produces a smoothed signed
//! difference map centered at neutral gray, [`choose`] swaps in the
//! second render only where that map peaks hard enough, and
//! [`minimize_error`] wires the two together against a reference render.

use retropix_core::{Palette, Raster, RasterMut, color};

use crate::error::BlendResult;

/// Difference-map channel value meaning "no difference".
pub const NEUTRAL: u8 = 127;

/// 3x3 binomial smoothing kernel, weights over 16.
const KERNEL: [[f32; 3]; 3] = [[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]];

/// Collect the exact-distinct colors of a raster, first-seen order.
///
/// The scan runs column by column (x outer, y inner). The order is
/// observable: it decides which entry wins [`Palette::find_nearest`]
/// ties during best-fit sampling.
pub fn collect_colors(buffer: &Raster) -> Palette {
    let mut palette = Palette::new();
    for x in 0..buffer.width() {
        for y in 0..buffer.height() {
            palette.push_new(buffer.get_pixel_unchecked(x, y));
        }
    }
    palette
}

/// Build the smoothed signed difference map of two equal-sized rasters.
///
/// Per pixel and RGB channel the kernel-weighted channel differences of
/// the 3x3 neighborhood (edge-clamped) are summed around one half, then
/// scaled back to 8 bits with clamping; identical neighborhoods land on
/// exactly ([`NEUTRAL`], [`NEUTRAL`], [`NEUTRAL`]). Values above neutral
/// mean `a` overshoots `b`. The map carries no alpha.
///
/// # Errors
///
/// Returns the core incompatible-sizes error when the rasters differ in
/// width or height.
pub fn compare(a: &Raster, b: &Raster) -> BlendResult<Raster> {
    check_same_size(a, b)?;

    let mut out = RasterMut::new(a.width(), a.height(), false)?;
    for y in 0..a.height() {
        for x in 0..a.width() {
            let mut acc = [0.5f32; 3];
            for (j, row) in KERNEL.iter().enumerate() {
                for (i, &k) in row.iter().enumerate() {
                    let nx = x as i32 + i as i32 - 1;
                    let ny = y as i32 + j as i32 - 1;
                    let pa = a.get_pixel_clamped(nx, ny);
                    let pb = b.get_pixel_clamped(nx, ny);
                    let w = k / 16.0;
                    acc[0] += w * (color::red(pa) as f32 - color::red(pb) as f32) / 255.0;
                    acc[1] += w * (color::green(pa) as f32 - color::green(pb) as f32) / 255.0;
                    acc[2] += w * (color::blue(pa) as f32 - color::blue(pb) as f32) / 255.0;
                }
            }
            let pixel = color::compose_rgb(
                (acc[0] * 255.0).clamp(0.0, 255.0) as u8,
                (acc[1] * 255.0).clamp(0.0, 255.0) as u8,
                (acc[2] * 255.0).clamp(0.0, 255.0) as u8,
            );
            out.set_pixel_unchecked(x, y, pixel);
        }
    }
    Ok(out.into())
}

/// Squared deviation from neutral, summed over RGB, per pixel.
fn error_magnitudes(error_map: &Raster) -> Vec<f32> {
    error_map
        .data()
        .iter()
        .map(|&pixel| {
            let (r, g, b) = color::extract_rgb(pixel);
            let dr = r as i32 - NEUTRAL as i32;
            let dg = g as i32 - NEUTRAL as i32;
            let db = b as i32 - NEUTRAL as i32;
            (dr * dr + dg * dg + db * db) as f32
        })
        .collect()
}

/// Whether the magnitude at `(x, y)` is >= all 8 edge-clamped neighbors.
fn is_local_maximum(mags: &[f32], width: u32, height: u32, x: u32, y: u32) -> bool {
    let center = mags[(y * width + x) as usize];
    for dy in -1i32..=1 {
        for dx in -1i32..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let nx = (x as i32 + dx).clamp(0, width as i32 - 1) as u32;
            let ny = (y as i32 + dy).clamp(0, height as i32 - 1) as u32;
            if center < mags[(ny * width + nx) as usize] {
                return false;
            }
        }
    }
    true
}

/// Select between two renders pixel by pixel.
///
/// A pixel takes `b` only when its difference magnitude times the
/// weight map's red channel clears `threshold * 3 * 127^2` AND the
/// magnitude is a local maximum among its 8 neighbors; everywhere else
/// `a` wins. The local-maximum gate keeps smeared single-pixel noise
/// from flipping whole regions.
///
/// # Errors
///
/// All four rasters must share `a`'s size; any mismatch is the core
/// incompatible-sizes error.
pub fn choose(
    a: &Raster,
    b: &Raster,
    error_map: &Raster,
    weight_map: &Raster,
    threshold: f32,
) -> BlendResult<Raster> {
    check_same_size(a, b)?;
    check_same_size(a, error_map)?;
    check_same_size(a, weight_map)?;

    let width = a.width();
    let height = a.height();
    let mags = error_magnitudes(error_map);
    let limit = threshold * 3.0 * 127.0 * 127.0;

    let mut out = RasterMut::new(width, height, a.has_alpha())?;
    for y in 0..height {
        for x in 0..width {
            let weight = color::red(weight_map.get_pixel_unchecked(x, y)) as f32;
            let mag = mags[(y * width + x) as usize];
            let swap = mag.sqrt() * weight > limit
                && is_local_maximum(&mags, width, height, x, y);
            let pick = if swap { b } else { a };
            out.set_pixel_unchecked(x, y, pick.get_pixel_unchecked(x, y));
        }
    }
    Ok(out.into())
}

/// Swap `second` into `first` where `first` deviates hardest from
/// `reference`.
///
/// The composite of [`compare`] and [`choose`]: the error map is
/// `compare(reference, first)` and the weight map is the second-rank
/// dominance weight of the same render. The threshold arrives already
/// squared.
///
/// # Errors
///
/// Size mismatches between any of the four rasters are core
/// incompatible-sizes errors.
pub fn minimize_error(
    first: &Raster,
    second: &Raster,
    reference: &Raster,
    second_weight: &Raster,
    threshold: f32,
) -> BlendResult<Raster> {
    let error_map = compare(reference, first)?;
    choose(first, second, &error_map, second_weight, threshold)
}

fn check_same_size(a: &Raster, b: &Raster) -> BlendResult<()> {
    if !a.sizes_equal(b) {
        return Err(retropix_core::Error::IncompatibleSizes(
            a.width(),
            a.height(),
            b.width(),
            b.height(),
        )
        .into());
    }
    Ok(())
}
