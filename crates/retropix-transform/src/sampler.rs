//! Resampling strategies
//!
//! A sampler resolves a fractional source coordinate to one definite
//! output color. Beyond the classic nearest/bilinear/bicubic
//! interpolators, the pixel-art-aware strategies only ever answer with
//! colors that actually occur in the source (dominance ranking over the
//! bilinear corners, best-fit snapping of the bicubic estimate), so hard
//! edges survive re-projection instead of smearing.
//!
//! All samplers read the source through clamped pixel access; resolving
//! never fails, whatever the coordinate.

use retropix_core::{Palette, Raster, color};

use crate::error::{TransformError, TransformResult};

/// Sampling strategy selection
///
/// The shell-facing choice; [`Sampler::for_method`] turns the nine
/// direct methods into a concrete sampler. `MinimizeError` is a
/// composite that renders several samplers and blends them, so it has
/// no sampler of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleMethod {
    /// Nearest source pixel
    Nearest,
    /// 2x2 weighted corner blend
    Bilinear,
    /// 4x4 separable cubic interpolation
    Bicubic,
    /// Most dominant of the four bilinear corners
    FirstBilinear,
    /// Second most dominant of the four bilinear corners
    SecondBilinear,
    /// Bicubic snapped to the inner 2x2 neighborhood
    BestFitNarrow,
    /// Bicubic snapped to the full 4x4 neighborhood
    BestFitWide,
    /// Bicubic snapped to a palette
    BestFitAny,
    /// Weight of the most dominant corner, encoded in red
    FirstWeight,
    /// Weight of the second most dominant corner, encoded in red
    SecondWeight,
    /// Error-driven blend of the dominance ranks (composite)
    MinimizeError,
}

/// Candidate set for best-fit snapping
#[derive(Debug, Clone)]
pub enum BestFitMode {
    /// Snap to an external palette
    Palette(Palette),
    /// Snap to the inner 2x2 of the bicubic neighborhood
    Local2x2,
    /// Snap to the full 4x4 bicubic neighborhood
    Local4x4,
}

/// A resampling strategy bound to one source raster.
#[derive(Debug, Clone)]
pub enum Sampler {
    /// Round to the nearest source pixel.
    Nearest { source: Raster },
    /// Blend the 2x2 floor/ceil corners, alpha included.
    Bilinear { source: Raster },
    /// Separable cubic over the 4x4 neighborhood.
    Bicubic { source: Raster },
    /// Rank the bilinear corners by merged weight, return the color.
    BilinearDominance { source: Raster, rank: usize },
    /// Bicubic estimate snapped to the nearest candidate color.
    BicubicBestFit { source: Raster, mode: BestFitMode },
    /// Rank the bilinear corners by merged weight, return the weight.
    Weight { source: Raster, rank: usize },
}

impl Sampler {
    /// Build the sampler for a direct sampling method.
    ///
    /// The palette is only consulted for `BestFitAny`; the other methods
    /// ignore it.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::MissingPalette`] when `BestFitAny` is
    /// requested without a non-empty palette, and an invalid-parameter
    /// core error for the composite `MinimizeError`, which cannot be
    /// expressed as a single sampler.
    pub fn for_method(
        method: SampleMethod,
        source: &Raster,
        palette: Option<&Palette>,
    ) -> TransformResult<Sampler> {
        let source = source.clone();
        match method {
            SampleMethod::Nearest => Ok(Sampler::Nearest { source }),
            SampleMethod::Bilinear => Ok(Sampler::Bilinear { source }),
            SampleMethod::Bicubic => Ok(Sampler::Bicubic { source }),
            SampleMethod::FirstBilinear => Ok(Sampler::BilinearDominance { source, rank: 0 }),
            SampleMethod::SecondBilinear => Ok(Sampler::BilinearDominance { source, rank: 1 }),
            SampleMethod::BestFitNarrow => Ok(Sampler::BicubicBestFit {
                source,
                mode: BestFitMode::Local2x2,
            }),
            SampleMethod::BestFitWide => Ok(Sampler::BicubicBestFit {
                source,
                mode: BestFitMode::Local4x4,
            }),
            SampleMethod::BestFitAny => match palette {
                Some(palette) if !palette.is_empty() => Ok(Sampler::BicubicBestFit {
                    source,
                    mode: BestFitMode::Palette(palette.clone()),
                }),
                _ => Err(TransformError::MissingPalette),
            },
            SampleMethod::FirstWeight => Ok(Sampler::Weight { source, rank: 0 }),
            SampleMethod::SecondWeight => Ok(Sampler::Weight { source, rank: 1 }),
            SampleMethod::MinimizeError => Err(retropix_core::Error::InvalidParameter(
                "MinimizeError is a composite of several samplers".into(),
            )
            .into()),
        }
    }

    /// Get the source raster this sampler reads.
    #[inline]
    pub fn source(&self) -> &Raster {
        match self {
            Sampler::Nearest { source }
            | Sampler::Bilinear { source }
            | Sampler::Bicubic { source }
            | Sampler::BilinearDominance { source, .. }
            | Sampler::BicubicBestFit { source, .. }
            | Sampler::Weight { source, .. } => source,
        }
    }

    /// Resolve a fractional source coordinate to one packed pixel.
    pub fn resolve(&self, x: f32, y: f32) -> u32 {
        match self {
            Sampler::Nearest { source } => {
                source.get_pixel_clamped((x + 0.5) as i32, (y + 0.5) as i32)
            }
            Sampler::Bilinear { source } => bilinear(source, x, y),
            Sampler::Bicubic { source } => bicubic(source, x, y),
            Sampler::BilinearDominance { source, rank } => dominant_color(source, x, y, *rank),
            Sampler::BicubicBestFit { source, mode } => best_fit(source, x, y, mode),
            Sampler::Weight { source, rank } => dominant_weight(source, x, y, *rank),
        }
    }
}

// ============================================================================
// Interpolating samplers
// ============================================================================

/// Bilinear corner weights in A, B, C, D order: floor/floor, ceil/floor,
/// floor/ceil, ceil/ceil.
#[inline]
fn corner_weights(sx: f32, sy: f32) -> [f32; 4] {
    [
        (1.0 - sx) * (1.0 - sy),
        sx * (1.0 - sy),
        (1.0 - sx) * sy,
        sx * sy,
    ]
}

fn bilinear(source: &Raster, x: f32, y: f32) -> u32 {
    let x0 = x.floor() as i32;
    let x1 = x.ceil() as i32;
    let y0 = y.floor() as i32;
    let y1 = y.ceil() as i32;
    let corners = [
        source.get_pixel_clamped(x0, y0),
        source.get_pixel_clamped(x1, y0),
        source.get_pixel_clamped(x0, y1),
        source.get_pixel_clamped(x1, y1),
    ];
    let weights = corner_weights(x - x.floor(), y - y.floor());

    let mut acc = [0.0f32; 4];
    for (&pixel, w) in corners.iter().zip(weights) {
        let (r, g, b, a) = color::extract_rgba(pixel);
        acc[0] += w * r as f32;
        acc[1] += w * g as f32;
        acc[2] += w * b as f32;
        acc[3] += w * a as f32;
    }
    color::compose_rgba(acc[0] as u8, acc[1] as u8, acc[2] as u8, acc[3] as u8)
}

/// Cubic through four samples at parameter `t` in [0, 1], interpolating
/// between the middle two.
#[inline]
fn cubic(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    p1 + 0.5
        * t
        * (p2 - p0
            + t * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3 + t * (3.0 * (p1 - p2) + p3 - p0)))
}

/// One RGB channel of a packed pixel as a unit float.
#[inline]
fn channel_unit(pixel: u32, channel: usize) -> f32 {
    let v = match channel {
        0 => color::red(pixel),
        1 => color::green(pixel),
        _ => color::blue(pixel),
    };
    v as f32 / 255.0
}

/// Fill the 4x4 neighborhood around `(x, y)`.
///
/// Grid element `[i][j]` is the clamped pixel at
/// `(floor(x) - 1 + i, floor(y) - 1 + j)`; the returned pair is the
/// fractional offset within the inner cell.
fn bicubic_grid(source: &Raster, x: f32, y: f32) -> ([[u32; 4]; 4], f32, f32) {
    let fx = x.floor();
    let fy = y.floor();
    let mut grid = [[0u32; 4]; 4];
    for (i, column) in grid.iter_mut().enumerate() {
        for (j, cell) in column.iter_mut().enumerate() {
            *cell = source.get_pixel_clamped(fx as i32 - 1 + i as i32, fy as i32 - 1 + j as i32);
        }
    }
    (grid, x - fx, y - fy)
}

/// Continuous bicubic RGB on unit floats, each channel clamped to [0, 1].
///
/// Interpolates the four columns along y first, then the column results
/// along x.
fn bicubic_rgb(grid: &[[u32; 4]; 4], sx: f32, sy: f32) -> [f32; 3] {
    let mut out = [0.0f32; 3];
    for (channel, value) in out.iter_mut().enumerate() {
        let mut cols = [0.0f32; 4];
        for (i, column) in grid.iter().enumerate() {
            cols[i] = cubic(
                channel_unit(column[0], channel),
                channel_unit(column[1], channel),
                channel_unit(column[2], channel),
                channel_unit(column[3], channel),
                sy,
            );
        }
        *value = cubic(cols[0], cols[1], cols[2], cols[3], sx).clamp(0.0, 1.0);
    }
    out
}

fn bicubic(source: &Raster, x: f32, y: f32) -> u32 {
    let (grid, sx, sy) = bicubic_grid(source, x, y);
    let [r, g, b] = bicubic_rgb(&grid, sx, sy);
    color::compose_rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

// ============================================================================
// Corner dominance
// ============================================================================

/// Merged-weight census of the four bilinear corners.
///
/// Corners are visited in A, B, C, D order; a corner whose RGB exactly
/// matches an earlier entry folds its weight into that entry.
struct CornerCensus {
    colors: [u32; 4],
    weights: [f32; 4],
    count: usize,
}

impl CornerCensus {
    fn of(source: &Raster, x: f32, y: f32) -> Self {
        let x0 = x.floor() as i32;
        let x1 = x.ceil() as i32;
        let y0 = y.floor() as i32;
        let y1 = y.ceil() as i32;
        let corners = [
            source.get_pixel_clamped(x0, y0),
            source.get_pixel_clamped(x1, y0),
            source.get_pixel_clamped(x0, y1),
            source.get_pixel_clamped(x1, y1),
        ];
        let weights = corner_weights(x - x.floor(), y - y.floor());

        let mut census = CornerCensus {
            colors: [0; 4],
            weights: [0.0; 4],
            count: 0,
        };
        for (pixel, w) in corners.into_iter().zip(weights) {
            match census.colors[..census.count]
                .iter()
                .position(|&c| same_rgb(c, pixel))
            {
                Some(k) => census.weights[k] += w,
                None => {
                    census.colors[census.count] = pixel;
                    census.weights[census.count] = w;
                    census.count += 1;
                }
            }
        }
        census
    }

    /// Order entries `0..=rank` by descending weight (partial selection
    /// sort). Ties keep the earlier corner in front.
    fn order_by_weight(&mut self, rank: usize) {
        for round in 0..=rank.min(self.count - 1) {
            let mut max = round;
            for i in round + 1..self.count {
                if self.weights[i] > self.weights[max] {
                    max = i;
                }
            }
            if max != round {
                self.weights.swap(round, max);
                self.colors.swap(round, max);
            }
        }
    }
}

/// 24-bit RGB equality of two packed pixels.
#[inline]
fn same_rgb(a: u32, b: u32) -> bool {
    color::extract_rgb(a) == color::extract_rgb(b)
}

/// The `rank`-th most dominant corner color.
///
/// A single distinct color answers every rank; otherwise the rank is
/// capped at the last distinct entry.
fn dominant_color(source: &Raster, x: f32, y: f32, rank: usize) -> u32 {
    let mut census = CornerCensus::of(source, x, y);
    let rank = rank.min(census.count - 1);
    census.order_by_weight(rank);
    census.colors[rank]
}

/// The merged weight of the `rank`-th most dominant corner, scaled to
/// 0-255 in the red channel. Black when fewer than `rank + 1` distinct
/// corners exist.
fn dominant_weight(source: &Raster, x: f32, y: f32, rank: usize) -> u32 {
    let mut census = CornerCensus::of(source, x, y);
    if census.count <= rank {
        return color::compose_rgb(0, 0, 0);
    }
    census.order_by_weight(rank);
    color::compose_rgb((census.weights[rank] * 255.0) as u8, 0, 0)
}

// ============================================================================
// Best-fit snapping
// ============================================================================

fn best_fit(source: &Raster, x: f32, y: f32, mode: &BestFitMode) -> u32 {
    let (grid, sx, sy) = bicubic_grid(source, x, y);
    let [r, g, b] = bicubic_rgb(&grid, sx, sy);

    match mode {
        BestFitMode::Palette(palette) => {
            let qr = (r * 255.0) as u8;
            let qg = (g * 255.0) as u8;
            let qb = (b * 255.0) as u8;
            // Construction rejects empty palettes; the fallback keeps
            // resolve total.
            palette
                .find_nearest(qr, qg, qb)
                .unwrap_or_else(|| color::compose_rgb(qr, qg, qb))
        }
        BestFitMode::Local2x2 => nearest_in_grid(&grid, r, g, b, 1, 2),
        BestFitMode::Local4x4 => nearest_in_grid(&grid, r, g, b, 0, 3),
    }
}

/// Snap `(r, g, b)` to the nearest grid pixel among columns and rows
/// `from..=to` by squared unit-float RGB distance.
///
/// Scans columns outer, rows inner, with strict `<` improvement, so on
/// ties the first-encountered candidate wins; an exact match returns
/// immediately. The winner comes back with its original 8-bit channels
/// and opaque alpha.
fn nearest_in_grid(grid: &[[u32; 4]; 4], r: f32, g: f32, b: f32, from: usize, to: usize) -> u32 {
    let mut best = grid[from][from];
    let mut best_dist = f32::MAX;
    for column in &grid[from..=to] {
        for &pixel in &column[from..=to] {
            let dr = channel_unit(pixel, 0) - r;
            let dg = channel_unit(pixel, 1) - g;
            let db = channel_unit(pixel, 2) - b;
            let dist = dr * dr + dg * dg + db * db;
            if dist < best_dist {
                best_dist = dist;
                best = pixel;
                if dist == 0.0 {
                    let (br, bg, bb) = color::extract_rgb(best);
                    return color::compose_rgb(br, bg, bb);
                }
            }
        }
    }
    let (br, bg, bb) = color::extract_rgb(best);
    color::compose_rgb(br, bg, bb)
}
