//! Quad-to-quad raster transformation
//!
//! Re-projects a source raster into the bounding box of a target quad.
//! Both ends are expressed as unit-square mappings and chained through
//! the square: the projective path composes the two matrices into one
//! destination-to-source homography, the bilinear path inverts the
//! corner blend of the target quad per pixel. Destination pixels whose
//! pre-image falls outside the source become transparent zero.

use retropix_core::{Raster, RasterMut};

use crate::error::TransformResult;
use crate::geometry::{Matrix3, Point, Rect, inv_bilinear, map_unit_square_to_quad};
use crate::mapping::QuadMapping;
use crate::sampler::Sampler;

/// The pixel written where a destination coordinate has no source
/// pre-image: transparent zero.
pub const BLANK: u32 = 0;

/// Geometric mapping selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMethod {
    /// Pass the source through unchanged
    Identity,
    /// Homography through the unit square
    Projective,
    /// Inverse bilinear corner blend of the target quad
    Bilinear,
}

/// Re-project the sampler's source into the target mapping's bounds.
///
/// The output raster spans the target bounds' truncated pixel size and
/// copies the source's alpha flag. `Identity` returns the source
/// itself and ignores the target.
///
/// # Errors
///
/// Degenerate target quads fail with
/// [`DegenerateQuad`](crate::TransformError::DegenerateQuad), and a
/// target whose bounds truncate to zero pixels on either axis fails
/// with the core invalid-dimension error.
pub fn transform(
    sampler: &Sampler,
    target: &QuadMapping,
    method: TransformMethod,
) -> TransformResult<Raster> {
    match method {
        TransformMethod::Identity => Ok(sampler.source().clone()),
        TransformMethod::Projective => projective_pass(sampler, target),
        TransformMethod::Bilinear => bilinear_pass(sampler, target),
    }
}

/// Unit-square matrix of the source raster's full pixel rect.
fn source_unit_matrix(source: &Raster) -> TransformResult<Matrix3> {
    let rect = Rect::new(0.0, 0.0, source.width() as f32, source.height() as f32);
    map_unit_square_to_quad(QuadMapping::from_rect(rect).local_quad())
}

fn projective_pass(sampler: &Sampler, target: &QuadMapping) -> TransformResult<Raster> {
    let source = sampler.source();
    let uv_to_target = map_unit_square_to_quad(target.local_quad())?;
    let uv_to_source = source_unit_matrix(source)?;
    let target_to_source = uv_to_source.mul(&uv_to_target.inverse()?);

    let src_w = source.width() as f32;
    let src_h = source.height() as f32;
    let mut out = RasterMut::new(target.pixel_width(), target.pixel_height(), source.has_alpha())?;
    for y in 0..out.height() {
        for x in 0..out.width() {
            let (tx, ty, tz) = target_to_source.apply(x as f32, y as f32);
            let sx = tx / tz;
            let sy = ty / tz;
            let pixel = if sx >= 0.0 && sx < src_w && sy >= 0.0 && sy < src_h {
                sampler.resolve(sx, sy)
            } else {
                BLANK
            };
            out.set_pixel_unchecked(x, y, pixel);
        }
    }
    Ok(out.into())
}

fn bilinear_pass(sampler: &Sampler, target: &QuadMapping) -> TransformResult<Raster> {
    let source = sampler.source();
    let uv_to_source = source_unit_matrix(source)?;
    let quad = target.local_quad();

    let src_w = source.width() as f32;
    let src_h = source.height() as f32;
    let mut out = RasterMut::new(target.pixel_width(), target.pixel_height(), source.has_alpha())?;
    for y in 0..out.height() {
        for x in 0..out.width() {
            // NaN from a collapsed edge fails both range checks.
            let (u, v) = inv_bilinear(Point::new(x as f32, y as f32), quad);
            let pixel = if (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) {
                let (tx, ty, tz) = uv_to_source.apply(u, v);
                let sx = tx / tz;
                let sy = ty / tz;
                if sx >= 0.0 && sx < src_w && sy >= 0.0 && sy < src_h {
                    sampler.resolve(sx, sy)
                } else {
                    BLANK
                }
            } else {
                BLANK
            };
            out.set_pixel_unchecked(x, y, pixel);
        }
    }
    Ok(out.into())
}
