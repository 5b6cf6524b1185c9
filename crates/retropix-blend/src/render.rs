//! Shell-facing render dispatch
//!
//! One entry point covering every sampling selection: the nine direct
//! methods build a sampler and transform once, and the minimize-error
//! composite stacks four renders and blends them. This is the seam the
//! application shell calls with the raster, quad, and control values it
//! collected.

use retropix_core::{Palette, Raster};
use retropix_transform::{QuadMapping, SampleMethod, Sampler, TransformMethod, transform};

use crate::blend::{collect_colors, compare, minimize_error};
use crate::error::BlendResult;

/// Render the source through the target mapping with the chosen
/// sampling strategy.
///
/// `palette` only matters for `BestFitAny`; when the caller passes none
/// the source's own colors are collected instead. `threshold` only
/// matters for `MinimizeError`: it arrives in [0, 1] and is squared
/// before gating the swap. The composite renders the first-dominance
/// image, then swaps in the second-dominance color where the first
/// deviates hardest from the bicubic reference and the second rank
/// carried enough weight.
///
/// # Errors
///
/// Forwards transform failures (degenerate quads, zero-sized targets)
/// and blend size mismatches.
pub fn render(
    source: &Raster,
    method: TransformMethod,
    target: &QuadMapping,
    sample_method: SampleMethod,
    palette: Option<&Palette>,
    threshold: f32,
) -> BlendResult<Raster> {
    match sample_method {
        SampleMethod::MinimizeError => {
            let first = render_direct(source, method, target, SampleMethod::FirstBilinear, None)?;
            let second = render_direct(source, method, target, SampleMethod::SecondBilinear, None)?;
            let reference = render_direct(source, method, target, SampleMethod::Bicubic, None)?;
            let second_weight =
                render_direct(source, method, target, SampleMethod::SecondWeight, None)?;
            minimize_error(
                &first,
                &second,
                &reference,
                &second_weight,
                threshold * threshold,
            )
        }
        SampleMethod::BestFitAny if palette.is_none() => {
            let collected = collect_colors(source);
            render_direct(source, method, target, sample_method, Some(&collected))
        }
        _ => render_direct(source, method, target, sample_method, palette),
    }
}

fn render_direct(
    source: &Raster,
    method: TransformMethod,
    target: &QuadMapping,
    sample_method: SampleMethod,
    palette: Option<&Palette>,
) -> BlendResult<Raster> {
    let sampler = Sampler::for_method(sample_method, source, palette)?;
    Ok(transform(&sampler, target, method)?)
}

/// Difference map of a finished render against the bicubic reference.
///
/// Renders the source bicubically through the same mapping and returns
/// `compare(reference, result)` — the inspection view behind the
/// minimize-error gate.
///
/// # Errors
///
/// Fails like [`render`] does, or with a size mismatch when `result`
/// does not match the mapping's pixel size.
pub fn diff_against_bicubic(
    source: &Raster,
    target: &QuadMapping,
    method: TransformMethod,
    result: &Raster,
) -> BlendResult<Raster> {
    let reference = render_direct(source, method, target, SampleMethod::Bicubic, None)?;
    compare(&reference, result)
}
