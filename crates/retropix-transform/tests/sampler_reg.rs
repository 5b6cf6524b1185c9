//! Sampler regression test
//!
//! 支配色・最適合致サンプラーが元画像の色だけを返すことをテスト。

use retropix_core::{Palette, Raster, RasterMut, color};
use retropix_test::{RegParams, gradient_raster, raster_from_rgb, uniform_raster};
use retropix_transform::{SampleMethod, Sampler};

fn sampler(method: SampleMethod, source: &Raster) -> Sampler {
    Sampler::for_method(method, source, None).expect("sampler")
}

/// Resolve every integer coordinate of the source into a new raster.
fn resolve_grid(s: &Sampler) -> Raster {
    let source = s.source();
    let mut out =
        RasterMut::new(source.width(), source.height(), source.has_alpha()).expect("grid");
    for y in 0..source.height() {
        for x in 0..source.width() {
            out.set_pixel_unchecked(x, y, s.resolve(x as f32, y as f32));
        }
    }
    out.into()
}

#[test]
fn sampler_reg() {
    let mut rp = RegParams::new("sampler");

    // --- Test 1: every interpolator reproduces the source on the grid ---
    let gradient = gradient_raster(6, 4).expect("gradient");
    for method in [
        SampleMethod::Nearest,
        SampleMethod::Bilinear,
        SampleMethod::Bicubic,
        SampleMethod::FirstBilinear,
        SampleMethod::BestFitNarrow,
        SampleMethod::BestFitWide,
    ] {
        let out = resolve_grid(&sampler(method, &gradient));
        rp.compare_rasters(&gradient, &out);
    }
    eprintln!("  integer grid: all samplers exact");

    // --- Test 2: dominance flips cleanly across a two-color border ---
    #[rustfmt::skip]
    let halves = raster_from_rgb(4, 2, &[
        (200, 0, 0), (200, 0, 0), (0, 0, 200), (0, 0, 200),
        (200, 0, 0), (200, 0, 0), (0, 0, 200), (0, 0, 200),
    ]).expect("halves");
    let red = color::compose_rgb(200, 0, 0);
    let blue = color::compose_rgb(0, 0, 200);
    let first = sampler(SampleMethod::FirstBilinear, &halves);
    // Tie on the border goes to the earlier corner (red side).
    rp.compare_values(red as f64, first.resolve(1.5, 0.5) as f64, 0.0);
    rp.compare_values(red as f64, first.resolve(1.25, 0.5) as f64, 0.0);
    rp.compare_values(blue as f64, first.resolve(1.75, 0.5) as f64, 0.0);
    eprintln!("  dominance: border flip");

    // --- Test 3: dominance and best-fit never invent colors ---
    let mut invented = 0u32;
    for method in [
        SampleMethod::FirstBilinear,
        SampleMethod::SecondBilinear,
        SampleMethod::BestFitNarrow,
        SampleMethod::BestFitWide,
    ] {
        let s = sampler(method, &gradient);
        for step_y in 0..12 {
            for step_x in 0..20 {
                let value = s.resolve(step_x as f32 * 0.3, step_y as f32 * 0.3);
                if !gradient.data().contains(&value) {
                    invented += 1;
                }
            }
        }
    }
    rp.compare_values(0.0, invented as f64, 0.0);
    eprintln!("  source colors only: {invented} inventions");

    // --- Test 4: palette best-fit answers only palette entries ---
    let mut palette = Palette::new();
    for &pixel in gradient.data() {
        palette.push_new(pixel);
    }
    let any = Sampler::for_method(SampleMethod::BestFitAny, &gradient, Some(&palette))
        .expect("palette sampler");
    let mut off_palette = 0u32;
    for step_y in 0..12 {
        for step_x in 0..20 {
            let value = any.resolve(step_x as f32 * 0.3, step_y as f32 * 0.3);
            if !palette.contains(value) {
                off_palette += 1;
            }
        }
    }
    rp.compare_values(0.0, off_palette as f64, 0.0);
    eprintln!("  palette best-fit: {off_palette} off-palette answers");

    // --- Test 5: weight samplers encode the corner split in red ---
    let pair = raster_from_rgb(2, 1, &[(1, 0, 0), (2, 0, 0)]).expect("pair");
    let first_w = sampler(SampleMethod::FirstWeight, &pair);
    let second_w = sampler(SampleMethod::SecondWeight, &pair);
    rp.compare_values(191.0, red_of(first_w.resolve(0.25, 0.0)), 0.0);
    rp.compare_values(63.0, red_of(second_w.resolve(0.25, 0.0)), 0.0);
    rp.compare_values(127.0, red_of(first_w.resolve(0.5, 0.0)), 0.0);
    rp.compare_values(127.0, red_of(second_w.resolve(0.5, 0.0)), 0.0);

    let flat = uniform_raster(2, 2, (9, 9, 9)).expect("flat");
    let lone_first = sampler(SampleMethod::FirstWeight, &flat);
    let lone_second = sampler(SampleMethod::SecondWeight, &flat);
    rp.compare_values(255.0, red_of(lone_first.resolve(0.5, 0.5)), 0.0);
    rp.compare_values(0.0, red_of(lone_second.resolve(0.5, 0.5)), 0.0);
    eprintln!("  weights: split encoded");

    assert!(rp.cleanup(), "sampler regression test failed");
}

fn red_of(pixel: u32) -> f64 {
    color::red(pixel) as f64
}
