//! Transform regression test
//!
//! 四角形再投影の射影・双線形経路と逆双線形の往復をテスト。

use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use retropix_core::Raster;
use retropix_test::{RegParams, gradient_raster, raster_from_rgb, uniform_raster};
use retropix_transform::{
    BLANK, Point, QuadMapping, Rect, SampleMethod, Sampler, TransformMethod, forward_bilinear,
    inv_bilinear, transform,
};

fn nearest(source: &Raster) -> Sampler {
    Sampler::for_method(SampleMethod::Nearest, source, None).expect("nearest sampler")
}

#[test]
fn transform_reg() {
    let mut rp = RegParams::new("transform");

    // --- Test 1: projective rect-to-rect at scale 1 is a copy ---
    let gradient = gradient_raster(7, 5).expect("gradient");
    let same_rect = QuadMapping::from_rect(Rect::new(0.0, 0.0, 7.0, 5.0));
    let copied =
        transform(&nearest(&gradient), &same_rect, TransformMethod::Projective).expect("copy");
    rp.compare_rasters(&gradient, &copied);
    eprintln!("  projective: rect copy");

    // --- Test 2: identity ignores the target quad ---
    let elsewhere = QuadMapping::from_rect(Rect::new(0.0, 0.0, 3.0, 3.0));
    let untouched =
        transform(&nearest(&gradient), &elsewhere, TransformMethod::Identity).expect("identity");
    rp.compare_rasters(&gradient, &untouched);

    // --- Test 3: doubling 2x2 with nearest replicates whole pixels ---
    let tiny = raster_from_rgb(2, 2, &[(1, 0, 0), (2, 0, 0), (3, 0, 0), (4, 0, 0)]).expect("tiny");
    let double_rect = QuadMapping::from_rect(Rect::new(0.0, 0.0, 4.0, 4.0));
    let doubled =
        transform(&nearest(&tiny), &double_rect, TransformMethod::Projective).expect("doubled");
    #[rustfmt::skip]
    let expected = raster_from_rgb(4, 4, &[
        (1, 0, 0), (2, 0, 0), (2, 0, 0), (2, 0, 0),
        (3, 0, 0), (4, 0, 0), (4, 0, 0), (4, 0, 0),
        (3, 0, 0), (4, 0, 0), (4, 0, 0), (4, 0, 0),
        (3, 0, 0), (4, 0, 0), (4, 0, 0), (4, 0, 0),
    ]).expect("expected");
    rp.compare_rasters(&expected, &doubled);
    eprintln!("  projective: 2x upscale grid");

    // --- Test 4: diamond target blanks the outside, keeps the middle ---
    let flat = uniform_raster(2, 2, (9, 9, 9)).expect("flat");
    let diamond = QuadMapping::from_points(&[
        Point::new(2.0, 0.0),
        Point::new(4.0, 2.0),
        Point::new(2.0, 4.0),
        Point::new(0.0, 2.0),
    ]);
    for method in [TransformMethod::Projective, TransformMethod::Bilinear] {
        let out = transform(&nearest(&flat), &diamond, method).expect("diamond");
        rp.compare_values(BLANK as f64, out.get_pixel(0, 0).unwrap() as f64, 0.0);
        rp.compare_values(BLANK as f64, out.get_pixel(3, 3).unwrap() as f64, 0.0);
        rp.compare_values(
            flat.get_pixel(1, 1).unwrap() as f64,
            out.get_pixel(2, 2).unwrap() as f64,
            0.0,
        );
    }
    eprintln!("  diamond: outside blank, center kept");

    // --- Test 5: both paths agree on rectangular targets ---
    let triple_rect = QuadMapping::from_rect(Rect::new(0.0, 0.0, 15.0, 12.0));
    let source = gradient_raster(5, 4).expect("gradient");
    let s = nearest(&source);
    let proj = transform(&s, &triple_rect, TransformMethod::Projective).expect("projective");
    let bilin = transform(&s, &triple_rect, TransformMethod::Bilinear).expect("bilinear");
    rp.compare_rasters(&proj, &bilin);
    eprintln!("  rect target: projective == bilinear");

    // --- Test 6: inverse bilinear round-trips on random convex quads ---
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut max_u_err = 0.0f64;
    let mut max_v_err = 0.0f64;
    for _ in 0..16 {
        // One corner per corner box keeps the quad strictly convex.
        let quad = [
            Point::new(rng.random_range(0.0..2.0), rng.random_range(0.0..2.0)),
            Point::new(rng.random_range(8.0..10.0), rng.random_range(0.0..2.0)),
            Point::new(rng.random_range(8.0..10.0), rng.random_range(8.0..10.0)),
            Point::new(rng.random_range(0.0..2.0), rng.random_range(8.0..10.0)),
        ];
        for _ in 0..8 {
            let u0: f32 = rng.random_range(0.0..=1.0);
            let v0: f32 = rng.random_range(0.0..=1.0);
            let probe = forward_bilinear(u0, v0, &quad);
            let (u, v) = inv_bilinear(probe, &quad);
            max_u_err = max_u_err.max((u - u0).abs() as f64);
            max_v_err = max_v_err.max((v - v0).abs() as f64);
        }
    }
    rp.compare_values(0.0, max_u_err, 1e-4);
    rp.compare_values(0.0, max_v_err, 1e-4);
    eprintln!("  inv_bilinear: max error u={max_u_err:.2e} v={max_v_err:.2e}");

    assert!(rp.cleanup(), "transform regression test failed");
}
