//! Raster container regression test
//!
//! 画像コンテナの共有・複製・クランプ読みとパレットをテスト。

use retropix_core::{Palette, Raster, color};
use retropix_test::{RegParams, checkerboard, gradient_raster};

#[test]
fn raster_reg() {
    let mut rp = RegParams::new("raster");

    // --- Test 1: deep clone copies, template zeroes ---
    let img = gradient_raster(6, 4).expect("gradient");
    rp.compare_rasters(&img, &img.deep_clone());
    let zero = Raster::new(6, 4, false).expect("zero");
    rp.compare_rasters(&zero, &img.create_template());
    eprintln!("  clone/template: ok");

    // --- Test 2: clamped access replicates the nearest edge ---
    rp.compare_values(
        img.get_pixel(0, 0).unwrap() as f64,
        img.get_pixel_clamped(-9, -9) as f64,
        0.0,
    );
    rp.compare_values(
        img.get_pixel(5, 3).unwrap() as f64,
        img.get_pixel_clamped(99, 99) as f64,
        0.0,
    );
    rp.compare_values(
        img.get_pixel(5, 0).unwrap() as f64,
        img.get_pixel_clamped(7, -2) as f64,
        0.0,
    );
    eprintln!("  clamped reads: edges replicated");

    // --- Test 3: exclusive mutation behind the Arc ---
    let shared = img.clone();
    rp.compare_values(2.0, shared.ref_count() as f64, 0.0);
    assert!(shared.try_into_mut().is_err(), "shared raster must not unwrap");
    rp.compare_values(1.0, img.ref_count() as f64, 0.0);

    let mut owned = img.deep_clone().try_into_mut().expect("exclusive");
    owned.set_rgb(0, 0, 9, 9, 9).expect("set");
    let owned: Raster = owned.into();
    rp.compare_values(
        color::compose_rgb(9, 9, 9) as f64,
        owned.get_pixel(0, 0).unwrap() as f64,
        0.0,
    );
    eprintln!("  copy-on-write: ok");

    // --- Test 4: palette dedupe, order, nearest with tie-break ---
    let checker = checkerboard(4, 4, (200, 10, 10), (10, 10, 200)).expect("checker");
    let mut palette = Palette::new();
    for &pixel in checker.data() {
        palette.push_new(pixel);
    }
    let red = color::compose_rgb(200, 10, 10) as f64;
    rp.compare_values(2.0, palette.len() as f64, 0.0);
    rp.compare_values(red, palette.get(0).unwrap() as f64, 0.0);
    rp.compare_values(red, palette.find_nearest(190, 20, 20).unwrap() as f64, 0.0);
    // Equidistant probe: the earlier entry wins.
    rp.compare_values(red, palette.find_nearest(105, 10, 105).unwrap() as f64, 0.0);
    eprintln!("  palette: {} colors", palette.len());

    assert!(rp.cleanup(), "raster regression test failed");
}
