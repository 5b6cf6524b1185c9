//! retropix-test - Regression test framework for retropix
//!
//! This crate provides a small regression test harness plus builders for
//! synthetic test rasters. There is no image I/O in the workspace, so
//! fixtures are constructed in code rather than loaded from files.
//!
//! # Usage
//!
//! ```
//! use retropix_test::{RegParams, uniform_raster};
//!
//! let mut rp = RegParams::new("example");
//! let img = uniform_raster(4, 4, (10, 20, 30)).unwrap();
//! rp.compare_values(4.0, img.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use retropix_core::{Raster, RasterMut, color};

/// Build a raster from a row-major slice of RGB triples.
///
/// # Errors
///
/// Fails when the slice length does not equal `width * height` or a
/// dimension is zero.
pub fn raster_from_rgb(width: u32, height: u32, rgb: &[(u8, u8, u8)]) -> TestResult<Raster> {
    if rgb.len() != (width as usize) * (height as usize) {
        return Err(TestError::RasterBuild {
            message: format!("{} pixels given for {}x{}", rgb.len(), width, height),
        });
    }
    let data: Vec<u32> = rgb
        .iter()
        .map(|&(r, g, b)| color::compose_rgb(r, g, b))
        .collect();
    Raster::from_pixels(width, height, false, data).map_err(|e| TestError::RasterBuild {
        message: e.to_string(),
    })
}

/// Build a raster filled with one RGB color.
pub fn uniform_raster(width: u32, height: u32, rgb: (u8, u8, u8)) -> TestResult<Raster> {
    let mut m = RasterMut::new(width, height, false).map_err(|e| TestError::RasterBuild {
        message: e.to_string(),
    })?;
    m.fill(color::compose_rgb(rgb.0, rgb.1, rgb.2));
    Ok(m.into())
}

/// Build a raster with a two-color checkerboard pattern.
///
/// Cell (x, y) takes `a` when `x + y` is even, `b` otherwise.
pub fn checkerboard(
    width: u32,
    height: u32,
    a: (u8, u8, u8),
    b: (u8, u8, u8),
) -> TestResult<Raster> {
    let mut m = RasterMut::new(width, height, false).map_err(|e| TestError::RasterBuild {
        message: e.to_string(),
    })?;
    let pa = color::compose_rgb(a.0, a.1, a.2);
    let pb = color::compose_rgb(b.0, b.1, b.2);
    for y in 0..height {
        for x in 0..width {
            let v = if (x + y) % 2 == 0 { pa } else { pb };
            m.set_pixel_unchecked(x, y, v);
        }
    }
    Ok(m.into())
}

/// Build a raster with a horizontal red and vertical green gradient.
///
/// Every pixel is distinct for sizes up to 256x256, which makes the
/// builder useful for catching coordinate mixups.
pub fn gradient_raster(width: u32, height: u32) -> TestResult<Raster> {
    let mut m = RasterMut::new(width, height, false).map_err(|e| TestError::RasterBuild {
        message: e.to_string(),
    })?;
    for y in 0..height {
        for x in 0..width {
            m.set_pixel_unchecked(x, y, color::compose_rgb((x % 256) as u8, (y % 256) as u8, 0));
        }
    }
    Ok(m.into())
}
