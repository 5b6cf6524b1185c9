//! Retropix Core - Basic data structures for pixel-art processing
//!
//! This crate provides the fundamental data structures used throughout
//! the retropix library:
//!
//! - [`Raster`] / [`RasterMut`] - The image container (immutable / mutable)
//! - [`Palette`] - Ordered set of exact-distinct colors
//! - [`color`] - Packed 32-bit pixel helpers
//!
//! Rasters are dense RGBA grids; all higher-level crates (scaling,
//! transformation, blending) operate on these types.

pub mod error;
pub mod palette;
pub mod raster;

pub use error::{Error, Result};
pub use palette::Palette;
pub use raster::{Raster, RasterMut};

/// Color channel helpers for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | (255 << ALPHA_SHIFT)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    /// Squared Euclidean distance between the RGB channels of two pixels.
    ///
    /// Alpha is ignored. The maximum value is `3 * 255 * 255`.
    #[inline]
    pub fn distance_squared(a: u32, b: u32) -> u32 {
        let dr = red(a) as i32 - red(b) as i32;
        let dg = green(a) as i32 - green(b) as i32;
        let db = blue(a) as i32 - blue(b) as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

}
