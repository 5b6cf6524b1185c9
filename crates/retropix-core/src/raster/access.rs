//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//! Bounds-checked accessors return `Option`/`Result`; the clamped
//! variants replicate the nearest edge pixel and never fail, which is
//! what neighborhood scans and samplers rely on at image borders.

use super::{Raster, RasterMut};
use crate::color;
use crate::error::{Error, Result};

#[inline]
fn clamped_index(width: u32, height: u32, x: i32, y: i32) -> usize {
    let cx = x.clamp(0, width as i32 - 1) as usize;
    let cy = y.clamp(0, height as i32 - 1) as usize;
    cy * width as usize + cx
}

impl Raster {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.inner.data[(y * self.width() + x) as usize]
    }

    /// Get a pixel value with coordinates clamped into bounds.
    ///
    /// Out-of-range coordinates replicate the nearest edge pixel.
    #[inline]
    pub fn get_pixel_clamped(&self, x: i32, y: i32) -> u32 {
        self.inner.data[clamped_index(self.width(), self.height(), x, y)]
    }

    /// Get RGB values at (x, y).
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Get RGBA values at (x, y).
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgba)
    }
}

impl RasterMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.get_pixel_unchecked(x, y))
    }

    /// Get a pixel value without bounds checking.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        self.inner.data[(y * self.width() + x) as usize]
    }

    /// Get a pixel value with coordinates clamped into bounds.
    #[inline]
    pub fn get_pixel_clamped(&self, x: i32, y: i32) -> u32 {
        self.inner.data[clamped_index(self.width(), self.height(), x, y)]
    }

    /// Get RGBA values at (x, y).
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        self.get_pixel(x, y).map(color::extract_rgba)
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if x >= self.width() || y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * self.width() as usize + x as usize,
                len: self.inner.data.len(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let idx = (y * self.width() + x) as usize;
        self.inner.data[idx] = val;
    }

    /// Set a pixel value with the target coordinate clamped into bounds.
    ///
    /// The write always lands on some pixel; coordinates outside the
    /// raster overwrite the nearest edge pixel instead.
    #[inline]
    pub fn set_pixel_clamped(&mut self, x: i32, y: i32, val: u32) {
        let idx = clamped_index(self.width(), self.height(), x, y);
        self.inner.data[idx] = val;
    }

    /// Set an RGB pixel at (x, y) with alpha 255.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }

    /// Set an RGBA pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))
    }
}
