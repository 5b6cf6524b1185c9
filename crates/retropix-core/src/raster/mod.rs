//! Raster - the image container
//!
//! The `Raster` structure is the fundamental image type in retropix.
//! Every raster is a dense RGBA grid, one 32-bit word per pixel.
//!
//! # Pixel layout
//!
//! - Pixels are stored row-major, `y * width + x`
//! - Each pixel is packed `0xRRGGBBAA` (red in MSB, alpha in LSB)
//! - The alpha flag records whether the source carried an alpha channel;
//!   storage is 32-bit either way
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for efficient cloning (shared ownership).
//! To modify pixel data, convert to `RasterMut` via [`Raster::try_into_mut`]
//! or [`Raster::to_mut`], then convert back with `Into<Raster>`.

mod access;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal raster data
#[derive(Debug)]
struct RasterData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Whether the image carries a meaningful alpha channel
    has_alpha: bool,
    /// The image data, one packed 32-bit pixel per word
    data: Vec<u32>,
}

/// Raster - immutable RGBA image container
///
/// `Raster` is the fundamental image type in retropix. It uses reference
/// counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use retropix_core::Raster;
///
/// let img = Raster::new(64, 48, true).unwrap();
/// assert_eq!(img.width(), 64);
/// assert_eq!(img.height(), 48);
/// assert!(img.has_alpha());
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new raster with the specified dimensions.
    ///
    /// The image data is initialized to transparent zero pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, has_alpha: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let data = vec![0u32; (width as usize) * (height as usize)];
        let inner = RasterData {
            width,
            height,
            has_alpha,
            data,
        };

        Ok(Raster {
            inner: Arc::new(inner),
        })
    }

    /// Create a raster from existing packed pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero dimensions and
    /// [`Error::InvalidParameter`] when `data` is not exactly
    /// `width * height` words long.
    pub fn from_pixels(width: u32, height: u32, has_alpha: bool, data: Vec<u32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "pixel data length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }

        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                has_alpha,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Whether the image carries a meaningful alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.inner.has_alpha
    }

    /// Get raw access to the packed pixel data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this raster.
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create a new raster with the same dimensions and alpha flag as the
    /// source, initialized to transparent zero pixels.
    pub fn create_template(&self) -> Self {
        let data = vec![0u32; self.inner.data.len()];
        Raster {
            inner: Arc::new(RasterData {
                width: self.inner.width,
                height: self.inner.height,
                has_alpha: self.inner.has_alpha,
                data,
            }),
        }
    }

    /// Check if two rasters have the same width and height.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.width == other.inner.width && self.inner.height == other.inner.height
    }

    /// Create a deep copy of this raster.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Raster {
            inner: Arc::new(RasterData {
                width: self.inner.width,
                height: self.inner.height,
                has_alpha: self.inner.has_alpha,
                data: self.inner.data.clone(),
            }),
        }
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    /// If successful, returns a [`RasterMut`] that allows modification.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    ///
    /// Always creates a new copy that can be modified.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: RasterData {
                width: self.inner.width,
                height: self.inner.height,
                has_alpha: self.inner.has_alpha,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable raster
///
/// Allows modification of image data. Convert back to an immutable
/// [`Raster`] using `Into<Raster>`.
///
/// The split type enforces exclusive access at compile time; shared
/// rasters must be unwrapped or copied before mutation.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    /// Create a new mutable raster initialized to transparent zero pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, has_alpha: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let data = vec![0u32; (width as usize) * (height as usize)];
        Ok(RasterMut {
            inner: RasterData {
                width,
                height,
                has_alpha,
                data,
            },
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Whether the image carries a meaningful alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.inner.has_alpha
    }

    /// Get raw access to the packed pixel data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Set every pixel to the given packed value.
    pub fn fill(&mut self, value: u32) {
        self.inner.data.fill(value);
    }
}

impl From<RasterMut> for Raster {
    fn from(raster: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster.inner),
        }
    }
}
