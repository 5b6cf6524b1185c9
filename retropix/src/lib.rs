//! Retropix - Pixel-art upscaling and re-projection for Rust
//!
//! Retropix upscales pixel-art rasters with neighborhood-pattern
//! algorithms instead of generic filters, re-projects the result through
//! arbitrary quadrilaterals with pixel-art-aware resampling, and blends
//! competing resampling strategies by local error.
//!
//! # Overview
//!
//! - Scale2x / Scale3x / Eagle block upscalers with cleanup passes
//! - Projective and inverse-bilinear quad mappings
//! - Samplers that only answer with colors present in the source
//! - Error-driven selection between two renders
//!
//! # Example
//!
//! ```
//! use retropix::{Raster, scale::{ScaleMethod, scale}};
//!
//! // Double a pixel-art raster with the Scale2x block rule
//! let art = Raster::new(32, 24, false).unwrap();
//! let doubled = scale(&art, ScaleMethod::Scale2x).unwrap();
//! assert_eq!(doubled.width(), 64);
//! assert_eq!(doubled.height(), 48);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use retropix_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use retropix_blend as blend;
pub use retropix_scale as scale;
pub use retropix_transform as transform;
