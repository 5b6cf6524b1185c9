//! retropix-transform - Quad re-projection with pixel-art-aware samplers
//!
//! This crate maps a raster onto an arbitrary quadrilateral:
//!
//! - [`Point`] / [`Rect`] / [`Matrix3`] geometry and the unit-square
//!   quad mappings, including the inverse bilinear solve
//! - [`QuadMapping`] tying a quad to its pixel bounding box
//! - The [`Sampler`] strategies, from plain nearest/bilinear/bicubic to
//!   the dominance and best-fit samplers that only answer with colors
//!   present in the source
//! - [`transform`], the per-pixel re-projection over a chosen
//!   [`TransformMethod`]

mod error;
pub mod geometry;
pub mod mapping;
pub mod sampler;
pub mod transform;

pub use error::{TransformError, TransformResult};

// Re-export the main entry points
pub use geometry::{
    GEOMETRY_EPSILON, Matrix3, Point, Rect, forward_bilinear, inv_bilinear,
    map_unit_square_to_quad,
};
pub use mapping::QuadMapping;
pub use sampler::{BestFitMode, SampleMethod, Sampler};
pub use transform::{BLANK, TransformMethod, transform};
